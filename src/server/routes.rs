use axum::{extract::State, Json};
use serde::Serialize;

use crate::helpers::time::to_rfc3339;
use crate::server::error::ApiResult;
use crate::server::server::AppState;
use crate::utils::constants::{MSG_AUTHORIZED, MSG_DATA_FETCHED};
use crate::workflows::aggregate::{aggregate, AggregateReport};
use crate::workflows::authorize::{authorize, AuthorizationOutcome};

#[derive(Debug, Serialize)]
pub struct AuthorizeResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub outcome: AuthorizationOutcome,
}

#[derive(Debug, Serialize)]
pub struct FetchDataResponse {
    pub message: &'static str,
    #[serde(flatten)]
    pub report: AggregateReport,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub token_present: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_acquired_at: Option<String>,
}

/// POST /automate
pub async fn automate(State(state): State<AppState>) -> ApiResult<Json<AuthorizeResponse>> {
    let automation = &state.automation_state;
    let outcome = authorize(&automation.client, &automation.token_slot).await?;

    Ok(Json(AuthorizeResponse {
        message: MSG_AUTHORIZED,
        outcome,
    }))
}

/// GET /fetch-data
pub async fn fetch_data(State(state): State<AppState>) -> ApiResult<Json<FetchDataResponse>> {
    let automation = &state.automation_state;
    let report = aggregate(
        &automation.client,
        &automation.token_slot,
        automation.max_concurrency,
    )
    .await?;

    Ok(Json(FetchDataResponse {
        message: MSG_DATA_FETCHED,
        report,
    }))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let token = state.automation_state.token_slot.get().await;

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        token_present: token.is_some(),
        token_acquired_at: token.map(|t| to_rfc3339(&t.acquired_at)),
    })
}
