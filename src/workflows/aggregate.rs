use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::cache::token_slot::TokenSlot;
use crate::error::AutomationError;
use crate::observability::metrics::get_metrics;
use crate::resilience::fan_out::bounded_fan_out;
use crate::sources::ApimClient;
use crate::utils::constants::MSG_SUBSCRIPTIONS_FAILED;

/// Subscriptions of one API. On failure `subscriptions` is empty and `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_name: Option<Value>,
    pub subscriptions: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateReport {
    pub apis: Vec<Value>,
    /// index-aligned with `apis`
    pub subscriptions_data: Vec<SubscriptionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub throttling_policies: Option<Value>,
}

/// Fetch APIs, their subscriptions and the throttling policies with the stored token.
///
/// Fails without any outbound call when no token is stored. Subscription
/// failures are isolated per API; every other failure fails the call.
pub async fn aggregate(
    client: &ApimClient,
    slot: &TokenSlot,
    max_concurrency: usize,
) -> Result<AggregateReport, AutomationError> {
    let metrics = get_metrics().await;

    match run(client, slot, max_concurrency).await {
        Ok(report) => {
            metrics.aggregations.with_label_values(&["success"]).inc();
            Ok(report)
        }
        Err(e) => {
            match &e {
                AutomationError::MissingToken | AutomationError::NoApis => warn!("aggregation rejected: {}", e),
                _ => error!("aggregation failed: {}, upstream body: {:?}", e, e.upstream_body()),
            }
            metrics.aggregations.with_label_values(&[e.reason()]).inc();
            Err(e)
        }
    }
}

async fn run(
    client: &ApimClient,
    slot: &TokenSlot,
    max_concurrency: usize,
) -> Result<AggregateReport, AutomationError> {
    let token = slot
        .get()
        .await
        .filter(|token| !token.value.is_empty())
        .ok_or(AutomationError::MissingToken)?;
    let token = token.value.as_str();

    let apis = client
        .list_apis(token)
        .await?
        .filter(|apis| !apis.is_empty())
        .ok_or(AutomationError::NoApis)?;
    info!("fetched {} apis, fetching subscriptions", apis.len());

    let subscriptions_data = bounded_fan_out(apis.iter().collect::<Vec<&Value>>(), max_concurrency, |api| {
        fetch_subscriptions(client, token, api)
    })
    .await;

    let throttling_policies = client.list_throttling_policies(token).await?;

    let degraded = subscriptions_data.iter().filter(|s| s.error.is_some()).count();
    info!(
        "aggregated {} apis, {} subscription fetches degraded",
        apis.len(),
        degraded
    );

    Ok(AggregateReport {
        apis,
        subscriptions_data,
        throttling_policies,
    })
}

async fn fetch_subscriptions(client: &ApimClient, token: &str, api: &Value) -> SubscriptionResult {
    let api_id = api.get("id").and_then(Value::as_str).map(str::to_owned);
    let api_name = api.get("name").cloned();

    let result = match &api_id {
        Some(id) => client.list_subscriptions(token, id).await,
        None => Err(AutomationError::MalformedResponse {
            endpoint: crate::sources::ENDPOINT_APIS,
            reason: "api descriptor has no string 'id'".to_owned(),
        }),
    };

    match result {
        Ok(subscriptions) => SubscriptionResult {
            api_id,
            api_name,
            subscriptions,
            error: None,
        },
        Err(e) => {
            warn!("fetching subscriptions for api {:?} failed: {}, upstream body: {:?}", api_id, e, e.upstream_body());
            get_metrics().await.subscription_degradations.inc();
            let error = match &e {
                AutomationError::MalformedResponse { reason, .. } if api_id.is_none() => Value::String(reason.clone()),
                _ => e
                    .upstream_body()
                    .cloned()
                    .unwrap_or_else(|| Value::String(MSG_SUBSCRIPTIONS_FAILED.to_owned())),
            };
            SubscriptionResult {
                api_id,
                api_name,
                subscriptions: Vec::new(),
                error: Some(error),
            }
        }
    }
}
