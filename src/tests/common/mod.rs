// tests/common/mod.rs
pub use axum::Router;
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use std::net::SocketAddr;
use std::sync::Arc;

use httpmock::Method::{GET, POST};
use httpmock::{Mock, MockServer};
use reqwest::Client;

use crate::cache::token_slot::TokenSlot;
use crate::config::platform::{
    default_scopes, Credentials, EndpointsConfig, RegistrationConfig, ServiceConfig, TokenClientAuth,
};
use crate::config::settings::SettingsConfig;
use crate::helpers::credentials::encode_basic_credentials;
use crate::observability::metrics::get_metrics;
use crate::server::server::{router, AppState, AutomationState};
use crate::sources::ApimClient;

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin";

pub const REGISTRATION_PATH: &str = "/client-registration/v0.17/register";
pub const TOKEN_PATH: &str = "/oauth2/token";
pub const APIS_PATH: &str = "/api/am/publisher/v4/apis";
pub const SUBSCRIPTIONS_PATH: &str = "/api/am/publisher/v4/subscriptions";
pub const THROTTLING_PATH: &str = "/api/am/devportal/v3/throttling-policies/subscription";

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

/// Service config with every upstream endpoint rooted at `base_url`.
pub fn test_service_config(base_url: &str) -> ServiceConfig {
    let mut settings = SettingsConfig::default();
    settings.metrics.is_enabled = true;
    settings.fan_out.max_concurrency = 2;

    ServiceConfig {
        settings,
        credentials: Credentials {
            username: ADMIN_USER.to_owned(),
            password: ADMIN_PASSWORD.to_owned(),
        },
        endpoints: EndpointsConfig {
            client_registration: format!("{}{}", base_url, REGISTRATION_PATH),
            token: format!("{}{}", base_url, TOKEN_PATH),
            apis: format!("{}{}", base_url, APIS_PATH),
            subscriptions: format!("{}{}", base_url, SUBSCRIPTIONS_PATH),
            throttling_policies: format!("{}{}", base_url, THROTTLING_PATH),
        },
        registration: RegistrationConfig::default(),
        token_client_auth: TokenClientAuth::RegisteredClient,
        scopes: default_scopes(),
    }
}

pub fn test_client(config: ServiceConfig) -> ApimClient {
    ApimClient::new(Arc::new(config)).expect("apim client")
}

pub async fn test_router(config: ServiceConfig, token_slot: TokenSlot) -> Router {
    let state = AppState::new(
        get_metrics().await,
        AutomationState::new(test_client(config), token_slot),
    );
    router(state)
}

/// Registration returning `client_id`/`client_secret`, then a token endpoint
/// that only accepts those client credentials and issues `access_token`.
pub async fn mock_authorization<'a>(
    server: &'a MockServer,
    client_id: &str,
    client_secret: &str,
    access_token: &str,
) -> (Mock<'a>, Mock<'a>) {
    let admin_basic = format!("Basic {}", encode_basic_credentials(ADMIN_USER, ADMIN_PASSWORD));
    let client_basic = format!("Basic {}", encode_basic_credentials(client_id, client_secret));

    let registration = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(REGISTRATION_PATH)
                .header("authorization", admin_basic.as_str())
                .json_body(json!({
                    "callbackUrl": "www.google.lk",
                    "clientName": "rest_api_publisher",
                    "owner": ADMIN_USER,
                    "grantType": "client_credentials password refresh_token",
                    "saasApp": true
                }));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "clientId": client_id,
                    "clientName": "admin_rest_api_publisher",
                    "callBackURL": "www.google.lk",
                    "clientSecret": client_secret,
                    "isSaasApplication": true,
                    "appOwner": ADMIN_USER,
                    "jsonString": "{}"
                }));
        })
        .await;

    let token = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(TOKEN_PATH)
                .header("authorization", client_basic.as_str())
                .header("content-type", "application/x-www-form-urlencoded");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "access_token": access_token,
                    "refresh_token": "refresh-xyz",
                    "scope": "apim:api_view apim:subscription_view",
                    "token_type": "Bearer",
                    "expires_in": 3600
                }));
        })
        .await;

    (registration, token)
}

/// API collection endpoint accepting only `Bearer <token>`.
pub async fn mock_apis<'a>(server: &'a MockServer, token: &str, body: serde_json::Value) -> Mock<'a> {
    let bearer = format!("Bearer {}", token);
    server
        .mock_async(|when, then| {
            when.method(GET).path(APIS_PATH).header("authorization", bearer.as_str());
            then.status(200).header("content-type", "application/json").json_body(body);
        })
        .await
}

pub async fn mock_subscriptions<'a>(
    server: &'a MockServer,
    token: &str,
    api_id: &str,
    status: u16,
    body: serde_json::Value,
) -> Mock<'a> {
    let bearer = format!("Bearer {}", token);
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path(SUBSCRIPTIONS_PATH)
                .query_param("apiId", api_id)
                .header("authorization", bearer.as_str());
            then.status(status).header("content-type", "application/json").json_body(body);
        })
        .await
}

pub async fn mock_throttling<'a>(
    server: &'a MockServer,
    token: &str,
    status: u16,
    body: serde_json::Value,
) -> Mock<'a> {
    let bearer = format!("Bearer {}", token);
    server
        .mock_async(|when, then| {
            when.method(GET).path(THROTTLING_PATH).header("authorization", bearer.as_str());
            then.status(status).header("content-type", "application/json").json_body(body);
        })
        .await
}

pub fn api(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "context": format!("/{}", name.to_lowercase()),
        "version": "1.0.0",
        "lifeCycleStatus": "PUBLISHED"
    })
}
