use serde::Serialize;
use tracing::{error, info};

use crate::cache::token::AccessToken;
use crate::cache::token_slot::TokenSlot;
use crate::config::platform::TokenClientAuth;
use crate::error::AutomationError;
use crate::helpers::credentials::encode_basic_credentials;
use crate::observability::metrics::get_metrics;
use crate::sources::ApimClient;

/// Everything the caller gets back from a successful authorization.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationOutcome {
    pub client_id: String,
    pub client_secret: String,
    pub base64_encoded_credentials: String,
    pub access_token: String,
}

/// Register a client, run the password grant and store the resulting token.
///
/// Steps run strictly in sequence; any failure aborts and leaves `slot`
/// untouched.
pub async fn authorize(client: &ApimClient, slot: &TokenSlot) -> Result<AuthorizationOutcome, AutomationError> {
    let metrics = get_metrics().await;

    match run(client, slot).await {
        Ok(outcome) => {
            metrics.authorizations.with_label_values(&["success"]).inc();
            Ok(outcome)
        }
        Err(e) => {
            error!("authorization failed: {}, upstream body: {:?}", e, e.upstream_body());
            metrics.authorizations.with_label_values(&["failure"]).inc();
            Err(e)
        }
    }
}

async fn run(client: &ApimClient, slot: &TokenSlot) -> Result<AuthorizationOutcome, AutomationError> {
    let config = client.config();

    // 1. register
    let registration = client.register_client().await?;

    // 2. encode
    let base64_encoded_credentials =
        encode_basic_credentials(&registration.client_id, &registration.client_secret);

    // 3. token exchange
    let token_credentials = match config.token_client_auth {
        TokenClientAuth::RegisteredClient => base64_encoded_credentials.clone(),
        TokenClientAuth::Administrative => {
            encode_basic_credentials(&config.credentials.username, &config.credentials.password)
        }
    };
    let access_token = client.exchange_password_grant(&token_credentials).await?;

    // 4. store
    slot.set(AccessToken::new(access_token.clone())).await;
    info!("access token stored for client {}", registration.client_id);

    Ok(AuthorizationOutcome {
        client_id: registration.client_id,
        client_secret: registration.client_secret,
        base64_encoded_credentials,
        access_token,
    })
}
