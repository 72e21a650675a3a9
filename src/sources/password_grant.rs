use http::header::AUTHORIZATION;
use serde::Deserialize;
use tracing::info;

use crate::error::AutomationError;
use crate::sources::response::send_json;
use crate::sources::{ApimClient, ENDPOINT_TOKEN};
use crate::utils::constants::PASSWORD_GRANT;

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl ApimClient {
    /// Exchange the administrative credentials for an access token.
    ///
    /// `basic_credentials` is the already base64-encoded `id:secret` pair placed
    /// in the `Authorization: Basic` header.
    pub async fn exchange_password_grant(&self, basic_credentials: &str) -> Result<String, AutomationError> {
        let config = self.config();
        let credentials = &config.credentials;
        let scope = config.scope_string();

        let form = [
            ("grant_type", PASSWORD_GRANT),
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
            ("scope", scope.as_str()),
        ];

        let request = self
            .client
            .post(&config.endpoints.token)
            .header(AUTHORIZATION, format!("Basic {}", basic_credentials))
            .form(&form);

        let value = send_json(ENDPOINT_TOKEN, request).await?;
        let token: TokenResponse =
            serde_json::from_value(value).map_err(|e| AutomationError::MalformedResponse {
                endpoint: ENDPOINT_TOKEN,
                reason: e.to_string(),
            })?;
        if token.access_token.trim().is_empty() {
            return Err(AutomationError::MalformedResponse {
                endpoint: ENDPOINT_TOKEN,
                reason: "empty 'access_token'".to_owned(),
            });
        }

        info!("password grant succeeded, {} scopes requested", config.scopes.len());
        Ok(token.access_token)
    }
}
