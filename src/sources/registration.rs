use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AutomationError;
use crate::sources::response::send_json;
use crate::sources::{ApimClient, ENDPOINT_REGISTRATION};

/// Body of the dynamic client registration request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest<'a> {
    pub callback_url: &'a str,
    pub client_name: &'a str,
    pub owner: &'a str,
    pub grant_type: &'a str,
    pub saas_app: bool,
}

/// Client identity issued by the registration endpoint.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRegistration {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for ClientRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientRegistration")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

impl ApimClient {
    /// Register an OAuth2 client, authenticated with the administrative credentials.
    pub async fn register_client(&self) -> Result<ClientRegistration, AutomationError> {
        let config = self.config();
        let credentials = &config.credentials;
        let registration = &config.registration;

        let body = RegistrationRequest {
            callback_url: &registration.callback_url,
            client_name: &registration.client_name,
            owner: &credentials.username,
            grant_type: &registration.grant_types,
            saas_app: registration.saas_app,
        };

        let request = self
            .client
            .post(&config.endpoints.client_registration)
            .basic_auth(&credentials.username, Some(&credentials.password))
            .json(&body);

        let value = send_json(ENDPOINT_REGISTRATION, request).await?;
        let client: ClientRegistration =
            serde_json::from_value(value).map_err(|e| AutomationError::MalformedResponse {
                endpoint: ENDPOINT_REGISTRATION,
                reason: e.to_string(),
            })?;

        info!("registered client '{}' as {}", registration.client_name, client.client_id);
        Ok(client)
    }
}
