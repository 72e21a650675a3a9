use serde::Deserialize;
use std::fmt;

use crate::config::settings::SettingsConfig;
use crate::utils::constants::{
    DEFAULT_CALLBACK_URL, DEFAULT_CLIENT_NAME, DEFAULT_GRANT_TYPES, DEFAULT_SCOPES,
};

/// ================================
/// Full service configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    #[serde(default)]
    pub settings: SettingsConfig,
    pub credentials: Credentials,
    pub endpoints: EndpointsConfig,
    #[serde(default)]
    pub registration: RegistrationConfig,
    #[serde(default)]
    pub token_client_auth: TokenClientAuth,
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
}

impl ServiceConfig {
    /// Space-delimited scope string sent with the password grant.
    pub fn scope_string(&self) -> String {
        self.scopes.join(" ")
    }
}

/// Administrative identity used for client registration and the password grant.
#[derive(Deserialize, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// ================================
/// Upstream endpoints
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct EndpointsConfig {
    pub client_registration: String,
    pub token: String,
    pub apis: String,
    pub subscriptions: String,
    pub throttling_policies: String,
}

impl EndpointsConfig {
    /// (name, url) pairs, used for validation and logging.
    pub fn named(&self) -> [(&'static str, &str); 5] {
        [
            ("client_registration", self.client_registration.as_str()),
            ("token", self.token.as_str()),
            ("apis", self.apis.as_str()),
            ("subscriptions", self.subscriptions.as_str()),
            ("throttling_policies", self.throttling_policies.as_str()),
        ]
    }
}

/// ================================
/// Dynamic client registration body
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct RegistrationConfig {
    #[serde(default = "default_client_name")]
    pub client_name: String,
    /// not used by the flow, the provider requires one
    #[serde(default = "default_callback_url")]
    pub callback_url: String,
    #[serde(default = "default_grant_types")]
    pub grant_types: String,
    #[serde(default = "default_saas_app")]
    pub saas_app: bool,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            client_name: default_client_name(),
            callback_url: default_callback_url(),
            grant_types: default_grant_types(),
            saas_app: default_saas_app(),
        }
    }
}

/// Which credential pair authenticates the token endpoint call.
///
/// Defaults to the registered client pair, which is what deployed
/// installations send; `administrative` uses the admin username/password.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TokenClientAuth {
    /// `base64(clientId:clientSecret)` of the freshly registered client
    #[default]
    RegisteredClient,
    /// `base64(username:password)` of the administrative credentials
    Administrative,
}

fn default_client_name() -> String {
    DEFAULT_CLIENT_NAME.to_string()
}

fn default_callback_url() -> String {
    DEFAULT_CALLBACK_URL.to_string()
}

fn default_grant_types() -> String {
    DEFAULT_GRANT_TYPES.to_string()
}

fn default_saas_app() -> bool {
    true
}

pub fn default_scopes() -> Vec<String> {
    DEFAULT_SCOPES.iter().map(|scope| scope.to_string()).collect()
}
