//! Outbound calls to the API-manager admin endpoints.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;

use crate::config::platform::ServiceConfig;

pub mod password_grant;
pub mod publisher;
pub mod registration;
pub mod response;

// endpoint labels, used in errors, logs and metrics
pub const ENDPOINT_REGISTRATION: &str = "client_registration";
pub const ENDPOINT_TOKEN: &str = "token";
pub const ENDPOINT_APIS: &str = "apis";
pub const ENDPOINT_SUBSCRIPTIONS: &str = "subscriptions";
pub const ENDPOINT_THROTTLING_POLICIES: &str = "throttling_policies";

/// HTTP client bound to one platform configuration.
#[derive(Debug, Clone)]
pub struct ApimClient {
    client: Client,
    config: Arc<ServiceConfig>,
}

impl ApimClient {
    /// Build a client with the configured request and connect timeouts.
    pub fn new(config: Arc<ServiceConfig>) -> Result<Self> {
        let http = &config.settings.http;
        let client = Client::builder()
            .timeout(Duration::from_millis(http.timeout_ms))
            .connect_timeout(Duration::from_millis(http.connect_timeout_ms))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: Arc<ServiceConfig>) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
