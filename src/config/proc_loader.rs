use std::path::Path;

use anyhow::{anyhow, Result};
use regex::Regex;
use tracing::{debug, error};

use crate::config::platform::ServiceConfig;
use crate::config::proc_validator;
use crate::config::settings::LoggingConfig;
use crate::observability::metrics::get_metrics;

/// Load and validate config from YAML file
pub async fn file_to_config(path: &Path) -> Result<ServiceConfig> {
    let content = tokio::fs::read_to_string(path).await?;

    let expanded = expand_env_vars(&content)?;
    parse_config(expanded).await
}

pub async fn parse_config(content: String) -> Result<ServiceConfig> {
    let metrics = get_metrics().await;
    let mut service_config: ServiceConfig = serde_yaml::from_str(&content).inspect_err(|e| {
        error!("parse config error: {}", e);
        metrics.config_parse_failures.inc();
    })?;

    // Apply defaults
    if service_config.settings.logging.is_none() {
        service_config.settings.logging = Some(LoggingConfig::default());
    }

    debug!("validation config ...");
    proc_validator::validate_service_config(&service_config)
        .await
        .map_err(|errors| anyhow!("config validation failed:\n  - {}", errors.join("\n  - ")))?;

    Ok(service_config)
}

/// Replaces `${VAR}` and `${VAR:default}` with environment values.
/// Unset variables without a default expand to an empty string.
pub fn expand_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]*))?\}")?;
    let expanded = re
        .replace_all(input, |caps: &regex::Captures| {
            let var = &caps[1];
            let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            std::env::var(var).unwrap_or_else(|_| default.to_string())
        })
        .to_string();
    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    use crate::config::platform::TokenClientAuth;
    use crate::config::settings::LogFormat;
    use crate::utils::constants::{DEFAULT_PORT, DEFAULT_SCOPES};

    const MINIMAL: &str = r#"
credentials:
  username: "${APIM_TEST_USER}"
  password: "${APIM_TEST_PASSWORD:fallback-secret}"
endpoints:
  client_registration: https://apim.local/client-registration/v0.17/register
  token: https://apim.local/oauth2/token
  apis: https://apim.local/api/am/publisher/v4/apis
  subscriptions: https://apim.local/api/am/publisher/v4/subscriptions
  throttling_policies: https://apim.local/api/am/devportal/v3/throttling-policies/subscription
"#;

    #[test]
    #[serial]
    fn expands_env_vars_with_defaults() -> Result<()> {
        std::env::set_var("APIM_EXPAND_SET", "from-env");
        std::env::remove_var("APIM_EXPAND_UNSET");

        let out = expand_env_vars("a=${APIM_EXPAND_SET} b=${APIM_EXPAND_UNSET:dflt} c=${APIM_EXPAND_UNSET}")?;
        assert_eq!(out, "a=from-env b=dflt c=");

        std::env::remove_var("APIM_EXPAND_SET");
        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn minimal_config_gets_defaults() -> Result<()> {
        std::env::set_var("APIM_TEST_USER", "admin");
        std::env::remove_var("APIM_TEST_PASSWORD");

        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(MINIMAL.as_bytes())?;

        let config = file_to_config(file.path()).await?;

        assert_eq!(config.credentials.username, "admin");
        assert_eq!(config.credentials.password, "fallback-secret");
        assert_eq!(config.settings.server.port, DEFAULT_PORT.to_string());
        assert_eq!(config.settings.fan_out.max_concurrency, 8);
        assert_eq!(config.token_client_auth, TokenClientAuth::RegisteredClient);
        assert_eq!(config.registration.client_name, "rest_api_publisher");
        assert_eq!(config.registration.grant_types, "client_credentials password refresh_token");
        assert!(config.registration.saas_app);
        assert_eq!(config.scopes.len(), DEFAULT_SCOPES.len());
        assert_eq!(config.settings.logging.as_ref().map(|l| l.format.clone()), Some(LogFormat::Compact));

        std::env::remove_var("APIM_TEST_USER");
        Ok(())
    }

    #[tokio::test]
    #[serial]
    async fn missing_credentials_are_rejected() {
        std::env::remove_var("APIM_TEST_USER");
        std::env::remove_var("APIM_TEST_PASSWORD");

        let err = parse_config(expand_env_vars(MINIMAL).unwrap().replace("fallback-secret", ""))
            .await
            .expect_err("empty credentials must fail validation");

        let message = err.to_string();
        assert!(message.contains("credentials.username"), "{message}");
        assert!(message.contains("credentials.password"), "{message}");
    }

    #[tokio::test]
    #[serial]
    async fn bundled_sample_config_loads() -> Result<()> {
        std::env::set_var("APIM_USERNAME", "admin");
        std::env::set_var("APIM_PASSWORD", "admin");
        std::env::remove_var("APIM_BASE_URL");

        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("apim-agent.yaml");
        let config = file_to_config(&path).await?;

        assert!(config.settings.metrics.is_enabled);
        assert_eq!(config.endpoints.token, "https://localhost:9443/oauth2/token");
        assert_eq!(config.scope_string().split(' ').count(), DEFAULT_SCOPES.len());

        std::env::remove_var("APIM_USERNAME");
        std::env::remove_var("APIM_PASSWORD");
        Ok(())
    }

    #[tokio::test]
    async fn malformed_yaml_is_an_error() {
        let result = parse_config("credentials: [not, a, map]".to_owned()).await;
        assert!(result.is_err());
    }
}
