//! Configuration validation with aggregated errors.
//! - Aggregates all issues into Vec<String>
//! - Validates:
//!   * credentials presence
//!   * endpoint URLs (absolute, http/https)
//!   * server / http client / fan-out / logging invariants
//!   * scope list shape
//!   * metrics path collisions with service routes

use reqwest::Url;
use tracing::{error, info};

use crate::config::platform::{Credentials, EndpointsConfig, RegistrationConfig, ServiceConfig};
use crate::config::settings::SettingsConfig;
use crate::observability::metrics::get_metrics;
use crate::utils::constants::{ROUTE_AUTOMATE, ROUTE_FETCH_DATA, ROUTE_HEALTH};

/// Public entrypoint: returns Ok(()) or Err(Vec<String>) containing all issues.
pub async fn validate_service_config(cfg: &ServiceConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    validate_settings(&cfg.settings, &mut errors);
    validate_credentials(&cfg.credentials, &mut errors);
    validate_endpoints(&cfg.endpoints, &mut errors);
    validate_registration(&cfg.registration, &mut errors);
    validate_scopes(&cfg.scopes, &mut errors);

    if errors.is_empty() {
        info!("config valid");
        Ok(())
    } else {
        error!("configuration validation errors ({}):", errors.len());
        for e in &errors {
            error!(" - {}", e);
        }
        get_metrics()
            .await
            .config_validation_errors
            .inc_by(errors.len() as u64);
        Err(errors)
    }
}

/// SETTINGS VALIDATION
fn validate_settings(settings: &SettingsConfig, errors: &mut Vec<String>) {
    if settings.server.host.trim().is_empty() {
        errors.push("settings.server.host must not be empty".to_string());
    }
    if settings.server.port.parse::<u16>().is_err() {
        errors.push(format!(
            "settings.server.port '{}' must be an integer in range 0-65535",
            settings.server.port
        ));
    }

    if settings.http.timeout_ms == 0 {
        errors.push("settings.http.timeout_ms must be > 0".to_string());
    }
    if settings.http.connect_timeout_ms == 0 {
        errors.push("settings.http.connect_timeout_ms must be > 0".to_string());
    }

    if settings.fan_out.max_concurrency == 0 {
        errors.push("settings.fan_out.max_concurrency must be > 0".to_string());
    }

    // metrics endpoint start with '/' and must not shadow service routes
    let metrics = &settings.metrics;
    if !metrics.path.starts_with('/') {
        errors.push(format!(
            "settings.metrics.path '{}' must start with '/'",
            metrics.path
        ));
    }
    if [ROUTE_AUTOMATE, ROUTE_FETCH_DATA, ROUTE_HEALTH].contains(&metrics.path.as_str()) {
        errors.push(format!(
            "settings.metrics.path '{}' collides with a service route",
            metrics.path
        ));
    }

    // logging level
    if let Some(logging) = &settings.logging {
        let valid = ["trace", "debug", "info", "warn", "error"];
        if !valid.contains(&logging.level.to_lowercase().as_str()) {
            errors.push(format!(
                "settings.logging.level '{}' invalid; allowed: {:?}",
                logging.level, valid
            ));
        }
    }
}

/// CREDENTIALS VALIDATION
fn validate_credentials(credentials: &Credentials, errors: &mut Vec<String>) {
    if credentials.username.trim().is_empty() {
        errors.push("credentials.username must not be empty".to_string());
    }
    if credentials.password.is_empty() {
        errors.push("credentials.password must not be empty".to_string());
    }
}

/// ENDPOINTS VALIDATION
fn validate_endpoints(endpoints: &EndpointsConfig, errors: &mut Vec<String>) {
    for (name, url) in endpoints.named() {
        match Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {
                if parsed.query().is_some() && name == "subscriptions" {
                    errors.push(format!(
                        "endpoints.{}: '{}' must not carry a query string, apiId is appended per request",
                        name, url
                    ));
                }
            }
            Ok(parsed) => errors.push(format!(
                "endpoints.{}: unsupported scheme '{}' in '{}'",
                name,
                parsed.scheme(),
                url
            )),
            Err(e) => errors.push(format!("endpoints.{}: invalid url '{}': {}", name, url, e)),
        }
    }
}

fn validate_registration(registration: &RegistrationConfig, errors: &mut Vec<String>) {
    if registration.client_name.trim().is_empty() {
        errors.push("registration.client_name must not be empty".to_string());
    }
    if registration.grant_types.split_whitespace().next().is_none() {
        errors.push("registration.grant_types must list at least one grant type".to_string());
    }
}

/// SCOPES VALIDATION
fn validate_scopes(scopes: &[String], errors: &mut Vec<String>) {
    if scopes.is_empty() {
        errors.push("scopes: at least one scope required".to_string());
    }
    for (idx, scope) in scopes.iter().enumerate() {
        if scope.is_empty() || scope.chars().any(char::is_whitespace) {
            errors.push(format!(
                "scopes[{}]: '{}' must be non-empty and contain no whitespace",
                idx, scope
            ));
        }
    }
}
