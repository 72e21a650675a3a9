//! # APIM Automation Library
//!
//! Automates the admin side of an API-management platform: registers an
//! OAuth2 client, obtains a password-grant token, and aggregates APIs, their
//! subscriptions and throttling policies into one response.
//!
//! Modules:
//! - `config` — service configuration, loading and validation
//! - `cache` — access token holder
//! - `sources` — outbound calls to the platform endpoints
//! - `workflows` — authorize and aggregate operations
//! - `resilience` — bounded fan-out
//! - `server` — axum routes and error responses

pub mod cache;
pub mod config;
pub mod error;
pub mod helpers;
pub mod observability;
pub mod resilience;
pub mod server;
pub mod sources;
#[cfg(test)]
pub mod tests;
pub mod utils;
pub mod workflows;

pub use crate::config::platform::ServiceConfig;
pub use crate::error::AutomationError;
