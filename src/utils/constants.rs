//! Shared constants and invariants

pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 2000;
pub const DEFAULT_FAN_OUT_CONCURRENCY: usize = 8;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_METRICS_PATH: &str = "/metrics";

// Service routes
pub const ROUTE_AUTOMATE: &str = "/automate";
pub const ROUTE_FETCH_DATA: &str = "/fetch-data";
pub const ROUTE_HEALTH: &str = "/health";

// Client registration defaults
pub const DEFAULT_CLIENT_NAME: &str = "rest_api_publisher";
pub const DEFAULT_CALLBACK_URL: &str = "www.google.lk";
pub const DEFAULT_GRANT_TYPES: &str = "client_credentials password refresh_token";

pub const PASSWORD_GRANT: &str = "password";

/// Scopes requested by the password grant. The provider checks membership,
/// keep the list verbatim.
pub const DEFAULT_SCOPES: &[&str] = &[
    "apim:api_view",
    "apim:api_create",
    "apim:api_manage",
    "apim:api_delete",
    "apim:api_publish",
    "apim:subscription_view",
    "apim:subscription_block",
    "apim:subscription_manage",
    "apim:external_services_discover",
    "apim:threat_protection_policy_create",
    "apim:threat_protection_policy_manage",
    "apim:document_create",
    "apim:document_manage",
    "apim:mediation_policy_view",
    "apim:mediation_policy_create",
    "apim:mediation_policy_manage",
    "apim:client_certificates_view",
    "apim:client_certificates_add",
    "apim:client_certificates_update",
    "apim:ep_certificates_view",
    "apim:ep_certificates_add",
    "apim:ep_certificates_update",
    "apim:publisher_settings",
    "apim:pub_alert_manage",
    "apim:shared_scope_manage",
    "apim:app_import_export",
    "apim:api_import_export",
    "apim:api_product_import_export",
    "apim:api_generate_key",
    "apim:common_operation_policy_view",
    "apim:common_operation_policy_manage",
    "apim:comment_write",
    "apim:comment_view",
    "apim:admin",
    "apim:subscription_approval_view",
    "apim:subscription_approval_manage",
    "apim:llm_provider_read",
];

// Response messages
pub const MSG_AUTHORIZED: &str = "Authorization successful";
pub const MSG_DATA_FETCHED: &str = "Data fetched successfully";
pub const MSG_TOKEN_REQUIRED: &str = "Access token is required. Please run /automate first.";
pub const MSG_NO_APIS: &str = "No APIs found";
pub const MSG_INTERNAL: &str = "Internal Server Error";
pub const MSG_SUBSCRIPTIONS_FAILED: &str = "Error fetching subscriptions";
