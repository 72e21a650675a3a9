use serde_json::Value;
use thiserror::Error;

use crate::utils::constants::{MSG_INTERNAL, MSG_NO_APIS, MSG_TOKEN_REQUIRED};

/// Failures of the authorize and aggregate workflows.
#[derive(Debug, Error)]
pub enum AutomationError {
    #[error("{}", MSG_TOKEN_REQUIRED)]
    MissingToken,

    #[error("{}", MSG_NO_APIS)]
    NoApis,

    /// Non-2xx response from an upstream endpoint.
    #[error("{endpoint} responded with {status}")]
    Upstream {
        endpoint: &'static str,
        status: u16,
        body: Option<Value>,
    },

    /// Network failure, timeout or undecodable body.
    #[error("{endpoint} request failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// 2xx response missing a field the workflow depends on.
    #[error("{endpoint} returned a malformed response: {reason}")]
    MalformedResponse {
        endpoint: &'static str,
        reason: String,
    },
}

impl AutomationError {
    /// Body of a non-2xx upstream response, if it had one.
    pub fn upstream_body(&self) -> Option<&Value> {
        match self {
            AutomationError::Upstream { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Value reported to the caller under `error`: the upstream body when there
    /// is one, otherwise a generic marker.
    pub fn caller_detail(&self) -> Value {
        match self {
            AutomationError::MissingToken | AutomationError::NoApis => {
                Value::String(self.to_string())
            }
            _ => self
                .upstream_body()
                .cloned()
                .unwrap_or_else(|| Value::String(MSG_INTERNAL.to_owned())),
        }
    }

    /// Short label used for the failure metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            AutomationError::MissingToken => "missing_token",
            AutomationError::NoApis => "no_apis",
            AutomationError::Upstream { .. } => "status",
            AutomationError::Transport { source, .. } if source.is_timeout() => "timeout",
            AutomationError::Transport { .. } => "transport",
            AutomationError::MalformedResponse { .. } => "malformed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn upstream_body_is_passed_through() {
        let err = AutomationError::Upstream {
            endpoint: "token",
            status: 401,
            body: Some(json!({"error": "invalid_client"})),
        };
        assert_eq!(err.caller_detail(), json!({"error": "invalid_client"}));
    }

    #[test]
    fn missing_body_falls_back_to_generic_message() {
        let err = AutomationError::Upstream {
            endpoint: "token",
            status: 502,
            body: None,
        };
        assert_eq!(err.caller_detail(), json!("Internal Server Error"));

        let err = AutomationError::MalformedResponse {
            endpoint: "token",
            reason: "missing access_token".to_owned(),
        };
        assert_eq!(err.caller_detail(), json!("Internal Server Error"));
    }

    #[test]
    fn precondition_messages() {
        assert_eq!(
            AutomationError::MissingToken.caller_detail(),
            json!("Access token is required. Please run /automate first.")
        );
        assert_eq!(AutomationError::NoApis.caller_detail(), json!("No APIs found"));
    }
}
