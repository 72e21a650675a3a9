use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::error::AutomationError;

/// `{ "error": ... }` body returned on every failure.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: Value,
}

pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, error: Value) -> Self {
        Self {
            status,
            body: ErrorBody { error },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<AutomationError> for ApiError {
    fn from(err: AutomationError) -> Self {
        let status = match &err {
            AutomationError::MissingToken => StatusCode::BAD_REQUEST,
            AutomationError::NoApis => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiError::new(status, err.caller_detail())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::from(AutomationError::MissingToken).status, StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::from(AutomationError::NoApis).status, StatusCode::NOT_FOUND);

        let upstream = ApiError::from(AutomationError::Upstream {
            endpoint: "apis",
            status: 401,
            body: Some(json!({"code": 900901, "message": "Invalid Credentials"})),
        });
        assert_eq!(upstream.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(upstream.body.error["code"], 900901);
    }
}
