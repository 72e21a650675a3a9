use serde_json::Value;

use crate::error::AutomationError;
use crate::sources::response::{send_json, take_list};
use crate::sources::{ApimClient, ENDPOINT_APIS, ENDPOINT_SUBSCRIPTIONS, ENDPOINT_THROTTLING_POLICIES};

impl ApimClient {
    /// `list` of the API collection, `None` when the body carries no array.
    pub async fn list_apis(&self, token: &str) -> Result<Option<Vec<Value>>, AutomationError> {
        let request = self.client.get(&self.config().endpoints.apis).bearer_auth(token);
        let body = send_json(ENDPOINT_APIS, request).await?;

        Ok(match take_list(body) {
            Some(Value::Array(apis)) => Some(apis),
            _ => None,
        })
    }

    /// Subscriptions of one API. A body without `list` counts as no subscriptions.
    pub async fn list_subscriptions(&self, token: &str, api_id: &str) -> Result<Vec<Value>, AutomationError> {
        let request = self
            .client
            .get(&self.config().endpoints.subscriptions)
            .query(&[("apiId", api_id)])
            .bearer_auth(token);
        let body = send_json(ENDPOINT_SUBSCRIPTIONS, request).await?;

        match take_list(body) {
            Some(Value::Array(subscriptions)) => Ok(subscriptions),
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(other) => Err(AutomationError::MalformedResponse {
                endpoint: ENDPOINT_SUBSCRIPTIONS,
                reason: format!("expected 'list' to be an array, got {}", other),
            }),
        }
    }

    /// Throttling policies, passed through as returned.
    pub async fn list_throttling_policies(&self, token: &str) -> Result<Option<Value>, AutomationError> {
        let request = self
            .client
            .get(&self.config().endpoints.throttling_policies)
            .bearer_auth(token);
        let body = send_json(ENDPOINT_THROTTLING_POLICIES, request).await?;
        Ok(take_list(body))
    }
}
