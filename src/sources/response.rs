use reqwest::RequestBuilder;
use serde_json::Value;
use tracing::debug;

use crate::error::AutomationError;
use crate::helpers::time::get_instant;
use crate::observability::metrics::get_metrics;

/// Send the request and decode a 2xx JSON body.
///
/// Non-2xx responses become [`AutomationError::Upstream`] carrying the body
/// (JSON when it parses, raw text otherwise).
pub async fn send_json(endpoint: &'static str, request: RequestBuilder) -> Result<Value, AutomationError> {
    let metrics = get_metrics().await;
    let start = get_instant();
    metrics.upstream_requests.with_label_values(&[endpoint]).inc();

    let result = read_json(endpoint, request).await;

    metrics
        .upstream_duration
        .with_label_values(&[endpoint])
        .observe(start.elapsed().as_secs_f64());
    if let Err(e) = &result {
        metrics
            .upstream_failures
            .with_label_values(&[endpoint, e.reason()])
            .inc();
    }
    result
}

async fn read_json(endpoint: &'static str, request: RequestBuilder) -> Result<Value, AutomationError> {
    let response = request
        .send()
        .await
        .map_err(|source| AutomationError::Transport { endpoint, source })?;

    let status = response.status();
    debug!("{} responded with {}", endpoint, status);
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(AutomationError::Upstream {
            endpoint,
            status: status.as_u16(),
            body: upstream_body(text),
        });
    }

    response
        .json::<Value>()
        .await
        .map_err(|source| AutomationError::Transport { endpoint, source })
}

fn upstream_body(text: String) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(&text).unwrap_or(Value::String(text)))
}

/// Take the `list` member of a list-shaped body.
pub fn take_list(body: Value) -> Option<Value> {
    match body {
        Value::Object(mut map) => map.remove("list"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn upstream_body_prefers_json() {
        assert_eq!(upstream_body("{\"code\":900901}".to_owned()), Some(json!({"code": 900901})));
        assert_eq!(upstream_body("Bad Gateway".to_owned()), Some(json!("Bad Gateway")));
        assert_eq!(upstream_body("  ".to_owned()), None);
    }

    #[test]
    fn take_list_reads_list_member() {
        assert_eq!(take_list(json!({"count": 1, "list": [{"id": "a"}]})), Some(json!([{"id": "a"}])));
        assert_eq!(take_list(json!({"count": 0})), None);
        assert_eq!(take_list(json!([1, 2])), None);
    }
}
