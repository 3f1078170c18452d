//! Inbound events and the response envelope

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// An HTTP-shaped event in the API Gateway proxy format. Absent or null fields
/// fall back to their defaults through the accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundRequest {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
}

impl InboundRequest {
    pub fn new(path: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            http_method: Some(method.into()),
            ..Self::default()
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_string_parameters
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn path(&self) -> &str {
        self.path.as_deref().unwrap_or("/")
    }

    /// Upper-cased HTTP method, `GET` when absent.
    pub fn method(&self) -> String {
        self.http_method
            .as_deref()
            .unwrap_or("GET")
            .to_ascii_uppercase()
    }

    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get(key))
            .map(String::as_str)
    }
}

/// Invocation-scoped data supplied by whatever delivered the event.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    pub request_id: String,
}

impl InvocationContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }
}

/// `{statusCode, body}` where `body` is a JSON document encoded as a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub body: String,
}

impl ResponseEnvelope {
    pub fn json(status_code: u16, body: &Value) -> Self {
        Self {
            status_code,
            body: body.to_string(),
        }
    }

    pub fn body_json(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_defaults() {
        let event: InboundRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(event.path(), "/");
        assert_eq!(event.method(), "GET");
        assert_eq!(event.query_param("query"), None);
        assert_eq!(event.body, None);

        let event: InboundRequest = serde_json::from_value(json!({
            "path": null,
            "httpMethod": null,
            "queryStringParameters": null,
            "body": null
        }))
        .unwrap();
        assert_eq!(event.path(), "/");
        assert_eq!(event.method(), "GET");
    }

    #[test]
    fn test_event_decoding() {
        let event: InboundRequest = serde_json::from_value(json!({
            "path": "/embedding-api",
            "httpMethod": "get",
            "queryStringParameters": {"query": "garden flat"},
            "headers": {"Host": "example.com"},
            "requestContext": {"stage": "prod"}
        }))
        .unwrap();
        assert_eq!(event.path(), "/embedding-api");
        assert_eq!(event.method(), "GET");
        assert_eq!(event.query_param("query"), Some("garden flat"));
    }

    #[test]
    fn test_envelope_serialization() {
        let envelope = ResponseEnvelope::json(201, &json!({"id": "doc1"}));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, json!({"statusCode": 201, "body": "{\"id\":\"doc1\"}"}));
        assert_eq!(envelope.body_json().unwrap()["id"], "doc1");
    }
}
