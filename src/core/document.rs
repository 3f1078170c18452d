//! Documents as they arrive in request bodies

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::{EmbeddingError, Result};

/// Field holding a document's identity. Never part of the embedded text.
pub const ID_FIELD: &str = "id";

/// Separator placed between field values when building the embedding input.
pub const FIELD_SEPARATOR: &str = ". ";

/// A flat JSON object keyed by field name, in the order the fields were sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Decodes a request body. A missing body is an empty document; anything that
    /// is not a JSON object is malformed.
    pub fn from_body(body: Option<&str>) -> Result<Self> {
        match body {
            None => Ok(Self::default()),
            Some(raw) => serde_json::from_str(raw).map_err(|e| EmbeddingError::MalformedBody(e.to_string())),
        }
    }

    /// The document's own id, if it carries a usable one.
    pub fn id(&self) -> Option<String> {
        match self.0.get(ID_FIELD)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn set_id(&mut self, id: &str) {
        self.0.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    }

    /// A string field, if present and non-blank.
    pub fn text_field(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    /// Every value except `id`, stringified and joined with `". "` in field order.
    pub fn combined_text(&self) -> String {
        self.0
            .iter()
            .filter(|(key, _)| key.as_str() != ID_FIELD)
            .map(|(_, value)| match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(FIELD_SEPARATOR)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}
