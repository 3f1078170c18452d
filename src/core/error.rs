//! Error types for the embedding API

use serde_json::json;
use thiserror::Error;

use crate::api::ResponseEnvelope;

#[derive(Error, Debug)]
pub enum EmbeddingError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Route not found")]
    RouteNotFound,

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Failed to generate embedding: {0}")]
    GenerationError(String),

    #[error("Vector store error: {0}")]
    StoreError(String),

    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl EmbeddingError {
    /// HTTP status the error renders with at the request boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            EmbeddingError::InvalidInput(_) => 400,
            EmbeddingError::RouteNotFound => 404,
            _ => 500,
        }
    }

    pub fn into_envelope(self) -> ResponseEnvelope {
        ResponseEnvelope::json(self.status_code(), &json!({ "error": self.to_string() }))
    }
}

pub type Result<T> = std::result::Result<T, EmbeddingError>;
