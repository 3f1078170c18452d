//! Configuration for the embedding API

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

use crate::core::{EmbeddingError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub model: ModelConfig,
    pub routing: RoutingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub url: String,
    pub collection: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub model_id: String,
    pub region: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    pub surface: RouteSurface,
    pub payload: PayloadMode,
    pub request_timeout: Duration,
}

/// Which set of routes the router answers. The two surfaces are never active together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteSurface {
    /// `GET|POST /embedding-api`, `PUT|DELETE /embedding-api/{id}`
    Collection,
    /// `POST /embedding-api/{upload,search,delete}`
    Action,
}

/// What gets stored as the point payload on upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadMode {
    /// The full document, `id` included.
    Document,
    /// An empty object.
    Empty,
}

impl FromStr for RouteSurface {
    type Err = EmbeddingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "collection" => Ok(RouteSurface::Collection),
            "action" => Ok(RouteSurface::Action),
            other => Err(EmbeddingError::ConfigError(format!(
                "unknown route surface '{}', expected 'collection' or 'action'",
                other
            ))),
        }
    }
}

impl FromStr for PayloadMode {
    type Err = EmbeddingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "document" => Ok(PayloadMode::Document),
            "empty" => Ok(PayloadMode::Empty),
            other => Err(EmbeddingError::ConfigError(format!(
                "unknown payload mode '{}', expected 'document' or 'empty'",
                other
            ))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            store: StoreConfig {
                url: String::new(),
                collection: "houses".to_string(),
            },
            model: ModelConfig {
                model_id: "amazon.titan-embed-text-v2:0".to_string(),
                region: "eu-west-2".to_string(),
            },
            routing: RoutingConfig {
                surface: RouteSurface::Collection,
                payload: PayloadMode::Document,
                request_timeout: Duration::from_secs(30),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. `QDRANT_URL` is required.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("EMBEDDING_API_HOST") {
            config.server.host = host;
        }
        if let Some(port) = lookup("EMBEDDING_API_PORT") {
            config.server.port = port.parse().map_err(|_| {
                EmbeddingError::ConfigError(format!("invalid EMBEDDING_API_PORT '{}'", port))
            })?;
        }

        config.store.url = lookup("QDRANT_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| EmbeddingError::ConfigError("QDRANT_URL not set".to_string()))?;
        if let Some(collection) = lookup("QDRANT_COLLECTION") {
            config.store.collection = collection;
        }

        if let Some(model_id) = lookup("BEDROCK_EMBED_MODEL_ID") {
            config.model.model_id = model_id;
        }
        if let Some(region) = lookup("AWS_REGION") {
            config.model.region = region;
        }

        if let Some(surface) = lookup("ROUTE_SURFACE") {
            config.routing.surface = surface.parse()?;
        }
        if let Some(payload) = lookup("PAYLOAD_MODE") {
            config.routing.payload = payload.parse()?;
        }
        if let Some(secs) = lookup("REQUEST_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    EmbeddingError::ConfigError(format!("invalid REQUEST_TIMEOUT_SECS '{}'", secs))
                })?;
            config.routing.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
