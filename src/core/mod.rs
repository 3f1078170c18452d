//! Core functionality for the embedding API

pub mod config;
pub mod document;
pub mod error;
pub mod executor;

pub use config::{Config, ModelConfig, PayloadMode, RouteSurface, RoutingConfig, ServerConfig, StoreConfig};
pub use document::Document;
pub use error::{EmbeddingError, Result};
pub use executor::{Operation, VectorOperationExecutor};
