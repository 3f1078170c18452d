//! Embedding API Library
//!
//! Routes HTTP-shaped events onto create, update, search and delete operations
//! over a Qdrant collection, embedding document text with AWS Bedrock.

pub mod api;
pub mod core;
pub mod models;
pub mod storage;

use std::sync::Arc;
use crate::api::{EventHandler, RequestRouter};
use crate::core::{Config, Result, VectorOperationExecutor};
use crate::models::{BedrockModel, EmbeddingModel};
use crate::storage::{QdrantStore, VectorStore};

// Application state for Axum
#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<EventHandler>,
}

pub struct EmbeddingApiService {
    pub config: Config,
    pub handler: Arc<EventHandler>,
}

impl EmbeddingApiService {
    pub async fn new(config: Config) -> Result<Self> {
        let model = Arc::new(BedrockModel::from_config(&config.model).await);
        let store = Arc::new(QdrantStore::new(&config.store)?);

        Ok(Self::with_backends(config, model, store))
    }

    pub fn with_backends(
        config: Config,
        model: Arc<dyn EmbeddingModel>,
        store: Arc<dyn VectorStore>,
    ) -> Self {
        let router = RequestRouter::new(config.routing.surface);
        let executor = VectorOperationExecutor::new(model, store, &config.routing);

        Self {
            config,
            handler: Arc::new(EventHandler::new(router, executor)),
        }
    }

    pub fn app_state(self) -> AppState {
        AppState {
            handler: self.handler,
        }
    }
}
