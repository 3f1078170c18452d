//! Executes routed operations against the embedding model and the vector store

use serde_json::{json, Map, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::core::{Document, EmbeddingError, PayloadMode, Result, RoutingConfig};
use crate::models::EmbeddingModel;
use crate::storage::VectorStore;

/// One logical operation selected by the router.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Create { id: String, document: Document },
    Update { id: String, document: Document },
    Search { query: String },
    Delete { id: String },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Create { .. } => "create",
            Operation::Update { .. } => "update",
            Operation::Search { .. } => "search",
            Operation::Delete { .. } => "delete",
        }
    }
}

/// Runs each operation with exactly one embedding call (create, update, search)
/// followed by exactly one store call. Nothing is retried.
pub struct VectorOperationExecutor {
    model: Arc<dyn EmbeddingModel>,
    store: Arc<dyn VectorStore>,
    payload_mode: PayloadMode,
    timeout: Duration,
}

impl VectorOperationExecutor {
    pub fn new(
        model: Arc<dyn EmbeddingModel>,
        store: Arc<dyn VectorStore>,
        config: &RoutingConfig,
    ) -> Self {
        Self {
            model,
            store,
            payload_mode: config.payload,
            timeout: config.request_timeout,
        }
    }

    /// Runs the operation under the request timeout and returns the response body.
    pub async fn execute(&self, operation: Operation) -> Result<Value> {
        let name = operation.name();
        let started = std::time::Instant::now();

        let body = tokio::time::timeout(self.timeout, async {
            match operation {
                Operation::Create { id, document } => self.create(&id, document).await,
                Operation::Update { id, document } => self.update(&id, document).await,
                Operation::Search { query } => self.search(&query).await,
                Operation::Delete { id } => self.delete(&id).await,
            }
        })
        .await
        .map_err(|_| EmbeddingError::Timeout(self.timeout))??;

        info!(
            operation = name,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "operation completed"
        );
        Ok(body)
    }

    pub async fn create(&self, id: &str, document: Document) -> Result<Value> {
        let result = self.upsert(id, document).await?;
        Ok(json!({ "result": result, "id": id }))
    }

    pub async fn update(&self, id: &str, document: Document) -> Result<Value> {
        let result = self.upsert(id, document).await?;
        Ok(json!({ "result": result, "id": id, "updated": true }))
    }

    pub async fn search(&self, query: &str) -> Result<Value> {
        let vector = self.model.embed(query).await?;
        debug!(model = self.model.name(), dimension = vector.len(), "query embedded");

        let result = self.store.search(vector).await?;
        Ok(json!({ "result": result }))
    }

    pub async fn delete(&self, id: &str) -> Result<Value> {
        let result = self.store.delete(id).await?;
        Ok(json!({ "result": result }))
    }

    async fn upsert(&self, id: &str, mut document: Document) -> Result<Value> {
        document.set_id(id);

        let text = document.combined_text();
        let vector = self.model.embed(&text).await?;
        debug!(%id, model = self.model.name(), dimension = vector.len(), "document embedded");

        let payload = match self.payload_mode {
            PayloadMode::Document => document.into_value(),
            PayloadMode::Empty => Value::Object(Map::new()),
        };

        self.store.upsert(id, vector, payload).await
    }
}
