//! Qdrant REST client
//!
//! Talks to a single collection over plain HTTP. Any non-success status is a
//! hard failure; error bodies are not interpreted.

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{EmbeddingError, Result, StoreConfig};
use crate::storage::{VectorStore, SEARCH_TOP_K};

/// Qdrant "point" object suitable for upsert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QdrantPoint {
    pub id: String,
    pub vector: Vec<f32>,
    pub payload: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QdrantUpsert {
    pub points: Vec<QdrantPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QdrantSearch {
    pub vector: Vec<f32>,
    pub top: usize,
    pub with_payload: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QdrantDelete {
    pub points: Vec<String>,
}

pub struct QdrantStore {
    client: Client,
    base_url: String,
    collection: String,
}

impl QdrantStore {
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let client = Client::builder().build().map_err(|e| {
            EmbeddingError::ConfigError(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: &StoreConfig) -> Self {
        Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            collection: config.collection.clone(),
        }
    }

    fn points_url(&self, suffix: &str) -> String {
        format!(
            "{}/collections/{}/points{}",
            self.base_url, self.collection, suffix
        )
    }

    async fn send<B: Serialize + ?Sized>(&self, method: Method, url: String, body: &B) -> Result<Value> {
        tracing::debug!(%method, %url, "calling vector store");

        let response = self
            .client
            .request(method, &url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(%url, error = %e, "vector store unreachable");
                EmbeddingError::StoreError(format!("Qdrant request failed: {}", e.without_url()))
            })?;

        // The URL stays in the logs; only the status reaches the caller.
        let status = response.status();
        if !status.is_success() {
            tracing::error!(%url, %status, "vector store returned an error status");
            return Err(EmbeddingError::StoreError(format!("Qdrant returned {}", status)));
        }

        response
            .json()
            .await
            .map_err(|e| {
                EmbeddingError::StoreError(format!(
                    "Failed to parse Qdrant response: {}",
                    e.without_url()
                ))
            })
    }
}

#[async_trait]
impl VectorStore for QdrantStore {
    async fn upsert(&self, id: &str, vector: Vec<f32>, payload: Value) -> Result<Value> {
        let body = QdrantUpsert {
            points: vec![QdrantPoint {
                id: id.to_string(),
                vector,
                payload,
            }],
        };

        self.send(Method::PUT, self.points_url(""), &body).await
    }

    async fn search(&self, vector: Vec<f32>) -> Result<Value> {
        let body = QdrantSearch {
            vector,
            top: SEARCH_TOP_K,
            with_payload: true,
        };

        self.send(Method::POST, self.points_url("/search"), &body).await
    }

    async fn delete(&self, id: &str) -> Result<Value> {
        let body = QdrantDelete {
            points: vec![id.to_string()],
        };

        self.send(Method::POST, self.points_url("/delete"), &body).await
    }
}
