//! Vector store access

pub mod qdrant;


pub use qdrant::{QdrantDelete, QdrantPoint, QdrantSearch, QdrantStore, QdrantUpsert};

use crate::core::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Number of neighbours every similarity search asks for.
pub const SEARCH_TOP_K: usize = 5;

/// Point-level operations on a single collection. Acknowledgements are returned
/// as the store's raw JSON.
#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn upsert(&self, id: &str, vector: Vec<f32>, payload: Value) -> Result<Value>;
    async fn search(&self, vector: Vec<f32>) -> Result<Value>;
    async fn delete(&self, id: &str) -> Result<Value>;
}
