//! Embedding model integrations

pub mod bedrock;

pub use bedrock::BedrockModel;

use crate::core::Result;
use async_trait::async_trait;

/// A remote model that turns one piece of text into one embedding vector.
#[async_trait]
pub trait EmbeddingModel: Send + Sync {
    fn name(&self) -> &str;
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}
