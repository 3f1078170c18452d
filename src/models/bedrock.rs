//! AWS Bedrock embeddings model integration
//!
//! Calls `InvokeModel` on the Bedrock runtime with a Titan-style request body
//! (`{"inputText": ...}`) and reads the `embedding` field of the response.
//! Credentials come from the default AWS provider chain.

use crate::core::{EmbeddingError, ModelConfig, Result};
use async_trait::async_trait;
use aws_sdk_bedrockruntime::error::DisplayErrorContext;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TitanEmbeddingRequest<'a> {
    input_text: &'a str,
}

#[derive(Debug, Deserialize)]
struct TitanEmbeddingResponse {
    embedding: Option<Vec<f32>>,
}

pub struct BedrockModel {
    model_id: String,
    client: Client,
}

impl BedrockModel {
    pub fn new(client: Client, model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            client,
        }
    }

    /// Loads the AWS SDK config for the configured region.
    pub async fn from_config(config: &ModelConfig) -> Self {
        let sdk_config = aws_config::from_env()
            .region(aws_config::Region::new(config.region.clone()))
            .load()
            .await;

        Self::new(Client::new(&sdk_config), config.model_id.clone())
    }
}

fn request_body(text: &str) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&TitanEmbeddingRequest { input_text: text })?)
}

fn parse_response(bytes: &[u8]) -> Result<Vec<f32>> {
    let response: TitanEmbeddingResponse = serde_json::from_slice(bytes).map_err(|e| {
        EmbeddingError::GenerationError(format!("Failed to parse Bedrock response: {}", e))
    })?;

    response.embedding.ok_or_else(|| {
        EmbeddingError::GenerationError("Bedrock response has no 'embedding' field".to_string())
    })
}

#[async_trait]
impl crate::models::EmbeddingModel for BedrockModel {
    fn name(&self) -> &str {
        &self.model_id
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        tracing::debug!(model = %self.model_id, chars = text.len(), "invoking Bedrock model");

        let output = self
            .client
            .invoke_model()
            .model_id(&self.model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(request_body(text)?))
            .send()
            .await
            .map_err(|e| {
                EmbeddingError::GenerationError(format!(
                    "Bedrock request failed: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        parse_response(output.body().as_ref())
    }
}
