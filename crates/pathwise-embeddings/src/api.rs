//! API-based query encoding through an OpenAI-compatible `/embeddings`
//! endpoint, typically a self-hosted sentence-transformers server serving
//! the model the catalog was embedded with.
//!
//! Requires the `api` feature.

use crate::{l2_normalized, Embedder, EmbeddingError, EmbeddingResult};
use serde::{Deserialize, Serialize};

/// Configuration for API-based embeddings.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Full URL of the embeddings endpoint.
    pub endpoint: String,
    /// Bearer token, if the endpoint requires one.
    pub api_key: Option<String>,
    /// Model name sent with each request.
    pub model: String,
    /// Expected embedding dimension.
    pub dimension: usize,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Config for an OpenAI-compatible endpoint.
    pub fn custom(endpoint: &str, model: &str, dimension: usize) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            api_key: None,
            model: model.to_string(),
            dimension,
            timeout_secs: 30,
        }
    }

    /// Set the bearer token.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// Blocking API embedder.
///
/// Callers on an async runtime must invoke it from a blocking context
/// (`tokio::task::spawn_blocking`).
///
/// ```rust,ignore
/// use pathwise_embeddings::{ApiConfig, ApiEmbedder, Embedder};
///
/// let config = ApiConfig::custom("http://localhost:8080/v1/embeddings", "all-mpnet-base-v2", 768);
/// let embedder = ApiEmbedder::new(config)?;
/// let vec = embedder.embed("Decision Trees tutorial")?;
/// ```
pub struct ApiEmbedder {
    config: ApiConfig,
    client: reqwest::blocking::Client,
}

impl ApiEmbedder {
    /// Create a new API embedder with the given config.
    pub fn new(config: ApiConfig) -> EmbeddingResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EmbeddingError::ApiError(e.to_string()))?;

        Ok(Self { config, client })
    }
}

impl Embedder for ApiEmbedder {
    fn embed(&self, text: &str) -> EmbeddingResult<Vec<f32>> {
        self.embed_batch(&[text])?
            .into_iter()
            .next()
            .ok_or_else(|| EmbeddingError::ApiError("No embedding returned".to_string()))
    }

    fn embed_batch(&self, texts: &[&str]) -> EmbeddingResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let request = EmbeddingRequest {
            model: &self.config.model,
            input: texts.iter().map(|s| s.to_string()).collect(),
        };

        let mut builder = self
            .client
            .post(&self.config.endpoint)
            .header("Content-Type", "application/json")
            .json(&request);
        if let Some(ref key) = self.config.api_key {
            builder = builder.header("Authorization", format!("Bearer {}", key));
        }

        let response = builder
            .send()
            .map_err(|e| EmbeddingError::ApiError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(EmbeddingError::ApiError(format!(
                "embeddings endpoint returned {}: {}",
                status, body
            )));
        }

        let resp: EmbeddingResponse = response
            .json()
            .map_err(|e| EmbeddingError::ApiError(e.to_string()))?;

        resp.data
            .into_iter()
            .map(|d| {
                if d.embedding.len() != self.config.dimension {
                    return Err(EmbeddingError::DimensionMismatch {
                        expected: self.config.dimension,
                        got: d.embedding.len(),
                    });
                }
                Ok(l2_normalized(d.embedding))
            })
            .collect()
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builders() {
        let config = ApiConfig::custom("http://localhost:8080/v1/embeddings", "all-mpnet-base-v2", 768);
        assert!(config.api_key.is_none());
        assert_eq!(config.dimension, 768);
        assert_eq!(config.timeout_secs, 30);

        let config = config.with_api_key(Some("test-key".to_string()));
        assert_eq!(config.api_key.as_deref(), Some("test-key"));
    }
}
