//! Embedding generation for the product index query.
//!
//! Supports the Azure OpenAI embeddings endpoint, with a deterministic
//! hash-based fallback when no API key is available (useful for testing).

use tracing::{debug, warn};
use url::Url;

use crate::error::{ProductError, Result};

/// Environment variable for the Azure OpenAI resource endpoint.
pub const AZURE_OPENAI_ENDPOINT_ENV: &str = "AZURE_OPENAI_ENDPOINT";

/// Environment variable for the Azure OpenAI API key.
pub const AZURE_OPENAI_API_KEY_ENV: &str = "AZURE_OPENAI_API_KEY";

/// Environment variable for the embeddings deployment name.
pub const AZURE_OPENAI_EMBEDDING_DEPLOYMENT_ENV: &str = "AZURE_OPENAI_EMBEDDING_DEPLOYMENT";

/// Environment variable for the Azure OpenAI API version.
pub const AZURE_OPENAI_API_VERSION_ENV: &str = "AZURE_OPENAI_API_VERSION";

/// API version used when the environment does not specify one.
const DEFAULT_API_VERSION: &str = "2024-02-15-preview";

/// Default embedding dimension.
pub const DEFAULT_EMBEDDING_DIM: usize = 1536;

/// Embedding provider configuration.
#[derive(Debug, Clone)]
pub enum EmbeddingProvider {
    /// Use the Azure OpenAI embeddings endpoint.
    AzureOpenAI {
        endpoint: String,
        api_key: String,
        deployment: String,
        api_version: String,
    },
    /// Use hash-based fake embeddings (for testing only).
    HashBased { dimension: usize },
}

impl EmbeddingProvider {
    /// Create a provider from environment variables, falling back to
    /// hash-based embeddings when the endpoint or key is missing.
    pub fn from_env() -> Self {
        let endpoint = std::env::var(AZURE_OPENAI_ENDPOINT_ENV);
        let api_key = std::env::var(AZURE_OPENAI_API_KEY_ENV);
        let deployment = std::env::var(AZURE_OPENAI_EMBEDDING_DEPLOYMENT_ENV);

        match (endpoint, api_key, deployment) {
            (Ok(endpoint), Ok(api_key), Ok(deployment)) => {
                debug!("Using Azure OpenAI embedding provider");
                Self::AzureOpenAI {
                    endpoint,
                    api_key,
                    deployment,
                    api_version: std::env::var(AZURE_OPENAI_API_VERSION_ENV)
                        .unwrap_or_else(|_| DEFAULT_API_VERSION.to_string()),
                }
            }
            _ => {
                warn!("No embedding configuration found, using hash-based fallback");
                Self::HashBased {
                    dimension: DEFAULT_EMBEDDING_DIM,
                }
            }
        }
    }

    /// Check if this provider uses real embeddings (API-based).
    pub fn is_real(&self) -> bool {
        !matches!(self, Self::HashBased { .. })
    }
}

/// Generates embeddings for request text.
#[derive(Clone)]
pub struct EmbeddingClient {
    provider: EmbeddingProvider,
    client: reqwest::Client,
}

impl EmbeddingClient {
    /// Create a new embedding client with the given provider.
    pub fn new(provider: EmbeddingProvider) -> Self {
        Self {
            provider,
            client: reqwest::Client::new(),
        }
    }

    /// Create a client from environment variables.
    pub fn from_env() -> Self {
        Self::new(EmbeddingProvider::from_env())
    }

    /// Check if using real embeddings (not hash-based).
    pub fn is_real(&self) -> bool {
        self.provider.is_real()
    }

    /// Generate an embedding for the given text.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        match &self.provider {
            EmbeddingProvider::AzureOpenAI {
                endpoint,
                api_key,
                deployment,
                api_version,
            } => {
                self.embed_azure(text, endpoint, api_key, deployment, api_version)
                    .await
            }
            EmbeddingProvider::HashBased { dimension } => {
                Ok(hash_based_embedding(text, *dimension))
            }
        }
    }

    async fn embed_azure(
        &self,
        text: &str,
        endpoint: &str,
        api_key: &str,
        deployment: &str,
        api_version: &str,
    ) -> Result<Vec<f32>> {
        let mut raw = endpoint.to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base = Url::parse(&raw)
            .map_err(|e| ProductError::Configuration(format!("invalid endpoint: {}", e)))?;
        let mut url = base
            .join(&format!("openai/deployments/{}/embeddings", deployment))
            .map_err(|e| ProductError::Configuration(format!("invalid deployment path: {}", e)))?;
        url.query_pairs_mut().append_pair("api-version", api_version);

        let response = self
            .client
            .post(url)
            .header("api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&serde_json::json!({ "input": text }))
            .send()
            .await
            .map_err(|e| ProductError::Embedding(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ProductError::Embedding(format!(
                "Azure OpenAI API error {}: {}",
                status, text
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ProductError::Embedding(e.to_string()))?;

        parse_embedding_response(&json)
    }
}

fn parse_embedding_response(json: &serde_json::Value) -> Result<Vec<f32>> {
    let embedding = json["data"][0]["embedding"]
        .as_array()
        .ok_or_else(|| ProductError::Embedding("invalid response format".to_string()))?;

    embedding
        .iter()
        .map(|v| {
            v.as_f64()
                .map(|f| f as f32)
                .ok_or_else(|| ProductError::Embedding("invalid embedding value".to_string()))
        })
        .collect()
}

/// Generate a hash-based fake embedding for testing.
///
/// Deterministic for a given input; normalized to a unit vector. NOT
/// suitable for production retrieval quality.
fn hash_based_embedding(text: &str, dimension: usize) -> Vec<f32> {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut embedding = Vec::with_capacity(dimension);

    for i in 0..dimension {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        i.hash(&mut hasher);
        let hash = hasher.finish();

        let value = ((hash as f64 / u64::MAX as f64) * 2.0 - 1.0) as f32;
        embedding.push(value);
    }

    let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
    if magnitude > 0.0 {
        for x in &mut embedding {
            *x /= magnitude;
        }
    }

    embedding
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_based_embedding_deterministic() {
        let e1 = hash_based_embedding("camping stove", 16);
        let e2 = hash_based_embedding("camping stove", 16);
        assert_eq!(e1, e2);
    }

    #[test]
    fn test_hash_based_embedding_different_texts() {
        let e1 = hash_based_embedding("tents", 16);
        let e2 = hash_based_embedding("backpacks", 16);
        assert_ne!(e1, e2);
    }

    #[test]
    fn test_hash_based_embedding_normalized() {
        let embedding = hash_based_embedding("daypack", 128);
        let magnitude: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((magnitude - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_parse_embedding_response() {
        let json = serde_json::json!({
            "data": [{"embedding": [0.1, 0.2, 0.3]}]
        });
        let embedding = parse_embedding_response(&json).unwrap();
        assert_eq!(embedding.len(), 3);
    }

    #[test]
    fn test_parse_embedding_response_invalid() {
        let json = serde_json::json!({"data": []});
        assert!(parse_embedding_response(&json).is_err());
    }

    #[tokio::test]
    async fn test_hash_based_embed() {
        let client = EmbeddingClient::new(EmbeddingProvider::HashBased { dimension: 64 });
        assert!(!client.is_real());
        let embedding = client.embed("test content").await.unwrap();
        assert_eq!(embedding.len(), 64);
    }
}
