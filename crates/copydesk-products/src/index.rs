//! Vector search index client for product documentation.
//!
//! Mirrors the shape of the hosted index: documents are retrieved with a
//! k-nearest-neighbors query over the `contentVector` field, three hits per
//! request.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use copydesk_models::ProductDocument;

use crate::embedding::EmbeddingClient;
use crate::error::{ProductError, Result};

/// Environment variable for the search service endpoint.
pub const AZURE_SEARCH_ENDPOINT_ENV: &str = "AZURE_SEARCH_ENDPOINT";

/// Environment variable for the search service API key.
pub const AZURE_SEARCH_API_ENV: &str = "AZURE_SEARCH_API";

/// Environment variable for the index name.
pub const AZURE_SEARCH_INDEX_ENV: &str = "AZURE_SEARCH_INDEX";

/// Index name used when the environment does not specify one.
pub const DEFAULT_INDEX_NAME: &str = "contoso-products";

/// Search API version.
const SEARCH_API_VERSION: &str = "2023-11-01";

/// Vector field queried for similarity.
const VECTOR_FIELD: &str = "contentVector";

/// Nearest neighbors per query, and result cap.
const K_NEAREST: u32 = 3;

/// The product-lookup collaborator contract.
///
/// Called exactly once per orchestration run; the result is cached by the
/// caller and reused across iterations.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetch the product documents most relevant to the request.
    async fn lookup(&self, request: &str) -> Result<Vec<ProductDocument>>;
}

/// Index connection settings.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// Search service endpoint.
    pub endpoint: String,

    /// Search service API key.
    pub api_key: String,

    /// Name of the product index.
    pub index_name: String,
}

impl IndexConfig {
    /// Create a configuration from the environment.
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var(AZURE_SEARCH_ENDPOINT_ENV).map_err(|_| {
            ProductError::Configuration(format!(
                "missing {} environment variable",
                AZURE_SEARCH_ENDPOINT_ENV
            ))
        })?;
        let api_key = std::env::var(AZURE_SEARCH_API_ENV).map_err(|_| {
            ProductError::Configuration(format!(
                "missing {} environment variable",
                AZURE_SEARCH_API_ENV
            ))
        })?;
        let index_name = std::env::var(AZURE_SEARCH_INDEX_ENV)
            .unwrap_or_else(|_| DEFAULT_INDEX_NAME.to_string());
        Ok(Self {
            endpoint,
            api_key,
            index_name,
        })
    }
}

/// Product source backed by an embedding client and the vector index.
pub struct VectorProductSource {
    embedding: EmbeddingClient,
    client: reqwest::Client,
    config: IndexConfig,
}

impl VectorProductSource {
    /// Create a source over the given embedding client and index settings.
    pub fn new(embedding: EmbeddingClient, config: IndexConfig) -> Self {
        Self {
            embedding,
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a source entirely from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(EmbeddingClient::from_env(), IndexConfig::from_env()?))
    }

    fn search_url(&self) -> Result<Url> {
        let mut raw = self.config.endpoint.clone();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base = Url::parse(&raw)
            .map_err(|e| ProductError::Configuration(format!("invalid search endpoint: {}", e)))?;
        let mut url = base
            .join(&format!("indexes/{}/docs/search", self.config.index_name))
            .map_err(|e| ProductError::Configuration(format!("invalid index path: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("api-version", SEARCH_API_VERSION);
        Ok(url)
    }
}

#[async_trait]
impl ProductSource for VectorProductSource {
    async fn lookup(&self, request: &str) -> Result<Vec<ProductDocument>> {
        let vector = self.embedding.embed(request).await?;
        debug!(dim = vector.len(), "querying product index");

        let body = serde_json::json!({
            "search": "",
            "vectorQueries": [{
                "kind": "vector",
                "vector": vector,
                "fields": VECTOR_FIELD,
                "k": K_NEAREST,
            }],
            "top": K_NEAREST,
        });

        let response = self
            .client
            .post(self.search_url()?)
            .header("api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProductError::Query(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ProductError::Query(format!(
                "search index error {}: {}",
                status, text
            )));
        }

        let results: SearchResults = response
            .json()
            .await
            .map_err(|e| ProductError::Query(format!("failed to decode index response: {}", e)))?;

        Ok(results
            .value
            .into_iter()
            .map(|hit| ProductDocument {
                id: hit.id,
                title: hit.title,
                content: hit.content,
                url: hit.url,
            })
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResults {
    value: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    id: String,
    #[serde(default)]
    title: String,
    content: String,
    url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::EmbeddingProvider;

    fn test_config() -> IndexConfig {
        IndexConfig {
            endpoint: "https://search.example.net".into(),
            api_key: "key".into(),
            index_name: "contoso-products".into(),
        }
    }

    #[test]
    fn test_search_url() {
        let source = VectorProductSource::new(
            EmbeddingClient::new(EmbeddingProvider::HashBased { dimension: 8 }),
            test_config(),
        );
        let url = source.search_url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://search.example.net/indexes/contoso-products/docs/search?api-version=2023-11-01"
        );
    }

    #[test]
    fn test_search_hit_title_defaults() {
        let json = r#"{
            "value": [{
                "id": "cHJvZHVjdHMueGxzeDQ=",
                "content": "CompactCook Camping Stove",
                "url": "products.xlsx"
            }]
        }"#;
        let results: SearchResults = serde_json::from_str(json).unwrap();
        assert_eq!(results.value[0].title, "");
        assert_eq!(results.value[0].content, "CompactCook Camping Stove");
    }
}
