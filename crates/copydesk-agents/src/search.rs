//! Bing-style web, entity, and news search client.
//!
//! The researcher role dispatches its tool calls here. Each operation is a
//! single GET against the search resource; response shapes are decoded into
//! the model types with tolerance for the optional answer sections.

use serde::Deserialize;
use tracing::debug;
use url::Url;

use copydesk_models::{Entity, NewsArticle, WebPage};

use crate::error::{AgentError, Result};

/// Environment variable for the search resource endpoint.
pub const BING_SEARCH_ENDPOINT_ENV: &str = "BING_SEARCH_ENDPOINT";

/// Environment variable for the search subscription key.
pub const BING_SEARCH_KEY_ENV: &str = "BING_SEARCH_KEY";

/// Subscription key header expected by the search resource.
const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Market used when the model does not pick one.
pub const DEFAULT_MARKET: &str = "en-US";

/// Result count requested per search.
const RESULT_COUNT: &str = "5";

/// Web search results: pages plus related-search suggestions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WebSearchResults {
    /// Ranked result pages.
    pub pages: Vec<WebPage>,

    /// Related search strings, empty when the answer section is absent.
    pub related: Vec<String>,
}

/// Search API client.
#[derive(Clone)]
pub struct SearchClient {
    client: reqwest::Client,
    endpoint: Url,
    key: String,
}

impl SearchClient {
    /// Create a client for the given search endpoint.
    pub fn new(endpoint: impl AsRef<str>, key: impl Into<String>) -> Result<Self> {
        // Url::join drops the last path segment without this.
        let mut raw = endpoint.as_ref().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let endpoint = Url::parse(&raw)
            .map_err(|e| AgentError::Configuration(format!("invalid search endpoint: {}", e)))?;
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
            key: key.into(),
        })
    }

    /// Create a client from `BING_SEARCH_ENDPOINT` / `BING_SEARCH_KEY`.
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var(BING_SEARCH_ENDPOINT_ENV).map_err(|_| {
            AgentError::Configuration(format!(
                "missing {} environment variable",
                BING_SEARCH_ENDPOINT_ENV
            ))
        })?;
        let key = std::env::var(BING_SEARCH_KEY_ENV).map_err(|_| {
            AgentError::Configuration(format!(
                "missing {} environment variable",
                BING_SEARCH_KEY_ENV
            ))
        })?;
        Self::new(endpoint, key)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = self
            .endpoint
            .join(path)
            .map_err(|e| AgentError::Configuration(format!("invalid search path: {}", e)))?;

        let response = self
            .client
            .get(url)
            .header(SUBSCRIPTION_KEY_HEADER, &self.key)
            .query(params)
            .send()
            .await
            .map_err(|e| AgentError::Search(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AgentError::Search(format!(
                "search API error {}: {}",
                status, text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AgentError::ResponseParse(format!("failed to decode search answer: {}", e)))
    }

    /// Find web pages for a query.
    pub async fn find_information(&self, query: &str, market: &str) -> Result<WebSearchResults> {
        debug!(query, market, "web search");
        let answer: WebAnswer = self
            .get_json(
                "v7.0/search",
                &[("q", query), ("mkt", market), ("count", RESULT_COUNT)],
            )
            .await?;

        let pages = answer
            .web_pages
            .ok_or_else(|| AgentError::ResponseParse("missing webPages answer".into()))?
            .value
            .into_iter()
            .map(|p| WebPage {
                url: p.url,
                name: p.name,
                description: p.snippet,
            })
            .collect();

        let related = answer
            .related_searches
            .map(|r| r.value.into_iter().map(|s| s.text).collect())
            .unwrap_or_default();

        Ok(WebSearchResults { pages, related })
    }

    /// Find entities for a query.
    ///
    /// An answer without an entities section yields an empty list.
    pub async fn find_entities(&self, query: &str, market: &str) -> Result<Vec<Entity>> {
        debug!(query, market, "entity search");
        let answer: EntityAnswer = self
            .get_json("v7.0/entities", &[("q", query), ("mkt", market)])
            .await?;

        Ok(answer
            .entities
            .map(|e| {
                e.value
                    .into_iter()
                    .map(|item| Entity {
                        name: item.name,
                        description: item.description,
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Find news articles for a query.
    pub async fn find_news(&self, query: &str, market: &str) -> Result<Vec<NewsArticle>> {
        debug!(query, market, "news search");
        let answer: NewsAnswer = self
            .get_json(
                "v7.0/news/search",
                &[("q", query), ("mkt", market), ("count", RESULT_COUNT)],
            )
            .await?;

        answer
            .value
            .into_iter()
            .map(|item| {
                let provider = item
                    .provider
                    .into_iter()
                    .next()
                    .map(|p| p.name)
                    .ok_or_else(|| AgentError::ResponseParse("news item without provider".into()))?;
                Ok(NewsArticle {
                    name: item.name,
                    url: item.url,
                    description: item.description,
                    provider,
                    date_published: item.date_published,
                })
            })
            .collect()
    }
}

// Wire shapes for the three answer kinds.

#[derive(Debug, Deserialize)]
struct WebAnswer {
    #[serde(rename = "webPages")]
    web_pages: Option<PagesSection>,
    #[serde(rename = "relatedSearches")]
    related_searches: Option<RelatedSection>,
}

#[derive(Debug, Deserialize)]
struct PagesSection {
    value: Vec<RawPage>,
}

#[derive(Debug, Deserialize)]
struct RawPage {
    url: String,
    name: String,
    snippet: String,
}

#[derive(Debug, Deserialize)]
struct RelatedSection {
    value: Vec<RelatedQuery>,
}

#[derive(Debug, Deserialize)]
struct RelatedQuery {
    text: String,
}

#[derive(Debug, Deserialize)]
struct EntityAnswer {
    entities: Option<EntitySection>,
}

#[derive(Debug, Deserialize)]
struct EntitySection {
    value: Vec<RawEntity>,
}

#[derive(Debug, Deserialize)]
struct RawEntity {
    name: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct NewsAnswer {
    value: Vec<RawNewsItem>,
}

#[derive(Debug, Deserialize)]
struct RawNewsItem {
    name: String,
    url: String,
    description: String,
    provider: Vec<RawProvider>,
    #[serde(rename = "datePublished")]
    date_published: String,
}

#[derive(Debug, Deserialize)]
struct RawProvider {
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trailing_slash_added() {
        let client = SearchClient::new("https://api.example.com/bing", "key").unwrap();
        let url = client.endpoint.join("v7.0/search").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/bing/v7.0/search");
    }

    #[test]
    fn test_web_answer_decodes_related() {
        let json = r#"{
            "webPages": {"value": [
                {"url": "https://a.example", "name": "A", "snippet": "about a"}
            ]},
            "relatedSearches": {"value": [{"text": "winter camping"}]}
        }"#;
        let answer: WebAnswer = serde_json::from_str(json).unwrap();
        assert_eq!(answer.web_pages.unwrap().value.len(), 1);
        assert_eq!(answer.related_searches.unwrap().value[0].text, "winter camping");
    }

    #[test]
    fn test_web_answer_without_related() {
        let json = r#"{"webPages": {"value": []}}"#;
        let answer: WebAnswer = serde_json::from_str(json).unwrap();
        assert!(answer.related_searches.is_none());
    }

    #[test]
    fn test_entity_answer_without_entities() {
        let answer: EntityAnswer = serde_json::from_str("{}").unwrap();
        assert!(answer.entities.is_none());
    }

    #[test]
    fn test_news_item_decodes() {
        let json = r#"{
            "value": [{
                "name": "Trail news",
                "url": "https://news.example",
                "description": "story",
                "provider": [{"name": "Example News"}],
                "datePublished": "2024-05-01T00:00:00Z"
            }]
        }"#;
        let answer: NewsAnswer = serde_json::from_str(json).unwrap();
        assert_eq!(answer.value[0].provider[0].name, "Example News");
        assert_eq!(answer.value[0].date_published, "2024-05-01T00:00:00Z");
    }
}
