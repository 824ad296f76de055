//! Research bundle types produced by the researcher role.

use serde::{Deserialize, Serialize};

/// A web search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebPage {
    /// Page URL.
    pub url: String,

    /// Page title.
    pub name: String,

    /// Search snippet for the page.
    pub description: String,
}

/// An entity search hit.
///
/// Entity results carry no URL of their own; when folded into a bundle they
/// are given a placeholder so downstream consumers see a uniform shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity name.
    pub name: String,

    /// Entity description.
    pub description: String,
}

/// A news search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    /// Headline.
    pub name: String,

    /// Article URL.
    pub url: String,

    /// Article description.
    pub description: String,

    /// Name of the publishing provider.
    pub provider: String,

    /// Publication timestamp as reported by the search API.
    #[serde(rename = "datePublished")]
    pub date_published: String,
}

/// The structured findings returned by one research step.
///
/// Produced fresh on every iteration of the feedback loop and consumed by
/// the writer. Sequences preserve the order the underlying searches
/// returned them in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchBundle {
    /// Web search results.
    #[serde(default)]
    pub web: Vec<WebPage>,

    /// Entity search results, normalized to the web-page shape.
    #[serde(default)]
    pub entities: Vec<WebPage>,

    /// News search results.
    #[serde(default)]
    pub news: Vec<NewsArticle>,
}

impl ResearchBundle {
    /// Create an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no search produced any results.
    pub fn is_empty(&self) -> bool {
        self.web.is_empty() && self.entities.is_empty() && self.news.is_empty()
    }

    /// Total number of findings across all result kinds.
    pub fn len(&self) -> usize {
        self.web.len() + self.entities.len() + self.news.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bundle() {
        let bundle = ResearchBundle::new();
        assert!(bundle.is_empty());
        assert_eq!(bundle.len(), 0);
    }

    #[test]
    fn test_bundle_len() {
        let bundle = ResearchBundle {
            web: vec![WebPage {
                url: "https://example.com".into(),
                name: "Example".into(),
                description: "A page".into(),
            }],
            entities: vec![],
            news: vec![NewsArticle {
                name: "Headline".into(),
                url: "https://news.example.com".into(),
                description: "A story".into(),
                provider: "Example News".into(),
                date_published: "2024-05-01T00:00:00Z".into(),
            }],
        };
        assert!(!bundle.is_empty());
        assert_eq!(bundle.len(), 2);
    }

    #[test]
    fn test_news_date_published_rename() {
        let json = r#"{
            "name": "Headline",
            "url": "https://news.example.com",
            "description": "A story",
            "provider": "Example News",
            "datePublished": "2024-05-01T00:00:00Z"
        }"#;
        let article: NewsArticle = serde_json::from_str(json).unwrap();
        assert_eq!(article.date_published, "2024-05-01T00:00:00Z");

        let out = serde_json::to_value(&article).unwrap();
        assert!(out.get("datePublished").is_some());
    }

    #[test]
    fn test_bundle_missing_fields_default() {
        let bundle: ResearchBundle = serde_json::from_str(r#"{"web": []}"#).unwrap();
        assert!(bundle.is_empty());
    }
}
