//! Researcher role: tool-calling research over the search client.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use copydesk_models::{Entity, NewsArticle, ResearchBundle, WebPage};

use crate::client::{ChatClient, ChatMessage, ChatTool};
use crate::config::ModelConfig;
use crate::error::Result;
use crate::prompts::RESEARCHER_SYSTEM_PROMPT;
use crate::search::{SearchClient, WebSearchResults, DEFAULT_MARKET};

/// URL placeholder for findings that have no page of their own.
const NO_URL_PLACEHOLDER: &str = "None Available";

/// The research collaborator contract.
///
/// Invoked once at the start of a run and once more per feedback iteration;
/// each call produces a fresh bundle.
#[async_trait]
pub trait Researcher: Send + Sync {
    /// Research the request, steered by instructions and any editor feedback.
    async fn research(
        &self,
        request: &str,
        instructions: &str,
        feedback: &str,
    ) -> Result<ResearchBundle>;
}

/// Researcher backed by a chat model with search tools.
///
/// The model picks which searches to run via function calling; each returned
/// tool call is executed against the search client. Individual tool-call
/// failures are skipped and omitted from the bundle, never fatal to the
/// research step.
pub struct SearchResearcher {
    chat: ChatClient,
    search: SearchClient,
    config: ModelConfig,
}

impl SearchResearcher {
    /// Create a researcher over the given clients.
    pub fn new(chat: ChatClient, search: SearchClient, config: ModelConfig) -> Self {
        Self {
            chat,
            search,
            config,
        }
    }

    /// Tool definitions offered to the model.
    fn tools() -> Vec<ChatTool> {
        let query_schema = json!({
            "type": "object",
            "properties": {
                "query": {"type": "string", "description": "Search query"},
                "market": {"type": "string", "description": "Market code such as en-US"}
            },
            "required": ["query"]
        });

        vec![
            ChatTool::function(
                "find_information",
                "Search the web for pages relevant to a query",
                query_schema.clone(),
            ),
            ChatTool::function(
                "find_entities",
                "Look up people, places, and organizations for a query",
                query_schema.clone(),
            ),
            ChatTool::function(
                "find_news",
                "Find recent news coverage for a query",
                query_schema,
            ),
        ]
    }

    async fn run_tool(&self, name: &str, args: &SearchArgs) -> Result<SearchOutcome> {
        match name {
            "find_information" => self
                .search
                .find_information(&args.query, &args.market)
                .await
                .map(SearchOutcome::Web),
            "find_entities" => self
                .search
                .find_entities(&args.query, &args.market)
                .await
                .map(SearchOutcome::Entities),
            "find_news" => self
                .search
                .find_news(&args.query, &args.market)
                .await
                .map(SearchOutcome::News),
            other => Err(crate::error::AgentError::Search(format!(
                "unknown tool: {}",
                other
            ))),
        }
    }
}

#[async_trait]
impl Researcher for SearchResearcher {
    async fn research(
        &self,
        request: &str,
        instructions: &str,
        feedback: &str,
    ) -> Result<ResearchBundle> {
        let messages = vec![
            ChatMessage::system(RESEARCHER_SYSTEM_PROMPT),
            ChatMessage::user(format!(
                "Request: {}\nInstructions: {}\nFeedback: {}",
                request, instructions, feedback
            )),
        ];

        // An unusable model response yields an empty bundle, not an error:
        // the run continues with whatever research there is.
        let response = match self
            .chat
            .chat(&self.config, messages, Some(Self::tools()))
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("researcher model call failed: {}", e);
                return Ok(ResearchBundle::new());
            }
        };

        let mut outcomes = Vec::new();
        for call in response.tool_calls() {
            let name = call.function.name.as_str();
            let args: SearchArgs = match call.arguments().and_then(|v| {
                serde_json::from_value(v).map_err(crate::error::AgentError::from)
            }) {
                Ok(args) => args,
                Err(e) => {
                    warn!("skipping tool call {}: {}", name, e);
                    continue;
                }
            };

            debug!(tool = name, query = %args.query, "executing research tool");
            match self.run_tool(name, &args).await {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => warn!("skipping failed tool call {}: {}", name, e),
            }
        }

        Ok(fold_outcomes(outcomes))
    }
}

/// Arguments the model supplies for a search tool.
#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
    #[serde(default = "default_market")]
    market: String,
}

fn default_market() -> String {
    DEFAULT_MARKET.to_string()
}

/// Result of one executed search tool.
#[derive(Debug)]
enum SearchOutcome {
    Web(WebSearchResults),
    Entities(Vec<Entity>),
    News(Vec<NewsArticle>),
}

/// Fold executed tool results into one bundle.
///
/// Entity hits are normalized to the web-page shape with a placeholder URL;
/// related-search suggestions are dropped.
fn fold_outcomes(outcomes: Vec<SearchOutcome>) -> ResearchBundle {
    let mut bundle = ResearchBundle::new();
    for outcome in outcomes {
        match outcome {
            SearchOutcome::Web(results) => bundle.web.extend(results.pages),
            SearchOutcome::Entities(entities) => {
                bundle.entities.extend(entities.into_iter().map(|e| WebPage {
                    url: NO_URL_PLACEHOLDER.to_string(),
                    name: e.name,
                    description: e.description,
                }))
            }
            SearchOutcome::News(articles) => bundle.news.extend(articles),
        }
    }
    bundle
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(name: &str) -> WebPage {
        WebPage {
            url: format!("https://example.com/{}", name),
            name: name.to_string(),
            description: format!("about {}", name),
        }
    }

    #[test]
    fn test_fold_empty() {
        let bundle = fold_outcomes(Vec::new());
        assert!(bundle.is_empty());
    }

    #[test]
    fn test_fold_web_and_news() {
        let outcomes = vec![
            SearchOutcome::Web(WebSearchResults {
                pages: vec![page("a"), page("b")],
                related: vec!["ignored".into()],
            }),
            SearchOutcome::News(vec![NewsArticle {
                name: "Headline".into(),
                url: "https://news.example".into(),
                description: "story".into(),
                provider: "Example News".into(),
                date_published: "2024-05-01T00:00:00Z".into(),
            }]),
        ];
        let bundle = fold_outcomes(outcomes);
        assert_eq!(bundle.web.len(), 2);
        assert_eq!(bundle.news.len(), 1);
        assert!(bundle.entities.is_empty());
    }

    #[test]
    fn test_fold_entities_get_placeholder_url() {
        let outcomes = vec![SearchOutcome::Entities(vec![Entity {
            name: "HikeMate".into(),
            description: "Outdoor gear brand".into(),
        }])];
        let bundle = fold_outcomes(outcomes);
        assert_eq!(bundle.entities.len(), 1);
        assert_eq!(bundle.entities[0].url, NO_URL_PLACEHOLDER);
        assert_eq!(bundle.entities[0].name, "HikeMate");
    }

    #[test]
    fn test_fold_multiple_web_outcomes_preserve_order() {
        let outcomes = vec![
            SearchOutcome::Web(WebSearchResults {
                pages: vec![page("first")],
                related: vec![],
            }),
            SearchOutcome::Web(WebSearchResults {
                pages: vec![page("second")],
                related: vec![],
            }),
        ];
        let bundle = fold_outcomes(outcomes);
        assert_eq!(bundle.web[0].name, "first");
        assert_eq!(bundle.web[1].name, "second");
    }

    #[test]
    fn test_search_args_default_market() {
        let args: SearchArgs = serde_json::from_str(r#"{"query": "camping"}"#).unwrap();
        assert_eq!(args.market, DEFAULT_MARKET);
    }

    #[test]
    fn test_tools_cover_all_searches() {
        let tools = SearchResearcher::tools();
        let names: Vec<&str> = tools.iter().map(|t| t.function.name.as_str()).collect();
        assert_eq!(names, ["find_information", "find_entities", "find_news"]);
    }
}
