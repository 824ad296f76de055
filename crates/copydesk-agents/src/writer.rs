//! Writer role: drafts the article from research and product context.

use async_trait::async_trait;
use tracing::{debug, warn};

use copydesk_models::{ArticleDraft, ProductDocument, ResearchBundle, NO_FEEDBACK};

use crate::client::{ChatClient, ChatMessage};
use crate::config::ModelConfig;
use crate::error::{AgentError, Result};
use crate::prompts::WRITER_SYSTEM_PROMPT;

/// The writer collaborator contract.
#[async_trait]
pub trait Writer: Send + Sync {
    /// Write an article draft.
    ///
    /// `feedback` is editor feedback from the previous iteration (or the
    /// no-feedback sentinel on the first pass). The product documents are
    /// the same for every call within a run.
    async fn write(
        &self,
        request: &str,
        feedback: &str,
        instructions: &str,
        research: &ResearchBundle,
        products: &[ProductDocument],
    ) -> Result<ArticleDraft>;
}

/// Writer backed by a chat model.
pub struct LlmWriter {
    chat: ChatClient,
    config: ModelConfig,
}

impl LlmWriter {
    /// Create a writer over the given client.
    pub fn new(chat: ChatClient, config: ModelConfig) -> Self {
        Self { chat, config }
    }
}

#[async_trait]
impl Writer for LlmWriter {
    async fn write(
        &self,
        request: &str,
        feedback: &str,
        instructions: &str,
        research: &ResearchBundle,
        products: &[ProductDocument],
    ) -> Result<ArticleDraft> {
        let research_json = serde_json::to_string(research)?;
        let products_json = serde_json::to_string(products)?;

        let messages = vec![
            ChatMessage::system(WRITER_SYSTEM_PROMPT),
            ChatMessage::user(format!(
                "Request: {}\nInstructions: {}\nEditor feedback: {}\n\nResearch:\n{}\n\nProduct documentation:\n{}",
                request, instructions, feedback, research_json, products_json
            )),
        ];

        let response = self.chat.chat(&self.config, messages, None).await?;
        let content = response
            .content()
            .ok_or_else(|| AgentError::ResponseParse("writer returned no content".into()))?;

        debug!(len = content.len(), "writer response received");
        Ok(parse_draft(content))
    }
}

/// Decode the writer's reply into a draft.
///
/// The model is asked for `{"article": ..., "feedback": ...}`; a free-text
/// reply is tolerated by treating the whole content as the article.
fn parse_draft(content: &str) -> ArticleDraft {
    match serde_json::from_str::<ArticleDraft>(content) {
        Ok(draft) => draft,
        Err(e) => {
            warn!("writer reply was not structured ({}), using raw text", e);
            ArticleDraft::new(content, NO_FEEDBACK)
        }
    }
}
