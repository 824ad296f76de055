//! Editor role: judges a draft and hands back feedback.

use async_trait::async_trait;
use tracing::debug;

use crate::client::{ChatClient, ChatMessage};
use crate::config::ModelConfig;
use crate::error::{AgentError, Result};
use crate::prompts::EDITOR_SYSTEM_PROMPT;

/// The editor collaborator contract.
///
/// Returns the model's raw text reply. The reply should deserialize to a
/// verdict, but normalization of free-text replies is the orchestrator's
/// responsibility, not the editor's.
#[async_trait]
pub trait Editor: Send + Sync {
    /// Review an article along with the writer's own feedback.
    async fn edit(&self, article: &str, feedback: &str) -> Result<String>;
}

/// Editor backed by a chat model.
pub struct LlmEditor {
    chat: ChatClient,
    config: ModelConfig,
}

impl LlmEditor {
    /// Create an editor over the given client.
    pub fn new(chat: ChatClient, config: ModelConfig) -> Self {
        Self { chat, config }
    }
}

#[async_trait]
impl Editor for LlmEditor {
    async fn edit(&self, article: &str, feedback: &str) -> Result<String> {
        let messages = vec![
            ChatMessage::system(EDITOR_SYSTEM_PROMPT),
            ChatMessage::user(format!(
                "Article:\n{}\n\nWriter notes: {}",
                article, feedback
            )),
        ];

        let response = self.chat.chat(&self.config, messages, None).await?;
        let content = response
            .content()
            .ok_or_else(|| AgentError::ResponseParse("editor returned no content".into()))?;

        debug!(len = content.len(), "editor response received");
        Ok(content.to_string())
    }
}
