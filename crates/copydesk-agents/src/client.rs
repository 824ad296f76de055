//! Azure OpenAI chat-completions client.
//!
//! This module provides the HTTP client shared by the generation roles,
//! supporting:
//! - Chat completions with multiple message roles
//! - Tool/function calling (used by the researcher)

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use url::Url;

use crate::config::ModelConfig;
use crate::error::{AgentError, Result};

/// Environment variable for the Azure OpenAI resource endpoint.
pub const AZURE_OPENAI_ENDPOINT_ENV: &str = "AZURE_OPENAI_ENDPOINT";

/// Environment variable for the Azure OpenAI API key.
pub const AZURE_OPENAI_API_KEY_ENV: &str = "AZURE_OPENAI_API_KEY";

/// Environment variable for the Azure OpenAI API version.
pub const AZURE_OPENAI_API_VERSION_ENV: &str = "AZURE_OPENAI_API_VERSION";

/// API version used when the environment does not specify one.
pub const DEFAULT_API_VERSION: &str = "2024-02-15-preview";

/// Chat-completions client for an Azure OpenAI resource.
#[derive(Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
    api_version: String,
}

impl ChatClient {
    /// Create a new client for the given resource endpoint.
    pub fn new(
        endpoint: impl AsRef<str>,
        api_key: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Result<Self> {
        // Url::join drops the last path segment without this.
        let mut raw = endpoint.as_ref().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let endpoint = Url::parse(&raw)
            .map_err(|e| AgentError::Configuration(format!("invalid endpoint: {}", e)))?;
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key: api_key.into(),
            api_version: api_version.into(),
        })
    }

    /// Create a client from environment variables.
    ///
    /// Uses `AZURE_OPENAI_ENDPOINT`, `AZURE_OPENAI_API_KEY`, and
    /// `AZURE_OPENAI_API_VERSION` (with a preview default).
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var(AZURE_OPENAI_ENDPOINT_ENV).map_err(|_| {
            AgentError::Configuration(format!(
                "missing {} environment variable",
                AZURE_OPENAI_ENDPOINT_ENV
            ))
        })?;
        let api_key = std::env::var(AZURE_OPENAI_API_KEY_ENV).map_err(|_| {
            AgentError::Configuration(format!(
                "missing {} environment variable",
                AZURE_OPENAI_API_KEY_ENV
            ))
        })?;
        let api_version = std::env::var(AZURE_OPENAI_API_VERSION_ENV)
            .unwrap_or_else(|_| DEFAULT_API_VERSION.to_string());
        Self::new(endpoint, api_key, api_version)
    }

    /// Build the chat-completions URL for a deployment.
    fn completions_url(&self, deployment: &str) -> Result<Url> {
        let path = format!("openai/deployments/{}/chat/completions", deployment);
        let mut url = self
            .endpoint
            .join(&path)
            .map_err(|e| AgentError::Configuration(format!("invalid deployment path: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("api-version", &self.api_version);
        Ok(url)
    }

    /// Send a chat completion request.
    pub async fn chat(
        &self,
        config: &ModelConfig,
        messages: Vec<ChatMessage>,
        tools: Option<Vec<ChatTool>>,
    ) -> Result<ChatResponse> {
        let request = ChatRequest {
            messages,
            tools,
            max_tokens: Some(config.max_tokens),
            temperature: Some(config.temperature),
        };

        let url = self.completions_url(&config.deployment)?;
        trace!("Sending chat request: {:?}", request);

        let response = self
            .client
            .post(url)
            .header("api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AgentError::ModelInvocation(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AgentError::ModelInvocation(format!(
                "Azure OpenAI API error {}: {}",
                status, text
            )));
        }

        let response: ChatResponse = response
            .json()
            .await
            .map_err(|e| AgentError::ResponseParse(format!("failed to decode response: {}", e)))?;

        debug!(
            "Chat response received: {} tokens used",
            response.usage.as_ref().map_or(0, |u| u.total_tokens)
        );

        Ok(response)
    }
}

/// Chat completion request body.
///
/// The deployment is addressed in the URL, not the body, so there is no
/// model field here.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Conversation messages.
    pub messages: Vec<ChatMessage>,

    /// Available tools.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ChatTool>>,

    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Temperature for generation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// A message in the chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender.
    pub role: String,

    /// Text content of the message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: Some(content.into()),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: Some(content.into()),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: Some(content.into()),
        }
    }
}

/// Tool definition for the API.
#[derive(Debug, Clone, Serialize)]
pub struct ChatTool {
    /// Type of the tool (always "function").
    #[serde(rename = "type")]
    pub tool_type: String,

    /// Function definition.
    pub function: ChatToolDefinition,
}

impl ChatTool {
    /// Create a function tool from its name, description, and parameters.
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            tool_type: "function".to_string(),
            function: ChatToolDefinition {
                name: name.into(),
                description: description.into(),
                parameters,
            },
        }
    }
}

/// Function definition in a tool.
#[derive(Debug, Clone, Serialize)]
pub struct ChatToolDefinition {
    /// Name of the function.
    pub name: String,

    /// Description of what the function does.
    pub description: String,

    /// JSON Schema for parameters.
    pub parameters: serde_json::Value,
}

/// Tool call in a completion response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatToolCall {
    /// Unique identifier for this tool call.
    pub id: String,

    /// Type of the tool call (always "function").
    #[serde(rename = "type")]
    pub call_type: String,

    /// Function details.
    pub function: ChatToolFunction,
}

impl ChatToolCall {
    /// Decode the JSON-encoded arguments string.
    pub fn arguments(&self) -> Result<serde_json::Value> {
        serde_json::from_str(&self.function.arguments).map_err(|e| {
            AgentError::ResponseParse(format!(
                "invalid arguments for {}: {}",
                self.function.name, e
            ))
        })
    }
}

/// Function details in a tool call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatToolFunction {
    /// Name of the function to call.
    pub name: String,

    /// JSON-encoded arguments.
    pub arguments: String,
}

/// Chat completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Unique identifier for this completion.
    pub id: String,

    /// Completion choices.
    pub choices: Vec<ChatChoice>,

    /// Token usage information.
    pub usage: Option<ChatUsage>,
}

impl ChatResponse {
    /// Get the first choice's message content, if any.
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }

    /// Get tool calls from the first choice.
    pub fn tool_calls(&self) -> &[ChatToolCall] {
        self.choices
            .first()
            .and_then(|c| c.message.tool_calls.as_deref())
            .unwrap_or(&[])
    }
}

/// A choice in the completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// Index of this choice.
    pub index: u32,

    /// The message for this choice.
    pub message: ResponseMessage,

    /// Finish reason (stop, tool_calls, length, etc.).
    pub finish_reason: Option<String>,
}

/// Message in a completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    /// Role (always "assistant" for responses).
    pub role: String,

    /// Text content of the response.
    pub content: Option<String>,

    /// Tool calls the model wants to make.
    pub tool_calls: Option<Vec<ChatToolCall>>,
}

/// Token usage information.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatUsage {
    /// Tokens in the prompt.
    pub prompt_tokens: u32,

    /// Tokens in the completion.
    pub completion_tokens: u32,

    /// Total tokens used.
    pub total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_message_constructors() {
        let system = ChatMessage::system("You are a researcher.");
        assert_eq!(system.role, "system");
        assert_eq!(system.content, Some("You are a researcher.".to_string()));

        let user = ChatMessage::user("Find camping trends");
        assert_eq!(user.role, "user");

        let assistant = ChatMessage::assistant("Here is what I found.");
        assert_eq!(assistant.role, "assistant");
    }

    #[test]
    fn test_completions_url() {
        let client = ChatClient::new(
            "https://example.openai.azure.com/",
            "key",
            "2024-02-15-preview",
        )
        .unwrap();
        let url = client.completions_url("gpt-4o").unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.openai.azure.com/openai/deployments/gpt-4o/chat/completions?api-version=2024-02-15-preview"
        );
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let result = ChatClient::new("not a url", "key", "v");
        assert!(matches!(result, Err(AgentError::Configuration(_))));
    }

    #[test]
    fn test_request_serialization_skips_empty() {
        let request = ChatRequest {
            messages: vec![ChatMessage::user("Hello")],
            tools: None,
            max_tokens: Some(512),
            temperature: Some(0.2),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("tools").is_none());
        assert_eq!(value["max_tokens"], 512);
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
            "id": "chatcmpl-123",
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": "The article is ready."
                },
                "finish_reason": "stop"
            }],
            "usage": {
                "prompt_tokens": 10,
                "completion_tokens": 5,
                "total_tokens": 15
            }
        }"#;

        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.content(), Some("The article is ready."));
        assert!(response.tool_calls().is_empty());
    }

    #[test]
    fn test_response_with_tool_calls() {
        let json = r#"{
            "id": "chatcmpl-456",
            "choices": [{
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call-1",
                        "type": "function",
                        "function": {
                            "name": "find_information",
                            "arguments": "{\"query\": \"camping trends\"}"
                        }
                    }]
                },
                "finish_reason": "tool_calls"
            }],
            "usage": null
        }"#;

        let response: ChatResponse = serde_json::from_str(json).unwrap();
        let calls = response.tool_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].function.name, "find_information");
        assert_eq!(calls[0].arguments().unwrap(), json!({"query": "camping trends"}));
    }

    #[test]
    fn test_tool_call_bad_arguments() {
        let call = ChatToolCall {
            id: "call-1".into(),
            call_type: "function".into(),
            function: ChatToolFunction {
                name: "find_news".into(),
                arguments: "{not json".into(),
            },
        };
        assert!(matches!(
            call.arguments(),
            Err(AgentError::ResponseParse(_))
        ));
    }
}
