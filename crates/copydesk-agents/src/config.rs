//! Model configuration for the generation roles.

use serde::{Deserialize, Serialize};

use crate::error::{AgentError, Result};

/// Environment variable for the chat deployment name.
pub const AZURE_OPENAI_DEPLOYMENT_ENV: &str = "AZURE_OPENAI_DEPLOYMENT_NAME";

/// Model configuration for one generation role.
///
/// Each role (researcher, writer, editor) carries its own copy so token
/// budgets and temperatures can differ per role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Deployment name of the chat model.
    pub deployment: String,

    /// Maximum tokens to generate in responses.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Temperature for response generation (0.0 to 2.0).
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_temperature() -> f32 {
    0.7
}

impl ModelConfig {
    /// Create a configuration for the given deployment.
    pub fn new(deployment: impl Into<String>) -> Self {
        Self {
            deployment: deployment.into(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }

    /// Create a configuration from the environment.
    pub fn from_env() -> Result<Self> {
        let deployment = std::env::var(AZURE_OPENAI_DEPLOYMENT_ENV).map_err(|_| {
            AgentError::Configuration(format!(
                "missing {} environment variable",
                AZURE_OPENAI_DEPLOYMENT_ENV
            ))
        })?;
        Ok(Self::new(deployment))
    }

    /// Set the maximum tokens.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature.clamp(0.0, 2.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ModelConfig::new("gpt-4o");
        assert_eq!(config.deployment, "gpt-4o");
        assert_eq!(config.max_tokens, 4096);
        assert_eq!(config.temperature, 0.7);
    }

    #[test]
    fn test_builder() {
        let config = ModelConfig::new("gpt-4o")
            .with_max_tokens(512)
            .with_temperature(0.2);
        assert_eq!(config.max_tokens, 512);
        assert_eq!(config.temperature, 0.2);
    }

    #[test]
    fn test_temperature_clamping() {
        let config = ModelConfig::new("gpt-4o").with_temperature(5.0);
        assert_eq!(config.temperature, 2.0);

        let config = ModelConfig::new("gpt-4o").with_temperature(-1.0);
        assert_eq!(config.temperature, 0.0);
    }

    #[test]
    fn test_deserialize_defaults() {
        let config: ModelConfig = serde_json::from_str(r#"{"deployment": "gpt-4o"}"#).unwrap();
        assert_eq!(config.max_tokens, 4096);
    }
}
