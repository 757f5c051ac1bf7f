//! LLM client abstraction and provider selection.

use super::openai::OpenAIClient;
use crate::types::{AppError, Result};
use async_trait::async_trait;

/// Generic LLM client trait for provider abstraction
///
/// All LLM providers implement this trait, allowing for easy swapping
/// between providers without changing application code.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate a completion from a prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generate with system prompt
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Get the model name/identifier
    fn model_name(&self) -> &str;
}

/// Provider enum for runtime selection
#[derive(Debug, Clone)]
pub enum Provider {
    /// OpenAI API provider (including Azure OpenAI and compatible APIs)
    ///
    /// # Example
    /// ```rust,ignore
    /// let provider = Provider::OpenAI {
    ///     api_key: "sk-...".to_string(),
    ///     api_base: "https://api.openai.com/v1".to_string(),
    ///     model: "gpt-4o-mini".to_string(),
    /// };
    /// ```
    OpenAI {
        api_key: String,
        api_base: String,
        model: String,
    },
}

impl Provider {
    /// Create a client instance for this provider
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is blank.
    pub fn create_client(&self) -> Result<Box<dyn LLMClient>> {
        Ok(Box::new(self.openai_client()?))
    }

    /// Create the concrete OpenAI client, for callers that need the
    /// Responses API beyond [`LLMClient`].
    pub fn openai_client(&self) -> Result<OpenAIClient> {
        match self {
            Provider::OpenAI {
                api_key,
                api_base,
                model,
            } => {
                if api_key.trim().is_empty() {
                    return Err(AppError::Configuration(format!(
                        "OpenAI provider for model '{}' has no API key",
                        model
                    )));
                }
                Ok(OpenAIClient::new(
                    api_key.clone(),
                    api_base.clone(),
                    model.clone(),
                ))
            }
        }
    }

    /// Get a human-readable name for this provider
    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAI { .. } => "OpenAI",
        }
    }

    /// Model identifier this provider will request
    pub fn model(&self) -> &str {
        match self {
            Provider::OpenAI { model, .. } => model,
        }
    }
}
