use crate::llm::client::LLMClient;
use crate::llm::responses::{ResponsesOutput, ResponsesRequest};
use crate::types::{AppError, Result};
use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const TEMPERATURE: f32 = 0.4;

/// OpenAI-compatible client for chat completions and the Responses API.
pub struct OpenAIClient {
    client: Client<OpenAIConfig>,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

impl OpenAIClient {
    pub fn new(api_key: String, api_base: String, model: String) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base.trim_end_matches('/'));

        Self {
            client: Client::with_config(config),
            model,
        }
    }

    async fn chat(&self, messages: Vec<ChatMessage<'_>>) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages,
            temperature: TEMPERATURE,
        };

        let response: ChatResponse = self
            .client
            .chat()
            .create_byot(request)
            .await
            .map_err(|e| AppError::LLM(format!("OpenAI API error: {}", e)))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| AppError::LLM("OpenAI response missing output text.".to_string()))
    }

    /// Send a Responses API request and return its trimmed output text,
    /// which is empty when the model produced no message.
    ///
    /// The request's model is overridden with this client's model.
    pub async fn respond(&self, mut request: ResponsesRequest) -> Result<String> {
        request.model = self.model.clone();

        let response: ResponsesOutput = self
            .client
            .responses()
            .create_byot(request)
            .await
            .map_err(|e| AppError::LLM(format!("OpenAI API error: {}", e)))?;

        Ok(response.output_text().trim().to_string())
    }
}

#[async_trait]
impl LLMClient for OpenAIClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.chat(vec![ChatMessage {
            role: "user",
            content: prompt,
        }])
        .await
    }

    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        self.chat(vec![
            ChatMessage {
                role: "system",
                content: system,
            },
            ChatMessage {
                role: "user",
                content: prompt,
            },
        ])
        .await
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
