//! Wire types for the OpenAI Responses API.
//!
//! Only the subset the research collector sends is modeled: a plain text
//! input, hosted web search, and a strict JSON-schema output format.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct ResponsesRequest {
    pub model: String,
    pub input: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ResponseTool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextConfig>,
}

impl ResponsesRequest {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            model: String::new(),
            input: input.into(),
            tools: Vec::new(),
            text: None,
        }
    }

    pub fn with_tool(mut self, tool: ResponseTool) -> Self {
        self.tools.push(tool);
        self
    }

    /// Constrain the output to a strict JSON schema.
    pub fn with_json_schema(mut self, name: impl Into<String>, schema: serde_json::Value) -> Self {
        self.text = Some(TextConfig {
            format: TextFormat::JsonSchema {
                name: name.into(),
                strict: true,
                schema,
            },
        });
        self
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseTool {
    WebSearchPreview {
        search_context_size: SearchContextSize,
        #[serde(skip_serializing_if = "Option::is_none")]
        user_location: Option<UserLocation>,
    },
}

impl ResponseTool {
    /// High-context web search localized to a country and IANA timezone.
    pub fn web_search(country: impl Into<String>, timezone: impl Into<String>) -> Self {
        ResponseTool::WebSearchPreview {
            search_context_size: SearchContextSize::High,
            user_location: Some(UserLocation::Approximate {
                country: country.into(),
                timezone: timezone.into(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchContextSize {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UserLocation {
    Approximate { country: String, timezone: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct TextConfig {
    pub format: TextFormat,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextFormat {
    JsonSchema {
        name: String,
        strict: bool,
        schema: serde_json::Value,
    },
}

/// The parts of a Responses API reply the client reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponsesOutput {
    #[serde(default)]
    pub output: Vec<OutputItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputItem {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub content: Vec<OutputContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputContent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl ResponsesOutput {
    /// Concatenated `output_text` parts of every message item. Tool calls
    /// such as `web_search_call` carry no text and are skipped.
    pub fn output_text(&self) -> String {
        self.output
            .iter()
            .filter(|item| item.kind == "message")
            .flat_map(|item| &item.content)
            .filter(|part| part.kind == "output_text")
            .filter_map(|part| part.text.as_deref())
            .collect()
    }
}
