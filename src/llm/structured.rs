//! Structured (JSON) generation.
//!
//! The model is asked for a JSON object; the reply is parsed into `T` and
//! checked against `T`'s declared shape. Parse or shape failures are retried
//! up to `max_attempts` times, after which the last failure is returned as a
//! single opaque [`AppError::LLM`].

use crate::llm::LLMClient;
use crate::types::{AppError, Result};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Default number of model calls per structured generation.
pub const DEFAULT_ATTEMPTS: usize = 2;

/// Declared shape constraints beyond what deserialization enforces.
pub trait Shape {
    /// Describe the first violated constraint, if any.
    fn check(&self) -> std::result::Result<(), String>;
}

/// Shared helper for minimum-length string fields.
pub fn require_min_chars(field: &str, value: &str, min: usize) -> std::result::Result<(), String> {
    if value.chars().count() < min {
        return Err(format!("{} must be at least {} characters", field, min));
    }
    Ok(())
}

/// Content-generation collaborator: prompt in, shaped value out.
#[derive(Clone)]
pub struct StructuredGenerator {
    client: Arc<dyn LLMClient>,
    max_attempts: usize,
}

impl StructuredGenerator {
    pub fn new(client: Arc<dyn LLMClient>) -> Self {
        Self {
            client,
            max_attempts: DEFAULT_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn model_name(&self) -> &str {
        self.client.model_name()
    }

    pub async fn generate<T>(&self, prompt: &str) -> Result<T>
    where
        T: DeserializeOwned + Shape,
    {
        let mut last_error = None;
        for attempt in 1..=self.max_attempts {
            match self.attempt::<T>(prompt).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::debug!(attempt, error = %e, "Structured generation attempt failed");
                    last_error = Some(e);
                }
            }
        }
        Err(last_error
            .unwrap_or_else(|| AppError::LLM("Failed to generate valid JSON output.".to_string())))
    }

    async fn attempt<T>(&self, prompt: &str) -> Result<T>
    where
        T: DeserializeOwned + Shape,
    {
        let text = self.client.generate(prompt).await?;
        let value = parse_json_object(&text)?;
        let parsed: T = serde_json::from_value(value).map_err(|e| shape_mismatch(e.to_string()))?;
        parsed.check().map_err(shape_mismatch)?;
        Ok(parsed)
    }
}

fn shape_mismatch(reason: String) -> AppError {
    AppError::LLM(format!("Model output did not match expected shape: {}", reason))
}

/// Parse model output as JSON, falling back to the outermost `{...}` span.
pub fn parse_json_object(text: &str) -> Result<serde_json::Value> {
    if let Ok(value) = serde_json::from_str(text.trim()) {
        return Ok(value);
    }
    let start = text.find('{');
    let end = text.rfind('}');
    match (start, end) {
        (Some(start), Some(end)) if start < end => serde_json::from_str(&text[start..=end])
            .map_err(|e| AppError::LLM(format!("Model output was not valid JSON: {}", e))),
        _ => Err(AppError::LLM(
            "Model output did not contain a JSON object.".to_string(),
        )),
    }
}
