//! Environment-driven configuration.
//!
//! [`AppConfig::from_env`] reads the process environment (after loading a
//! `.env` file if present). Tests go through [`AppConfig::from_lookup`] with
//! a map so the process environment is never touched.

use crate::llm::Provider;
use crate::research::{PipelineOptions, DEFAULT_RESEARCH_TIMEZONE};
use crate::types::{AppError, Result};
use serde::Serialize;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_IMAGE_STYLE: &str = "futuristic minimal, crisp, editorial, high contrast";

#[derive(Debug, Clone, Serialize)]
pub struct AppConfig {
    #[serde(skip_serializing)]
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub research_model: String,
    /// IANA timezone sent with the web-search location hint.
    pub research_timezone: String,
    pub agents_dir: PathBuf,
    pub research_path: PathBuf,
    pub local_drafts_path: PathBuf,
    pub comments_path: PathBuf,
    pub min_sources_per_post: usize,
    pub max_source_age_days: u32,
    pub max_research_attempts: u32,
    pub max_debate_rounds: u32,
    pub image_style: String,
    pub log_level: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup, collecting every invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let mut issues = Vec::new();
        let min_sources_per_post =
            parse_bounded(&lookup, "MIN_SOURCES_PER_POST", 5usize, 1, None, &mut issues);
        let max_source_age_days =
            parse_bounded(&lookup, "MAX_SOURCE_AGE_DAYS", 365u32, 1, None, &mut issues);
        let max_research_attempts =
            parse_bounded(&lookup, "MAX_RESEARCH_ATTEMPTS", 2u32, 1, None, &mut issues);
        let max_debate_rounds =
            parse_bounded(&lookup, "MAX_DEBATE_ROUNDS", 3u32, 1, Some(10), &mut issues);

        if !issues.is_empty() {
            return Err(AppError::Configuration(format!(
                "Invalid configuration: {}",
                issues.join("; ")
            )));
        }

        Ok(Self {
            openai_api_key: lookup("OPENAI_API_KEY").filter(|k| !k.trim().is_empty()),
            openai_base_url: text("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            openai_model: text("OPENAI_MODEL", "gpt-4o-mini"),
            research_model: text("RESEARCH_MODEL", "gpt-4.1-mini"),
            research_timezone: text("RESEARCH_TIMEZONE", DEFAULT_RESEARCH_TIMEZONE),
            agents_dir: PathBuf::from(text("AGENTS_DIR", "config/agents")),
            research_path: PathBuf::from(text("RESEARCH_PATH", "./data/research")),
            local_drafts_path: PathBuf::from(text("LOCAL_DRAFTS_PATH", "./data/local-drafts")),
            comments_path: PathBuf::from(text("COMMENTS_PATH", "./data/comments.jsonl")),
            min_sources_per_post,
            max_source_age_days,
            max_research_attempts,
            max_debate_rounds,
            image_style: text("IMAGE_STYLE", DEFAULT_IMAGE_STYLE),
            log_level: text("LOG_LEVEL", "info"),
        })
    }

    pub fn require_api_key(&self) -> Result<&str> {
        self.openai_api_key.as_deref().ok_or_else(|| {
            AppError::Configuration(
                "Invalid configuration: OPENAI_API_KEY is required for this command".to_string(),
            )
        })
    }

    /// Provider for posts, comments, and replies.
    pub fn content_provider(&self) -> Result<Provider> {
        self.provider_for(&self.openai_model)
    }

    /// Provider for research collection.
    pub fn research_provider(&self) -> Result<Provider> {
        self.provider_for(&self.research_model)
    }

    fn provider_for(&self, model: &str) -> Result<Provider> {
        Ok(Provider::OpenAI {
            api_key: self.require_api_key()?.to_string(),
            api_base: self.openai_base_url.clone(),
            model: model.to_string(),
        })
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            min_sources: self.min_sources_per_post,
            max_source_age_days: self.max_source_age_days,
            max_attempts: self.max_research_attempts,
        }
    }
}

fn parse_bounded<T, F>(
    lookup: &F,
    key: &str,
    default: T,
    min: T,
    max: Option<T>,
    issues: &mut Vec<String>,
) -> T
where
    T: FromStr + PartialOrd + Copy + std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) else {
        return default;
    };
    let Ok(value) = raw.parse::<T>() else {
        issues.push(format!("{} must be an integer (got '{}')", key, raw));
        return default;
    };
    if value < min {
        issues.push(format!("{} must be at least {}", key, min));
    } else if let Some(max) = max.filter(|max| value > *max) {
        issues.push(format!("{} must be at most {}", key, max));
    }
    value
}
