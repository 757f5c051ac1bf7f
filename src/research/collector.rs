//! Research collection.
//!
//! The collector is the pipeline's only source of raw research. The default
//! implementation runs a web-search-grounded Responses API call and checks the
//! raw shape of its JSON before the validator ever sees it.

use super::types::RawResearchResult;
use crate::agents::AgentProfile;
use crate::llm::openai::OpenAIClient;
use crate::llm::responses::{ResponseTool, ResponsesRequest};
use crate::llm::structured::require_min_chars;
use crate::llm::{LLMClient, Shape};
use crate::types::{AppError, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::json;

/// Hints forwarded to the collector for one attempt.
#[derive(Debug, Clone)]
pub struct CollectOptions {
    pub min_sources: usize,
    pub max_source_age_days: u32,
    pub now: DateTime<Utc>,
}

impl CollectOptions {
    pub fn new(min_sources: usize, max_source_age_days: u32) -> Self {
        Self {
            min_sources,
            max_source_age_days,
            now: Utc::now(),
        }
    }
}

#[async_trait]
pub trait ResearchCollector: Send + Sync {
    async fn collect(
        &self,
        agent: &AgentProfile,
        options: &CollectOptions,
    ) -> Result<RawResearchResult>;
}

impl Shape for RawResearchResult {
    fn check(&self) -> std::result::Result<(), String> {
        require_min_chars("topic", &self.topic, 10)?;
        require_min_chars("summary", &self.summary, 20)?;
        if self.sources.is_empty() {
            return Err("sources must contain at least 1 item".to_string());
        }
        for (i, source) in self.sources.iter().enumerate() {
            if url::Url::parse(&source.url).is_err() {
                return Err(format!("sources[{}].url is not an absolute URL", i));
            }
            if source.title.trim().is_empty() {
                return Err(format!("sources[{}].title must not be empty", i));
            }
        }
        if self.claims.is_empty() {
            return Err("claims must contain at least 1 item".to_string());
        }
        for (i, claim) in self.claims.iter().enumerate() {
            require_min_chars(&format!("claims[{}].text", i), &claim.text, 10)?;
            if claim.source_urls.is_empty() {
                return Err(format!("claims[{}].sourceUrls must contain at least 1 item", i));
            }
            if claim
                .source_urls
                .iter()
                .any(|u| url::Url::parse(u).is_err())
            {
                return Err(format!("claims[{}].sourceUrls contains an invalid URL", i));
            }
        }
        Ok(())
    }
}

/// Default timezone for the web-search location hint.
pub const DEFAULT_RESEARCH_TIMEZONE: &str = "America/New_York";

const SEARCH_COUNTRY: &str = "US";
const SCHEMA_NAME: &str = "research_dossier";

/// Collector backed by hosted web search through the Responses API.
///
/// The model is asked for a strict-schema JSON dossier, so sources come from
/// live search results rather than model recall.
pub struct WebSearchCollector {
    client: OpenAIClient,
    timezone: String,
}

impl WebSearchCollector {
    pub fn new(client: OpenAIClient, timezone: impl Into<String>) -> Self {
        Self {
            client,
            timezone: timezone.into(),
        }
    }
}

#[async_trait]
impl ResearchCollector for WebSearchCollector {
    async fn collect(
        &self,
        agent: &AgentProfile,
        options: &CollectOptions,
    ) -> Result<RawResearchResult> {
        tracing::debug!(
            agent_id = %agent.id,
            model = self.client.model_name(),
            timezone = %self.timezone,
            "Collecting research with web search"
        );
        let request = ResponsesRequest::new(build_research_prompt(agent, options))
            .with_tool(ResponseTool::web_search(SEARCH_COUNTRY, &self.timezone))
            .with_json_schema(SCHEMA_NAME, research_schema());

        let text = self.client.respond(request).await?;
        if text.is_empty() {
            return Err(AppError::LLM(
                "Research response did not include output text.".to_string(),
            ));
        }
        parse_research(&text)
    }
}

/// Parse collector output and check its raw shape.
pub fn parse_research(text: &str) -> Result<RawResearchResult> {
    let raw: RawResearchResult = serde_json::from_str(text)
        .map_err(|e| AppError::LLM(format!("Research response is not valid JSON: {}", e)))?;
    raw.check().map_err(|reason| {
        AppError::LLM(format!("Research response did not match expected shape: {}", reason))
    })?;
    Ok(raw)
}

/// JSON schema the Responses API must follow for a research dossier.
pub fn research_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "additionalProperties": false,
        "required": ["topic", "summary", "sources", "claims"],
        "properties": {
            "topic": { "type": "string" },
            "summary": { "type": "string" },
            "sources": {
                "type": "array",
                "items": {
                    "type": "object",
                    "additionalProperties": false,
                    "required": ["url", "title"],
                    "properties": {
                        "url": { "type": "string" },
                        "title": { "type": "string" },
                        "summary": { "type": "string" },
                        "publishedAt": { "type": "string" }
                    }
                }
            },
            "claims": {
                "type": "array",
                "items": {
                    "type": "object",
                    "additionalProperties": false,
                    "required": ["text", "sourceUrls"],
                    "properties": {
                        "text": { "type": "string" },
                        "sourceUrls": { "type": "array", "items": { "type": "string" } }
                    }
                }
            }
        }
    })
}

pub fn build_research_prompt(agent: &AgentProfile, options: &CollectOptions) -> String {
    [
        format!("You are {}, {}.", agent.name, agent.persona),
        "Research only latest AI developments before writing.".to_string(),
        "Focus on AI research papers, model and product launches, benchmarks, policy/safety updates, and major AI industry moves.".to_string(),
        "Exclude topics that are not materially about artificial intelligence.".to_string(),
        format!(
            "Today's date is {}.",
            options.now.to_rfc3339_opts(SecondsFormat::Millis, true)
        ),
        format!(
            "Use web search and provide at least {} distinct primary/reputable sources.",
            options.min_sources
        ),
        format!(
            "Prefer sources published within the last {} days when available.",
            options.max_source_age_days
        ),
        "Prioritize items that include concrete dates, measurements, and named organizations.".to_string(),
        "Return JSON only with fields: topic, summary, sources, claims.".to_string(),
        "Each source item: url, title, summary, publishedAt (ISO date when known).".to_string(),
        "Each claim item: text, sourceUrls (must reference URLs from sources).".to_string(),
        "Do not include unsupported claims. Do not include markdown.".to_string(),
    ]
    .join(" ")
}
