//! Shared fixtures for integration tests.

#![allow(dead_code)]

pub mod mocks;

use serde_json::json;
use symposium::agents::{AgentProfile, AgentRoster};
use symposium::research::{RawResearchClaim, RawResearchResult, RawResearchSource};

pub fn agent(id: &str) -> AgentProfile {
    let name = format!("{}{}", id[..1].to_uppercase(), &id[1..]);
    AgentProfile::new(id, &name, "AI practitioner").with_voice("direct", "pragmatic")
}

pub fn roster(ids: &[&str]) -> AgentRoster {
    AgentRoster::new(ids.iter().map(|id| agent(id)).collect())
}

pub fn raw_source(url: &str, title: &str) -> RawResearchSource {
    RawResearchSource {
        url: url.to_string(),
        title: title.to_string(),
        summary: None,
        published_at: None,
    }
}

pub fn raw_claim(text: &str, urls: &[&str]) -> RawResearchClaim {
    RawResearchClaim {
        text: text.to_string(),
        source_urls: urls.iter().map(|u| u.to_string()).collect(),
    }
}

/// An AI-focused raw result with three distinct domains and one supported claim.
pub fn ai_research() -> RawResearchResult {
    RawResearchResult {
        topic: "Large language model evaluation in 2026".to_string(),
        summary: "New benchmarks for LLM reasoning were released this month.".to_string(),
        sources: vec![
            raw_source("https://alpha.ai/eval", "Alpha eval suite"),
            raw_source("https://beta.org/report", "Beta report"),
            raw_source("https://gamma.io/paper", "Gamma paper"),
        ],
        claims: vec![raw_claim(
            "Alpha released a new reasoning benchmark",
            &["https://alpha.ai/eval"],
        )],
    }
}

/// Body that passes citation checks against three sources.
pub fn cited_body() -> String {
    let intro = "Agent tooling matured quickly this quarter, and teams are adjusting how they ship. "
        .repeat(3);
    format!(
        "{}The new suite covers 12 reasoning tasks [1]. A follow-up report confirmed the gains [2].\n\n## Sources\n[1] Alpha eval suite https://alpha.ai/eval\n[2] Beta report https://beta.org/report",
        intro
    )
}

/// Body long enough for the shape check but with no Sources heading.
pub fn uncited_body() -> String {
    "Agent tooling matured quickly this quarter, and teams are adjusting how they ship. ".repeat(4)
}

pub fn blog_json(body: &str) -> String {
    json!({
        "title": "Evaluating LLM reasoning",
        "outline": ["What changed", "Why it matters", "What to do"],
        "bodyMarkdown": body,
        "excerpt": "New reasoning benchmarks and what they mean for teams.",
    })
    .to_string()
}

pub fn comment_json(markdown: &str, citations: &[u32]) -> String {
    json!({
        "commentMarkdown": markdown,
        "stanceSummary": "cautious",
        "citationsUsed": citations,
    })
    .to_string()
}

pub fn reply_json(markdown: &str) -> String {
    json!({
        "replyMarkdown": markdown,
        "followUpQuestion": "What would you measure first?",
    })
    .to_string()
}
