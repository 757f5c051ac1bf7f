//! Research quality gates.
//!
//! Turns a raw research result into a [`ValidatedDossier`] or rejects it.
//! The gates run in a fixed order: topic relevance, minimum distinct sources,
//! then at least one supported claim.

use super::linker::ClaimLinker;
use super::normalize::normalize_and_dedupe_sources;
use super::relevance::{KeywordRelevance, RelevancePredicate};
use super::types::{RawResearchResult, ResearchClaim, ValidatedDossier};
use crate::agents::AgentProfile;
use crate::run::create_run_id;
use crate::types::{AppError, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Options for a single validation call.
#[derive(Debug, Clone)]
pub struct ValidateOptions {
    pub min_sources: usize,
    pub max_source_age_days: u32,
    /// Reference time for recency filtering and `createdAt`; defaults to now
    pub now: Option<DateTime<Utc>>,
}

impl ValidateOptions {
    pub fn new(min_sources: usize, max_source_age_days: u32) -> Self {
        Self {
            min_sources,
            max_source_age_days,
            now: None,
        }
    }

    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }
}

/// Stateless validator; pure computation, no I/O.
#[derive(Clone)]
pub struct ResearchValidator {
    relevance: Arc<dyn RelevancePredicate>,
}

impl Default for ResearchValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ResearchValidator {
    /// Validator using the AI-domain keyword gate.
    pub fn new() -> Self {
        Self {
            relevance: Arc::new(KeywordRelevance::ai_focused()),
        }
    }

    /// Validator with a custom topic predicate.
    pub fn with_predicate(relevance: Arc<dyn RelevancePredicate>) -> Self {
        Self { relevance }
    }

    pub fn validate(
        &self,
        agent: &AgentProfile,
        raw: &RawResearchResult,
        options: &ValidateOptions,
    ) -> Result<ValidatedDossier> {
        if !self.relevance.is_relevant(&topic_text(raw)) {
            return Err(AppError::QualityGate(
                "Research quality gate failed: topic must be AI-focused and cover recent AI research or developments."
                    .to_string(),
            ));
        }

        let now = options.now.unwrap_or_else(Utc::now);
        let sources = normalize_and_dedupe_sources(&raw.sources, options.max_source_age_days, now);
        if sources.len() < options.min_sources {
            return Err(AppError::QualityGate(format!(
                "Research quality gate failed: {} valid sources found, requires at least {}.",
                sources.len(),
                options.min_sources
            )));
        }

        let claims = ClaimLinker::new(&sources).link(&raw.claims);
        let (supported_claims, dropped_claims): (Vec<ResearchClaim>, Vec<ResearchClaim>) =
            claims.iter().cloned().partition(ResearchClaim::is_supported);
        if supported_claims.is_empty() {
            return Err(AppError::QualityGate(
                "Research quality gate failed: no supported claims.".to_string(),
            ));
        }

        tracing::debug!(
            agent_id = %agent.id,
            sources = sources.len(),
            supported = supported_claims.len(),
            dropped = dropped_claims.len(),
            "Research passed quality gates"
        );

        Ok(ValidatedDossier {
            id: create_run_id("dossier"),
            agent_id: agent.id.clone(),
            topic: raw.topic.clone(),
            created_at: now,
            summary: raw.summary.clone(),
            sources,
            claims,
            supported_claims,
            dropped_claims,
        })
    }
}

/// Topic, summary, claim texts, and source titles/summaries, space-joined.
fn topic_text(raw: &RawResearchResult) -> String {
    let mut parts: Vec<String> = vec![raw.topic.clone(), raw.summary.clone()];
    parts.extend(raw.claims.iter().map(|claim| claim.text.clone()));
    parts.extend(raw.sources.iter().map(|source| {
        format!(
            "{} {}",
            source.title,
            source.summary.as_deref().unwrap_or_default()
        )
    }));
    parts.join(" ")
}
