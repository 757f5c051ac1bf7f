//! Bounded collect → validate → persist loop.

use super::artifacts::DossierStore;
use super::collector::{CollectOptions, ResearchCollector};
use super::types::{ArtifactFiles, ValidatedDossier};
use super::validator::{ResearchValidator, ValidateOptions};
use crate::agents::AgentProfile;
use crate::types::{AppError, Result};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub min_sources: usize,
    pub max_source_age_days: u32,
    /// Values below 1 are treated as 1
    pub max_attempts: u32,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            min_sources: 5,
            max_source_age_days: 365,
            max_attempts: 2,
        }
    }
}

/// Outcome of a successful pipeline run.
#[derive(Debug, Clone)]
pub struct ResearchRun {
    pub dossier: ValidatedDossier,
    pub artifacts: ArtifactFiles,
    /// 1-based attempt that succeeded
    pub attempts: u32,
}

pub struct ResearchPipeline {
    collector: Arc<dyn ResearchCollector>,
    store: Arc<dyn DossierStore>,
    validator: ResearchValidator,
    options: PipelineOptions,
}

impl ResearchPipeline {
    pub fn new(
        collector: Arc<dyn ResearchCollector>,
        store: Arc<dyn DossierStore>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            collector,
            store,
            validator: ResearchValidator::new(),
            options,
        }
    }

    /// Replace the default AI-topic validator, e.g. with a custom relevance predicate.
    pub fn with_validator(mut self, validator: ResearchValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Run attempts until one succeeds, then re-raise the last error if none did.
    ///
    /// Attempts are sequential with no delay; a failed attempt leaves nothing
    /// behind.
    pub async fn run(&self, agent: &AgentProfile) -> Result<ResearchRun> {
        let max_attempts = self.options.max_attempts.max(1);
        let mut last_error = None;

        for attempt in 1..=max_attempts {
            match self.attempt(agent).await {
                Ok((dossier, artifacts)) => {
                    tracing::info!(
                        agent_id = %agent.id,
                        attempt,
                        sources = dossier.sources.len(),
                        "Research pipeline succeeded"
                    );
                    return Ok(ResearchRun {
                        dossier,
                        artifacts,
                        attempts: attempt,
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        agent_id = %agent.id,
                        attempt,
                        max_attempts,
                        error = %e,
                        "Research attempt failed"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| AppError::Internal("Research pipeline failed.".to_string())))
    }

    async fn attempt(&self, agent: &AgentProfile) -> Result<(ValidatedDossier, ArtifactFiles)> {
        let PipelineOptions {
            min_sources,
            max_source_age_days,
            ..
        } = self.options;
        let collect = CollectOptions::new(min_sources, max_source_age_days);
        let raw = self.collector.collect(agent, &collect).await?;
        let validate = ValidateOptions::new(min_sources, max_source_age_days).at(collect.now);
        let dossier = self.validator.validate(agent, &raw, &validate)?;
        let artifacts = self.store.persist(&dossier).await?;
        Ok((dossier, artifacts))
    }
}
