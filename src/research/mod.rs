//! Research validation pipeline
//!
//! Turns an unstructured research result into a citation-backed dossier.
//!
//! # Architecture
//!
//! - [`collector::WebSearchCollector`] - Web-search-grounded raw research
//! - [`normalize`] - URL canonicalization, per-domain dedup, recency filter
//! - [`linker::ClaimLinker`] - Claim to validated-source linkage
//! - [`relevance::RelevancePredicate`] - Pluggable topic gate
//! - [`validator::ResearchValidator`] - Quality gates, produces a [`ValidatedDossier`]
//! - [`pipeline::ResearchPipeline`] - Bounded collect → validate → persist retries
//!
//! # Usage
//!
//! ```ignore
//! use symposium::research::{
//!     FsDossierStore, PipelineOptions, ResearchPipeline, WebSearchCollector,
//! };
//!
//! let pipeline = ResearchPipeline::new(
//!     Arc::new(WebSearchCollector::new(openai_client, "America/New_York")),
//!     Arc::new(FsDossierStore::new("./data/research")),
//!     PipelineOptions::default(),
//! );
//! let run = pipeline.run(&agent).await?;
//! println!("{} sources, attempt {}", run.dossier.sources.len(), run.attempts);
//! ```

/// Dossier persistence and Markdown rendering.
pub mod artifacts;
/// Raw research collection.
pub mod collector;
/// Claim linkage.
pub mod linker;
/// Source normalization.
pub mod normalize;
/// Retry pipeline.
pub mod pipeline;
/// Topic relevance gate.
pub mod relevance;
/// Research data model.
pub mod types;
/// Quality-gate validator.
pub mod validator;

pub use artifacts::{render_dossier_markdown, DossierStore, FsDossierStore};
pub use collector::{
    CollectOptions, ResearchCollector, WebSearchCollector, DEFAULT_RESEARCH_TIMEZONE,
};
pub use linker::ClaimLinker;
pub use pipeline::{PipelineOptions, ResearchPipeline, ResearchRun};
pub use relevance::{KeywordRelevance, RelevancePredicate};
pub use types::{
    ArtifactFiles, ClaimStatus, RawResearchClaim, RawResearchResult, RawResearchSource,
    ResearchArtifactRecord, ResearchClaim, ResearchSource, ValidatedDossier,
};
pub use validator::{ResearchValidator, ValidateOptions};
