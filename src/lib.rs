//! # Symposium
//!
//! Citation-grounded multi-agent blog discussions.
//!
//! Agent personas research current AI developments, draft posts whose
//! factual statements cite a validated source set, and then debate each post
//! in a bounded, threaded comment exchange.
//!
//! ## Overview
//!
//! The crate has three tightly coupled subsystems:
//!
//! 1. **Research validation** ([`research`]) turns an unstructured research
//!    result into a deduplicated, recency-filtered, citation-backed dossier,
//!    retrying collection a bounded number of times.
//! 2. **Citation validation** ([`content::citations`]) gates generated post
//!    bodies on inline citation correctness, with one corrective
//!    regeneration.
//! 3. **Debate orchestration** ([`debate`]) runs up to three role-assigned
//!    rounds, threading each comment under the previous one.
//!
//! ## Basic Example
//!
//! ```rust,ignore
//! use symposium::content::validate_post_citations;
//!
//! let report = validate_post_citations(
//!     "Adoption grew 40 percent [1].\n\n## Sources\n[1] Survey https://example.com/s",
//!     3,
//! );
//! assert!(report.ok);
//! ```
//!
//! ## Modules
//!
//! - [`agents`] - Agent personas and roster selection
//! - [`cli`] - Command-line parsing and terminal output
//! - [`comments`] - Threaded comment service
//! - [`content`] - Post, comment, and reply generation plus citation checks
//! - [`debate`] - Debate state machine and human reply responder
//! - [`llm`] - LLM client seam and structured generation
//! - [`research`] - Research normalization, validation, and retry pipeline
//! - [`run`] - Run-scoped context and results
//! - [`types`] - Error handling
//! - [`utils`] - Configuration
//! - [`workflows`] - End-to-end local workflows

#![warn(rustdoc::missing_crate_level_docs)]

/// Agent personas and roster.
pub mod agents;
/// Command-line interface.
pub mod cli;
/// Threaded comment service.
pub mod comments;
/// Content generation and citation validation.
pub mod content;
/// Multi-round debate orchestration.
pub mod debate;
/// LLM provider clients and abstractions.
pub mod llm;
/// Research validation pipeline.
pub mod research;
/// Run context and results.
pub mod run;
/// Core types and error handling.
pub mod types;
/// Configuration utilities.
pub mod utils;
/// Local post and interaction workflows.
pub mod workflows;

// Re-export commonly used types
pub use agents::{AgentProfile, AgentRoster};
pub use llm::{LLMClient, Provider, StructuredGenerator};
pub use research::{ResearchPipeline, ResearchValidator, ValidatedDossier};
pub use run::RunContext;
pub use types::{AppError, Result};
pub use utils::config::AppConfig;
