//! LLM Provider Clients and Abstractions
//!
//! This module is the content-generation seam. Everything that talks to a
//! model goes through the [`LLMClient`] trait, so tests and alternative
//! providers can be swapped in without touching the pipelines.
//!
//! # Architecture
//!
//! - [`LLMClient`] - The core trait that all providers implement
//! - [`Provider`] - Runtime provider selection
//! - [`openai::OpenAIClient`] - `async-openai` backed client, also used
//!   directly for web-search research through the Responses API
//! - [`StructuredGenerator`] - Prompt-in, typed-and-shape-checked-value-out
//!   wrapper with a bounded internal retry
//!
//! # Example
//!
//! ```ignore
//! use symposium::llm::{Provider, StructuredGenerator};
//!
//! let client = Provider::OpenAI {
//!     api_key: "sk-...".to_string(),
//!     api_base: "https://api.openai.com/v1".to_string(),
//!     model: "gpt-4o-mini".to_string(),
//! }
//! .create_client()?;
//!
//! let generator = StructuredGenerator::new(client.into());
//! let comment: CommentContent = generator.generate(&prompt).await?;
//! ```

/// Core LLM client trait and provider selection.
pub mod client;
/// OpenAI-compatible chat completions and Responses API client.
pub mod openai;
/// Responses API wire types.
pub mod responses;
/// JSON-shaped generation with validation and retry.
pub mod structured;

pub use client::{LLMClient, Provider};
pub use structured::{Shape, StructuredGenerator};
