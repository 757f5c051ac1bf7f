//! Content generation and citation gating.
//!
//! [`ContentGenerator`] produces blog posts, debate comments, and human
//! replies. Blog bodies pass through [`validate_post_citations`] before they
//! leave this module.

pub mod citations;
pub mod generator;
pub mod prompts;

pub use citations::{validate_post_citations, CitationReport};
pub use generator::{BlogPostContent, CommentContent, ContentGenerator, HumanReplyContent};
pub use prompts::CommentPrompt;
