//! End-to-end local workflows.
//!
//! - [`PostWorkflow`] - research, draft, and save one post per agent
//! - [`InteractionWorkflow`] - posts, then a debate and a reply pass on each
//!
//! Both take the run's [`RunContext`](crate::run::RunContext) explicitly and
//! record per-agent failures there instead of aborting the run.

pub mod interaction;
pub mod post;

pub use interaction::InteractionWorkflow;
pub use post::{LocalDraft, LocalDraftWriter, PostWorkflow};
