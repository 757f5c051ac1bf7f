//! Bounded multi-round debate over a post.
//!
//! Each round one agent, in a fixed role, adds a comment threaded under the
//! previous round's comment. See [`orchestrator::DebateOrchestrator`] for the
//! state machine and [`replies::ReplyResponder`] for answering human readers.

pub mod catalog;
pub mod orchestrator;
pub mod replies;
pub mod roles;

pub use catalog::{render_citation_catalog, NO_CATALOG};
pub use orchestrator::DebateOrchestrator;
pub use replies::ReplyResponder;
pub use roles::{DebateRole, RoleAssignment, MAX_ROLE_ROUNDS};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebateStatus {
    Completed,
    Partial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebateRoundRecord {
    /// 1-based
    pub round: u32,
    pub agent_id: String,
    pub comment_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_comment_id: Option<String>,
    pub citation_count: usize,
}

/// One debate on one post. Never recorded with zero rounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebateRecord {
    pub id: String,
    pub post_id: String,
    pub created_at: DateTime<Utc>,
    pub status: DebateStatus,
    pub rounds: Vec<DebateRoundRecord>,
}

/// The post being discussed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRef {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    /// Author of the post; takes the rebuttal slot
    pub agent_id: String,
}

#[derive(Debug, Clone)]
pub struct DebateRequest {
    pub post: PostRef,
    /// Requested rounds; capped at [`MAX_ROLE_ROUNDS`]
    pub max_rounds: u32,
}

impl DebateRequest {
    pub fn new(post: PostRef, max_rounds: u32) -> Self {
        Self { post, max_rounds }
    }
}
