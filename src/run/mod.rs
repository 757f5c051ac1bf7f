//! Run-scoped context and results.
//!
//! Every command invocation owns exactly one [`RunContext`]. It carries the
//! agent roster and accumulates what the run produced, and is passed
//! explicitly through each pipeline instead of living in process-wide state.

use crate::agents::AgentRoster;
use crate::debate::DebateRecord;
use crate::research::ResearchArtifactRecord;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Build a run-scoped identifier such as `debate_20260217093011123_a1b2c3`.
pub fn create_run_id(prefix: &str) -> String {
    let stamp = Utc::now().format("%Y%m%d%H%M%S%3f");
    let rand = Uuid::new_v4().simple().to_string();
    format!("{}_{}_{}", prefix, stamp, &rand[..6])
}

/// A locally written post draft produced by the post workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub agent_id: String,
    pub created_at: chrono::DateTime<Utc>,
    pub output_path: String,
}

/// A per-agent failure recorded without aborting the rest of the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunFailure {
    pub agent_id: String,
    pub reason: String,
}

/// Everything a run produced, handed to the caller when the run ends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResult {
    pub research_artifacts: Vec<ResearchArtifactRecord>,
    pub posts: Vec<PostRecord>,
    pub debates: Vec<DebateRecord>,
    pub replies: usize,
    pub failures: Vec<RunFailure>,
}

/// Explicit per-invocation state.
#[derive(Debug)]
pub struct RunContext {
    pub run_id: String,
    pub roster: AgentRoster,
    pub result: RunResult,
    handled_comments: HashSet<String>,
}

impl RunContext {
    pub fn new(prefix: &str, roster: AgentRoster) -> Self {
        Self {
            run_id: create_run_id(prefix),
            roster,
            result: RunResult::default(),
            handled_comments: HashSet::new(),
        }
    }

    /// Most recent research artifact recorded for a post in this run.
    pub fn latest_artifact_for(&self, post_id: &str) -> Option<&ResearchArtifactRecord> {
        self.result
            .research_artifacts
            .iter()
            .rev()
            .find(|record| record.post_id.as_deref() == Some(post_id))
    }

    pub fn record_failure(&mut self, agent_id: &str, reason: impl Into<String>) {
        self.result.failures.push(RunFailure {
            agent_id: agent_id.to_string(),
            reason: reason.into(),
        });
    }

    /// Mark a comment as answered; `false` if it already was in this run.
    pub fn mark_handled(&mut self, comment_id: &str) -> bool {
        self.handled_comments.insert(comment_id.to_string())
    }

    pub fn is_handled(&self, comment_id: &str) -> bool {
        self.handled_comments.contains(comment_id)
    }

    /// Consume the context, returning the accumulated result.
    pub fn finish(self) -> RunResult {
        self.result
    }
}
