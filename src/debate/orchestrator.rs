//! Debate state machine.
//!
//! Rounds run strictly in sequence: round `r` is generated, posted under
//! round `r - 1`'s comment, and only then does round `r + 1` start. The
//! citation catalog is rendered once per debate.

use super::catalog::render_citation_catalog;
use super::roles::{DebateRole, RoleAssignment, MAX_ROLE_ROUNDS};
use super::{DebateRecord, DebateRequest, DebateRoundRecord, DebateStatus};
use crate::agents::AgentProfile;
use crate::comments::{CommentService, CreatedComment};
use crate::content::{CommentContent, CommentPrompt, ContentGenerator};
use crate::research::DossierStore;
use crate::run::{create_run_id, RunContext};
use crate::types::Result;
use chrono::Utc;
use std::sync::Arc;

pub struct DebateOrchestrator {
    content: ContentGenerator,
    comments: Arc<dyn CommentService>,
    dossiers: Arc<dyn DossierStore>,
}

impl DebateOrchestrator {
    pub fn new(
        content: ContentGenerator,
        comments: Arc<dyn CommentService>,
        dossiers: Arc<dyn DossierStore>,
    ) -> Self {
        Self {
            content,
            comments,
            dossiers,
        }
    }

    /// Assign roles from the run's roster, then debate.
    pub async fn run(
        &self,
        ctx: &mut RunContext,
        request: &DebateRequest,
    ) -> Result<Option<DebateRecord>> {
        let assignment = {
            let mut rng = rand::rng();
            RoleAssignment::select(&ctx.roster, &request.post.agent_id, &mut rng)
        };
        self.run_with_assignment(ctx, request, &assignment).await
    }

    /// Debate with fixed role slots.
    ///
    /// Returns `Ok(None)` when no round was produced. On a collaborator
    /// error after at least one round, the partial record is appended to
    /// `ctx` before the error is returned.
    pub async fn run_with_assignment(
        &self,
        ctx: &mut RunContext,
        request: &DebateRequest,
        assignment: &RoleAssignment,
    ) -> Result<Option<DebateRecord>> {
        let post = &request.post;
        let cap = request.max_rounds.min(MAX_ROLE_ROUNDS);
        let catalog =
            render_citation_catalog(ctx.latest_artifact_for(&post.id), self.dossiers.as_ref())
                .await;

        let mut record = DebateRecord {
            id: create_run_id("debate"),
            post_id: post.id.clone(),
            created_at: Utc::now(),
            status: DebateStatus::Partial,
            rounds: Vec::new(),
        };
        let mut parent: Option<String> = None;
        let mut transcript = String::new();

        for round in 1..=cap {
            let Some(agent) = assignment.for_round(round) else {
                tracing::info!(post_id = %post.id, round, "No agent for round, stopping debate");
                break;
            };
            let role = DebateRole::for_round(round);

            let ctx_prompt = CommentPrompt {
                post_title: &post.title,
                post_excerpt: &post.excerpt,
                role,
                round,
                prior_thread: &transcript,
                citation_catalog: &catalog,
            };
            let outcome = self
                .play_round(agent, &post.id, &ctx_prompt, parent.as_deref())
                .await;

            let (round_record, markdown) = match outcome {
                Ok((created, content)) => (
                    DebateRoundRecord {
                        round,
                        agent_id: agent.id.clone(),
                        comment_id: created.id,
                        created_at: created.created_at,
                        parent_comment_id: parent.clone(),
                        citation_count: content.citations_used.len(),
                    },
                    content.comment_markdown,
                ),
                Err(e) => {
                    tracing::error!(
                        post_id = %post.id,
                        round,
                        agent_id = %agent.id,
                        error = %e,
                        "Debate round failed"
                    );
                    if !record.rounds.is_empty() {
                        ctx.result.debates.push(record);
                    }
                    return Err(e);
                }
            };

            tracing::info!(
                post_id = %post.id,
                round,
                role = role.as_str(),
                agent_id = %agent.id,
                comment_id = %round_record.comment_id,
                "Debate round posted"
            );

            let entry = format!("[Round {} - {}] {}", round, agent.name, markdown);
            if transcript.is_empty() {
                transcript = entry;
            } else {
                transcript = format!("{}\n{}", transcript, entry);
            }
            parent = Some(round_record.comment_id.clone());
            record.rounds.push(round_record);
        }

        if record.rounds.is_empty() {
            return Ok(None);
        }

        let produced = record.rounds.len() as u32;
        record.status = if produced == cap && cap == MAX_ROLE_ROUNDS {
            DebateStatus::Completed
        } else {
            DebateStatus::Partial
        };
        ctx.result.debates.push(record.clone());
        Ok(Some(record))
    }

    async fn play_round(
        &self,
        agent: &AgentProfile,
        post_id: &str,
        prompt: &CommentPrompt<'_>,
        parent: Option<&str>,
    ) -> Result<(CreatedComment, CommentContent)> {
        let content = self.content.generate_agent_comment(agent, prompt).await?;
        let created = self
            .comments
            .create(post_id, &agent.id, &content.comment_markdown, parent)
            .await?;
        Ok((created, content))
    }
}
