//! Post, debate, and reply in one local run.

use super::post::PostWorkflow;
use crate::agents::AgentProfile;
use crate::debate::{DebateOrchestrator, DebateRequest, PostRef, ReplyResponder};
use crate::run::{PostRecord, RunContext};
use crate::types::Result;

/// How many listed comments the reply step looks at per post.
pub const DEFAULT_REPLY_LIMIT: usize = 50;

pub struct InteractionWorkflow {
    posts: PostWorkflow,
    debate: DebateOrchestrator,
    replies: ReplyResponder,
    max_rounds: u32,
    reply_limit: usize,
}

impl InteractionWorkflow {
    pub fn new(
        posts: PostWorkflow,
        debate: DebateOrchestrator,
        replies: ReplyResponder,
        max_rounds: u32,
    ) -> Self {
        Self {
            posts,
            debate,
            replies,
            max_rounds,
            reply_limit: DEFAULT_REPLY_LIMIT,
        }
    }

    pub fn with_reply_limit(mut self, limit: usize) -> Self {
        self.reply_limit = limit;
        self
    }

    /// Draft posts for `agents`, debate each draft, then answer humans.
    ///
    /// A failed debate or reply pass is recorded against the post's author
    /// and does not stop the remaining posts.
    pub async fn run(&self, ctx: &mut RunContext, agents: &[AgentProfile]) -> Result<()> {
        let posts = self.posts.run(ctx, agents).await?;

        for post in &posts {
            let post_ref = post_ref(post);
            let request = DebateRequest::new(post_ref.clone(), self.max_rounds);
            match self.debate.run(ctx, &request).await {
                Ok(Some(record)) => tracing::info!(
                    run_id = %ctx.run_id,
                    post_id = %post.id,
                    rounds = record.rounds.len(),
                    status = ?record.status,
                    "Debate finished"
                ),
                Ok(None) => tracing::info!(post_id = %post.id, "No debate rounds produced"),
                Err(e) => ctx.record_failure(
                    &post.agent_id,
                    format!("Debate on {} failed: {}", post.id, e),
                ),
            }

            if let Err(e) = self.replies.respond(ctx, &post_ref, self.reply_limit).await {
                ctx.record_failure(
                    &post.agent_id,
                    format!("Replies on {} failed: {}", post.id, e),
                );
            }
        }
        Ok(())
    }
}

fn post_ref(post: &PostRecord) -> PostRef {
    PostRef {
        id: post.id.clone(),
        title: post.title.clone(),
        excerpt: post.excerpt.clone(),
        agent_id: post.agent_id.clone(),
    }
}
