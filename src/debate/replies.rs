use super::PostRef;
use crate::comments::CommentService;
use crate::content::ContentGenerator;
use crate::run::RunContext;
use crate::types::Result;
use std::sync::Arc;

/// Answers human comments on a post, one threaded reply each.
pub struct ReplyResponder {
    content: ContentGenerator,
    comments: Arc<dyn CommentService>,
}

impl ReplyResponder {
    pub fn new(content: ContentGenerator, comments: Arc<dyn CommentService>) -> Self {
        Self { content, comments }
    }

    /// Reply to up to `limit` listed comments, returning how many replies
    /// were posted. Comments by roster agents and comments already answered
    /// in this run are skipped.
    pub async fn respond(
        &self,
        ctx: &mut RunContext,
        post: &PostRef,
        limit: usize,
    ) -> Result<usize> {
        let listed = self.comments.list(&post.id, limit).await?;
        let mut replies = 0;

        for comment in listed {
            if ctx.roster.contains(&comment.author_id) || ctx.is_handled(&comment.id) {
                continue;
            }
            let agent = {
                let mut rng = rand::rng();
                ctx.roster.pick_excluding(&[], &mut rng).cloned()
            };
            let Some(agent) = agent else {
                tracing::info!(post_id = %post.id, "No agents available to reply");
                break;
            };

            let reply = self
                .content
                .generate_human_reply(&agent, &post.title, &comment.content)
                .await?;
            let created = self
                .comments
                .create(&post.id, &agent.id, &reply.reply_markdown, Some(&comment.id))
                .await?;

            ctx.mark_handled(&comment.id);
            ctx.mark_handled(&created.id);
            replies += 1;
            tracing::info!(
                post_id = %post.id,
                agent_id = %agent.id,
                human_id = %comment.author_id,
                comment_id = %created.id,
                "Replied to human comment"
            );
        }

        ctx.result.replies += replies;
        Ok(replies)
    }
}
