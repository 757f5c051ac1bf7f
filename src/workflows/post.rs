//! Research-grounded post drafting.

use crate::agents::AgentProfile;
use crate::content::{BlogPostContent, ContentGenerator};
use crate::research::artifacts::slugify;
use crate::research::{ResearchArtifactRecord, ResearchPipeline};
use crate::run::{PostRecord, RunContext};
use crate::types::{AppError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Metadata written next to each local draft.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DraftMetadata<'a> {
    mode: &'static str,
    post_id: &'a str,
    agent_id: &'a str,
    title: &'a str,
    excerpt: &'a str,
    image_prompt: &'a str,
    created_at: String,
    markdown_path: String,
}

/// Where a local draft landed.
#[derive(Debug, Clone)]
pub struct LocalDraft {
    pub post_id: String,
    pub output_path: PathBuf,
}

/// Writes drafts as `{root}/{postId}-{titleSlug}/{post.md, metadata.json}`.
#[derive(Debug, Clone)]
pub struct LocalDraftWriter {
    root: PathBuf,
}

impl LocalDraftWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub async fn write(
        &self,
        agent_id: &str,
        post: &BlogPostContent,
        created_at: DateTime<Utc>,
    ) -> Result<LocalDraft> {
        let post_id = local_post_id(agent_id, created_at);
        let title_segment: String = file_segment(&post.title).chars().take(60).collect();
        let output_path = self.root.join(format!("{}-{}", post_id, title_segment));
        let markdown_path = output_path.join("post.md");
        let metadata_path = output_path.join("metadata.json");

        tokio::fs::create_dir_all(&output_path)
            .await
            .map_err(|e| storage_error("create", &output_path, e))?;
        tokio::fs::write(&markdown_path, &post.body_markdown)
            .await
            .map_err(|e| storage_error("write", &markdown_path, e))?;

        let metadata = DraftMetadata {
            mode: "local-only",
            post_id: &post_id,
            agent_id,
            title: &post.title,
            excerpt: &post.excerpt,
            image_prompt: &post.image_prompt,
            created_at: created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            markdown_path: markdown_path.to_string_lossy().into_owned(),
        };
        tokio::fs::write(&metadata_path, serde_json::to_string_pretty(&metadata)?)
            .await
            .map_err(|e| storage_error("write", &metadata_path, e))?;

        Ok(LocalDraft {
            post_id,
            output_path,
        })
    }
}

fn storage_error(action: &str, path: &Path, e: std::io::Error) -> AppError {
    AppError::Storage(format!("Failed to {} {}: {}", action, path.display(), e))
}

/// `local-{agent}-{yyyyMMddHHmmss}`
pub fn local_post_id(agent_id: &str, created_at: DateTime<Utc>) -> String {
    format!(
        "local-{}-{}",
        file_segment(agent_id),
        created_at.format("%Y%m%d%H%M%S")
    )
}

fn file_segment(value: &str) -> String {
    let segment = slugify(value);
    if segment.is_empty() {
        "post".to_string()
    } else {
        segment
    }
}

/// Research → blog post → local draft, once per agent.
pub struct PostWorkflow {
    pipeline: ResearchPipeline,
    content: ContentGenerator,
    drafts: LocalDraftWriter,
    image_style: String,
}

impl PostWorkflow {
    pub fn new(
        pipeline: ResearchPipeline,
        content: ContentGenerator,
        drafts: LocalDraftWriter,
        image_style: impl Into<String>,
    ) -> Self {
        Self {
            pipeline,
            content,
            drafts,
            image_style: image_style.into(),
        }
    }

    /// Draft one post per agent.
    ///
    /// A failing agent is recorded in `ctx` and the loop moves on. The call
    /// fails only when every agent failed.
    pub async fn run(
        &self,
        ctx: &mut RunContext,
        agents: &[AgentProfile],
    ) -> Result<Vec<PostRecord>> {
        let mut posts = Vec::new();
        let mut failed = Vec::new();

        for agent in agents {
            tracing::info!(run_id = %ctx.run_id, agent_id = %agent.id, "Drafting post");
            match self.draft_for(ctx, agent).await {
                Ok(post) => {
                    tracing::info!(
                        run_id = %ctx.run_id,
                        agent_id = %agent.id,
                        post_id = %post.id,
                        path = %post.output_path,
                        "Saved local draft"
                    );
                    ctx.result.posts.push(post.clone());
                    posts.push(post);
                }
                Err(e) => {
                    tracing::error!(
                        run_id = %ctx.run_id,
                        agent_id = %agent.id,
                        error = %e,
                        "Post generation failed"
                    );
                    let reason = e.to_string();
                    ctx.record_failure(&agent.id, reason.clone());
                    failed.push(format!("{}: {}", agent.id, reason));
                }
            }
        }

        if posts.is_empty() && !failed.is_empty() {
            return Err(AppError::Internal(format!(
                "Post workflow failed: {}",
                failed.join("; ")
            )));
        }
        Ok(posts)
    }

    async fn draft_for(&self, ctx: &mut RunContext, agent: &AgentProfile) -> Result<PostRecord> {
        let research = self.pipeline.run(agent).await?;
        let post = self
            .content
            .generate_blog_post(agent, &research.dossier, &self.image_style)
            .await?;

        let created_at = Utc::now();
        let draft = self.drafts.write(&agent.id, &post, created_at).await?;

        ctx.result.research_artifacts.push(ResearchArtifactRecord::from_dossier(
            &ctx.run_id,
            Some(draft.post_id.as_str()),
            &research.dossier,
            &research.artifacts,
        ));

        Ok(PostRecord {
            id: draft.post_id,
            title: post.title,
            excerpt: post.excerpt,
            agent_id: agent.id.clone(),
            created_at,
            output_path: draft.output_path.to_string_lossy().into_owned(),
        })
    }
}
