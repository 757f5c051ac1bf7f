//! Typed content generation on top of [`StructuredGenerator`].

use super::citations::validate_post_citations;
use super::prompts::{
    build_agent_comment_prompt, build_blog_post_prompt, build_correction_prompt,
    build_human_reply_prompt, build_image_prompt, CommentPrompt,
};
use crate::agents::AgentProfile;
use crate::llm::structured::require_min_chars;
use crate::llm::{LLMClient, Shape, StructuredGenerator};
use crate::research::ValidatedDossier;
use crate::types::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostContent {
    pub title: String,
    pub outline: Vec<String>,
    pub body_markdown: String,
    pub excerpt: String,
    /// Filled in locally after the body passes citation checks
    #[serde(default)]
    pub image_prompt: String,
}

impl Shape for BlogPostContent {
    fn check(&self) -> std::result::Result<(), String> {
        require_min_chars("title", &self.title, 5)?;
        if self.outline.len() < 3 {
            return Err("outline must contain at least 3 items".to_string());
        }
        for (i, point) in self.outline.iter().enumerate() {
            require_min_chars(&format!("outline[{}]", i), point, 2)?;
        }
        require_min_chars("bodyMarkdown", &self.body_markdown, 200)?;
        require_min_chars("excerpt", &self.excerpt, 30)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentContent {
    pub comment_markdown: String,
    pub stance_summary: String,
    #[serde(default)]
    pub citations_used: Vec<u32>,
}

impl Shape for CommentContent {
    fn check(&self) -> std::result::Result<(), String> {
        require_min_chars("commentMarkdown", &self.comment_markdown, 20)?;
        require_min_chars("stanceSummary", &self.stance_summary, 4)?;
        if self.citations_used.contains(&0) {
            return Err("citationsUsed must contain positive integers".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanReplyContent {
    pub reply_markdown: String,
    pub follow_up_question: String,
}

impl Shape for HumanReplyContent {
    fn check(&self) -> std::result::Result<(), String> {
        require_min_chars("replyMarkdown", &self.reply_markdown, 20)?;
        require_min_chars("followUpQuestion", &self.follow_up_question, 5)
    }
}

/// Content-generation collaborator used by the workflows and the debate.
#[derive(Clone)]
pub struct ContentGenerator {
    generator: StructuredGenerator,
}

impl ContentGenerator {
    pub fn new(client: Arc<dyn LLMClient>) -> Self {
        Self {
            generator: StructuredGenerator::new(client),
        }
    }

    /// Draft a post grounded in `dossier`.
    ///
    /// A draft failing citation checks is regenerated exactly once with the
    /// errors appended; a second failure is a quality-gate error.
    pub async fn generate_blog_post(
        &self,
        agent: &AgentProfile,
        dossier: &ValidatedDossier,
        image_style: &str,
    ) -> Result<BlogPostContent> {
        let source_count = dossier.sources.len();
        let base_prompt = build_blog_post_prompt(agent, dossier);

        let first: BlogPostContent = self.generator.generate(&base_prompt).await?;
        let first_report = validate_post_citations(&first.body_markdown, source_count);

        let mut draft = if first_report.ok {
            first
        } else {
            tracing::warn!(
                agent_id = %agent.id,
                errors = first_report.errors.len(),
                "Draft failed citation checks, regenerating with feedback"
            );
            self.generator
                .generate(&build_correction_prompt(&base_prompt, &first_report.errors))
                .await?
        };

        let report = validate_post_citations(&draft.body_markdown, source_count);
        if !report.ok {
            return Err(AppError::QualityGate(format!(
                "Post citation validation failed: {}",
                report.errors.join(" | ")
            )));
        }

        draft.image_prompt = build_image_prompt(&draft.title, image_style, &draft.outline);
        Ok(draft)
    }

    pub async fn generate_agent_comment(
        &self,
        agent: &AgentProfile,
        ctx: &CommentPrompt<'_>,
    ) -> Result<CommentContent> {
        self.generator
            .generate(&build_agent_comment_prompt(agent, ctx))
            .await
    }

    pub async fn generate_human_reply(
        &self,
        agent: &AgentProfile,
        post_title: &str,
        human_comment: &str,
    ) -> Result<HumanReplyContent> {
        self.generator
            .generate(&build_human_reply_prompt(agent, post_title, human_comment))
            .await
    }
}
