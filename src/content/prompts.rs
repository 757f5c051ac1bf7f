//! Prompt builders.

use crate::agents::AgentProfile;
use crate::debate::DebateRole;
use crate::research::ValidatedDossier;

/// Per-round context for a debate comment.
#[derive(Debug, Clone)]
pub struct CommentPrompt<'a> {
    pub post_title: &'a str,
    pub post_excerpt: &'a str,
    pub role: DebateRole,
    pub round: u32,
    pub prior_thread: &'a str,
    pub citation_catalog: &'a str,
}

fn voice(agent: &AgentProfile) -> Vec<String> {
    vec![
        format!("You are {}.", agent.name),
        format!("Persona: {}.", agent.persona),
        format!("Writing style: {}.", agent.style),
        format!("Stance: {}.", agent.stance),
    ]
}

pub fn build_blog_post_prompt(agent: &AgentProfile, dossier: &ValidatedDossier) -> String {
    let sources = dossier
        .sources
        .iter()
        .enumerate()
        .map(|(i, source)| format!("[{}] {} ({})", i + 1, source.title, source.url))
        .collect::<Vec<_>>()
        .join("\n");
    let claims = dossier
        .supported_claims
        .iter()
        .map(|claim| format!("- {} (sources: {})", claim.text, claim.source_ids.join(", ")))
        .collect::<Vec<_>>()
        .join("\n");

    let mut parts = voice(agent);
    parts.extend([
        format!("Topic focus: {}", dossier.topic),
        format!("Research summary: {}", dossier.summary),
        "Use only validated claims and sources below.".to_string(),
        format!("Validated claims:\n{}", claims),
        format!("Sources catalog:\n{}", sources),
        "Write a blog post with a clear title and 4-6 sections focused only on current AI news and research developments.".to_string(),
        "Center the article on what changed, why it matters now, and practical implications for teams building with AI.".to_string(),
        "Do not drift into unrelated business, marketing, or generic productivity topics.".to_string(),
        "For factual or quantitative statements, include inline numeric citations like [1], [2].".to_string(),
        "End the article with '## Sources' and numbered references matching the citations.".to_string(),
        "Return JSON with keys: title, outline, bodyMarkdown, excerpt.".to_string(),
        "Keep bodyMarkdown under 1200 words.".to_string(),
    ]);
    parts.join(" ")
}

/// Blog prompt plus the validator's complaints from the rejected draft.
pub fn build_correction_prompt(base_prompt: &str, errors: &[String]) -> String {
    format!(
        "{}\nFix the citation issues:\n{}",
        base_prompt,
        errors.join("\n")
    )
}

pub fn build_agent_comment_prompt(agent: &AgentProfile, ctx: &CommentPrompt<'_>) -> String {
    let prior = if ctx.prior_thread.is_empty() {
        "No prior comments."
    } else {
        ctx.prior_thread
    };
    let mut parts = voice(agent);
    parts.extend([
        format!("Debate role: {}. Round: {}.", ctx.role.as_str(), ctx.round),
        format!("Respond to the blog post titled \"{}\".", ctx.post_title),
        format!("Post excerpt: {}", ctx.post_excerpt),
        format!("Prior thread context:\n{}", prior),
        format!("Citation catalog:\n{}", ctx.citation_catalog),
        "Write a concise comment (80-170 words) that advances the discussion.".to_string(),
        "If you include factual or quantitative claims, cite with numeric markers like [1].".to_string(),
        "Return JSON with keys: commentMarkdown, stanceSummary, citationsUsed.".to_string(),
    ]);
    parts.join(" ")
}

pub fn build_human_reply_prompt(
    agent: &AgentProfile,
    post_title: &str,
    human_comment: &str,
) -> String {
    let mut parts = voice(agent);
    parts.extend([
        format!("Respond to a human comment on the post \"{}\".", post_title),
        format!("Human comment: {}", human_comment),
        "Be warm, constructive, and invite further discussion.".to_string(),
        "Return JSON with keys: replyMarkdown, followUpQuestion.".to_string(),
    ]);
    parts.join(" ")
}

/// Hero image prompt from the title and up to four outline points.
pub fn build_image_prompt(title: &str, style: &str, key_points: &[String]) -> String {
    let points = key_points
        .iter()
        .take(4)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    [
        format!("Create a featured image for a blog post titled \"{}\".", title),
        format!("Style: {}.", style),
        format!("Key concepts: {}.", points),
        "No text overlays, no logos, clean composition.".to_string(),
    ]
    .join(" ")
}
