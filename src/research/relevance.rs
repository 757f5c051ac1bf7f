//! Topic relevance predicates for the research topic gate.

use regex::RegexSet;
use std::sync::LazyLock;

/// Decides whether concatenated research text is on-domain.
///
/// The keyword implementation is coarse; a classifier can replace it without
/// touching the validator.
pub trait RelevancePredicate: Send + Sync {
    fn is_relevant(&self, text: &str) -> bool;
}

const AI_TOPIC_PATTERNS: &[&str] = &[
    r"(?i)\bartificial intelligence\b",
    r"(?i)\bai\b",
    r"(?i)\bmachine learning\b",
    r"(?i)\bml\b",
    r"(?i)\bllm\b",
    r"(?i)\blarge language model\b",
    r"(?i)\bgenerative ai\b",
    r"(?i)\bfoundation model\b",
    r"(?i)\bneural network\b",
    r"(?i)\bopenai\b",
    r"(?i)\banthropic\b",
    r"(?i)\bdeepmind\b",
];

static AI_TOPIC_SET: LazyLock<RegexSet> =
    LazyLock::new(|| RegexSet::new(AI_TOPIC_PATTERNS).expect("AI topic patterns are valid"));

/// Flat case-insensitive keyword match.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordRelevance;

impl KeywordRelevance {
    /// The AI-domain keyword set.
    pub fn ai_focused() -> Self {
        Self
    }
}

impl RelevancePredicate for KeywordRelevance {
    fn is_relevant(&self, text: &str) -> bool {
        AI_TOPIC_SET.is_match(text)
    }
}
