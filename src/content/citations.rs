//! Citation validation for generated article bodies.
//!
//! A body passes when every inline `[n]` marker is in range, each cited
//! number has a reference line under `## Sources`, and factual-looking
//! sentences carry a marker. The check is pure; callers decide what to do
//! with a failing report.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static SOURCES_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\n## Sources\b").expect("static regex"));

static INLINE_CITATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([0-9]+)\]").expect("static regex"));

static DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]").expect("static regex"));

static EVIDENCE_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(study|survey|report|according|benchmark|percent|data|research)\b")
        .expect("static regex")
});

static NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").expect("static regex"));

/// Result of [`validate_post_citations`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationReport {
    pub ok: bool,
    pub errors: Vec<String>,
}

impl CitationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            ok: errors.is_empty(),
            errors,
        }
    }
}

pub fn validate_post_citations(body_markdown: &str, max_source_number: usize) -> CitationReport {
    let Some(heading) = SOURCES_HEADING.find(body_markdown) else {
        return CitationReport::from_errors(vec!["Missing '## Sources' section.".to_string()]);
    };
    let article = &body_markdown[..heading.start()];
    let sources_section = &body_markdown[heading.end()..];

    let mut errors = Vec::new();

    let cited = cited_numbers(article);
    if cited.is_empty() {
        errors.push("No inline citations found in body.".to_string());
    }

    for n in &cited {
        if !in_source_range(n, max_source_number) {
            errors.push(format!(
                "Inline citation [{}] is out of allowed source range 1-{}.",
                n, max_source_number
            ));
        }
    }

    for n in &cited {
        if !has_reference_entry(sources_section, n) {
            errors.push(format!("Sources section missing reference entry for [{}].", n));
        }
    }

    // Only the first uncited factual sentence is reported.
    if let Some(sentence) = split_sentences(article)
        .into_iter()
        .find(|s| is_factual(s) && !INLINE_CITATION.is_match(s))
    {
        let preview: String = sentence.chars().take(80).collect();
        errors.push(format!("Factual sentence missing citation: \"{}...\"", preview));
    }

    CitationReport::from_errors(errors)
}

/// Distinct cited numbers in first-appearance order, as digit strings with
/// leading zeros removed. Every marker is kept, however many digits it has.
fn cited_numbers(article: &str) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for caps in INLINE_CITATION.captures_iter(article) {
        let digits = caps[1].trim_start_matches('0');
        let number = if digits.is_empty() { "0" } else { digits };
        if !seen.iter().any(|n| n == number) {
            seen.push(number.to_string());
        }
    }
    seen
}

/// A number too large for `u64` is out of range for any source count.
fn in_source_range(number: &str, max_source_number: usize) -> bool {
    number
        .parse::<u64>()
        .is_ok_and(|n| n >= 1 && n <= max_source_number as u64)
}

/// `[n]`, whitespace, then some text and an http(s) URL.
fn has_reference_entry(sources_section: &str, n: &str) -> bool {
    Regex::new(&format!(r"(?i)\[{}\]\s+.+https?://", n))
        .map(|re| re.is_match(sources_section))
        .unwrap_or(false)
}

fn is_factual(sentence: &str) -> bool {
    DIGIT.is_match(sentence) || EVIDENCE_KEYWORD.is_match(sentence)
}

/// Newlines collapse to a space, then split on whitespace runs that follow
/// `.`, `!` or `?`.
pub fn split_sentences(text: &str) -> Vec<String> {
    let flattened = NEWLINES.replace_all(text, " ");
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;
    let mut chars = flattened.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_whitespace() && matches!(prev, Some('.' | '!' | '?')) {
            while chars.peek().is_some_and(|next| next.is_whitespace()) {
                chars.next();
            }
            push_trimmed(&mut sentences, &current);
            current.clear();
            prev = None;
            continue;
        }
        current.push(c);
        prev = Some(c);
    }
    push_trimmed(&mut sentences, &current);
    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, sentence: &str) {
    let trimmed = sentence.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}
