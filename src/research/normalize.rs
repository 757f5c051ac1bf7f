//! Source URL canonicalization, recency filtering, and per-domain dedup.

use super::types::{RawResearchSource, ResearchSource};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use std::collections::HashSet;
use url::Url;

/// Canonical form of a source URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedUrl {
    /// `scheme://domain/path`, trailing slashes removed, `/` when empty
    pub normalized_url: String,
    /// Lowercase host with a leading `www.` stripped
    pub domain: String,
}

/// Canonicalize a URL. Returns `None` when it does not parse or has no host.
pub fn normalize_url(raw_url: &str) -> Option<NormalizedUrl> {
    let url = Url::parse(raw_url.trim()).ok()?;
    let host = url.host_str()?.to_lowercase();
    if host.is_empty() {
        return None;
    }
    let domain = host.strip_prefix("www.").unwrap_or(&host).to_string();

    let trimmed = url.path().trim_end_matches('/');
    let path = if trimmed.is_empty() { "/" } else { trimmed };

    Some(NormalizedUrl {
        normalized_url: format!("{}://{}{}", url.scheme(), domain, path),
        domain,
    })
}

/// Parse a `publishedAt` value. Unrecognized formats yield `None`.
pub fn parse_published_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    None
}

/// Normalize, filter, and deduplicate raw sources.
///
/// Unparseable URLs are skipped. Sources with a valid publication date older
/// than `max_source_age_days` are skipped; undated sources are kept. The first
/// source seen for each domain wins. The result is sorted by domain and
/// numbered `S1..Sn`.
pub fn normalize_and_dedupe_sources(
    raw_sources: &[RawResearchSource],
    max_source_age_days: u32,
    now: DateTime<Utc>,
) -> Vec<ResearchSource> {
    let max_age = Duration::days(i64::from(max_source_age_days));
    let mut seen_domains = HashSet::new();
    let mut deduped: Vec<ResearchSource> = Vec::new();

    for raw in raw_sources {
        let Some(normalized) = normalize_url(&raw.url) else {
            tracing::debug!(url = %raw.url, "Skipping unparseable source URL");
            continue;
        };

        if let Some(published) = raw.published_at.as_deref().and_then(parse_published_at) {
            if now - published > max_age {
                tracing::debug!(url = %raw.url, "Skipping stale source");
                continue;
            }
        }

        if !seen_domains.insert(normalized.domain.clone()) {
            continue;
        }

        deduped.push(ResearchSource {
            id: String::new(),
            url: raw.url.clone(),
            normalized_url: normalized.normalized_url,
            domain: normalized.domain,
            title: raw.title.clone(),
            summary: raw.summary.clone().unwrap_or_default(),
            published_at: raw.published_at.clone(),
        });
    }

    deduped.sort_by(|a, b| a.domain.cmp(&b.domain));
    for (index, source) in deduped.iter_mut().enumerate() {
        source.id = format!("S{}", index + 1);
    }
    deduped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn raw(url: &str, published_at: Option<&str>) -> RawResearchSource {
        RawResearchSource {
            url: url.to_string(),
            title: format!("Title for {}", url),
            summary: None,
            published_at: published_at.map(str::to_string),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 17, 0, 0, 0).unwrap()
    }

    #[rstest]
    #[case("https://www.Example.com/a/", "https://example.com/a", "example.com")]
    #[case("https://example.com", "https://example.com/", "example.com")]
    #[case("http://news.site.org/path//", "http://news.site.org/path", "news.site.org")]
    #[case("https://example.com/a?utm=1#frag", "https://example.com/a", "example.com")]
    fn test_normalize_url(#[case] input: &str, #[case] url: &str, #[case] domain: &str) {
        let normalized = normalize_url(input).unwrap();
        assert_eq!(normalized.normalized_url, url);
        assert_eq!(normalized.domain, domain);
    }

    #[rstest]
    #[case("not a url")]
    #[case("example.com/no-scheme")]
    #[case("mailto:someone@example.com")]
    fn test_normalize_url_rejects(#[case] input: &str) {
        assert!(normalize_url(input).is_none());
    }

    #[test]
    fn test_dedupe_keeps_first_per_domain_and_sorts() {
        let sources = vec![
            raw("https://zeta.io/one", None),
            raw("https://example.com/a", None),
            raw("https://www.example.com/b", None),
            raw("https://alpha.dev/x", None),
        ];
        let result = normalize_and_dedupe_sources(&sources, 365, now());

        let domains: Vec<&str> = result.iter().map(|s| s.domain.as_str()).collect();
        assert_eq!(domains, vec!["alpha.dev", "example.com", "zeta.io"]);
        let ids: Vec<&str> = result.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["S1", "S2", "S3"]);
        assert_eq!(result[1].url, "https://example.com/a");
    }

    #[test]
    fn test_stale_sources_are_filtered_but_undated_kept() {
        let sources = vec![
            raw("https://old.com/a", Some("2024-01-01")),
            raw("https://fresh.com/a", Some("2026-02-01T10:00:00Z")),
            raw("https://undated.com/a", None),
            raw("https://garbled.com/a", Some("last tuesday")),
        ];
        let result = normalize_and_dedupe_sources(&sources, 30, now());
        let domains: Vec<&str> = result.iter().map(|s| s.domain.as_str()).collect();
        assert_eq!(domains, vec!["fresh.com", "garbled.com", "undated.com"]);
    }

    #[test]
    fn test_stale_duplicate_does_not_block_fresh_one() {
        let sources = vec![
            raw("https://example.com/old", Some("2020-05-01")),
            raw("https://example.com/new", Some("2026-02-10")),
        ];
        let result = normalize_and_dedupe_sources(&sources, 30, now());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].url, "https://example.com/new");
    }

    #[test]
    fn test_unparseable_urls_skipped() {
        let sources = vec![raw("::::", None), raw("https://ok.com", None)];
        let result = normalize_and_dedupe_sources(&sources, 365, now());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "S1");
    }

    #[test]
    fn test_empty_input_is_empty_output() {
        assert!(normalize_and_dedupe_sources(&[], 365, now()).is_empty());
    }

    #[rstest]
    #[case("2026-01-05", true)]
    #[case("2026-01-05T08:30:00", true)]
    #[case("2026-01-05T08:30:00+02:00", true)]
    #[case("January 5th", false)]
    fn test_parse_published_at(#[case] input: &str, #[case] valid: bool) {
        assert_eq!(parse_published_at(input).is_some(), valid);
    }
}
