//! Research data model.
//!
//! Raw types mirror what the research collector returns; validated types are
//! produced once by [`super::validator::ResearchValidator`] and never mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============= Raw collector output =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawResearchSource {
    pub url: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawResearchClaim {
    pub text: String,
    #[serde(default)]
    pub source_urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawResearchResult {
    pub topic: String,
    pub summary: String,
    #[serde(default)]
    pub sources: Vec<RawResearchSource>,
    #[serde(default)]
    pub claims: Vec<RawResearchClaim>,
}

// ============= Validated dossier =============

/// A source that survived normalization, deduplication, and recency filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchSource {
    /// `S1..Sn`, assigned in domain order
    pub id: String,
    pub url: String,
    pub normalized_url: String,
    pub domain: String,
    pub title: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    Supported,
    Dropped,
}

impl ClaimStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Supported => "supported",
            ClaimStatus::Dropped => "dropped",
        }
    }
}

/// A claim with its source linkage. Supported iff `source_ids` is non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchClaim {
    /// `C1..Cn`, assigned by input position
    pub id: String,
    pub text: String,
    pub source_ids: Vec<String>,
    pub status: ClaimStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ResearchClaim {
    pub fn is_supported(&self) -> bool {
        self.status == ClaimStatus::Supported
    }
}

/// The citation-backed research artifact for one topic, agent, and run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedDossier {
    pub id: String,
    pub agent_id: String,
    pub topic: String,
    pub created_at: DateTime<Utc>,
    pub summary: String,
    pub sources: Vec<ResearchSource>,
    pub claims: Vec<ResearchClaim>,
    pub supported_claims: Vec<ResearchClaim>,
    pub dropped_claims: Vec<ResearchClaim>,
}

// ============= Persistence records =============

/// Where a dossier was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactFiles {
    pub dossier_path: String,
    pub summary_path: String,
}

/// Index entry linking a persisted dossier to the post it grounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchArtifactRecord {
    pub id: String,
    pub run_id: String,
    pub agent_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub dossier_path: String,
    pub summary_path: String,
    pub source_count: usize,
    pub supported_claim_count: usize,
    pub dropped_claim_count: usize,
}

impl ResearchArtifactRecord {
    pub fn from_dossier(
        run_id: &str,
        post_id: Option<&str>,
        dossier: &ValidatedDossier,
        files: &ArtifactFiles,
    ) -> Self {
        Self {
            id: dossier.id.clone(),
            run_id: run_id.to_string(),
            agent_id: dossier.agent_id.clone(),
            post_id: post_id.map(str::to_string),
            created_at: dossier.created_at,
            dossier_path: files.dossier_path.clone(),
            summary_path: files.summary_path.clone(),
            source_count: dossier.sources.len(),
            supported_claim_count: dossier.supported_claims.len(),
            dropped_claim_count: dossier.dropped_claims.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_result_accepts_camel_case_and_missing_optionals() {
        let json = r#"{
            "topic": "Frontier model evaluation",
            "summary": "Labs published new eval suites this month.",
            "sources": [{"url": "https://a.com/x", "title": "A", "publishedAt": "2026-01-05"}],
            "claims": [{"text": "A new eval suite launched", "sourceUrls": ["https://a.com/x"]}]
        }"#;
        let raw: RawResearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(raw.sources[0].published_at.as_deref(), Some("2026-01-05"));
        assert!(raw.sources[0].summary.is_none());
        assert_eq!(raw.claims[0].source_urls.len(), 1);
    }

    #[test]
    fn test_claim_status_serializes_lowercase() {
        let json = serde_json::to_string(&ClaimStatus::Dropped).unwrap();
        assert_eq!(json, "\"dropped\"");
    }
}
