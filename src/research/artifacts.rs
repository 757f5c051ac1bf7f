//! Dossier persistence.

use super::types::{ArtifactFiles, ValidatedDossier};
use crate::types::{AppError, Result};
use async_trait::async_trait;
use chrono::SecondsFormat;
use std::path::{Path, PathBuf};

/// Durable storage for validated dossiers.
#[async_trait]
pub trait DossierStore: Send + Sync {
    async fn persist(&self, dossier: &ValidatedDossier) -> Result<ArtifactFiles>;

    /// `Ok(None)` when nothing is stored at `path`.
    async fn read(&self, path: &Path) -> Result<Option<ValidatedDossier>>;
}

/// Writes `{base}/{YYYY-MM-DD}/{slug}.json` plus a Markdown summary beside it.
#[derive(Debug, Clone)]
pub struct FsDossierStore {
    base_path: PathBuf,
}

impl FsDossierStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[async_trait]
impl DossierStore for FsDossierStore {
    async fn persist(&self, dossier: &ValidatedDossier) -> Result<ArtifactFiles> {
        let dated_dir = self
            .base_path
            .join(dossier.created_at.format("%Y-%m-%d").to_string());
        tokio::fs::create_dir_all(&dated_dir).await.map_err(|e| {
            AppError::Storage(format!("Failed to create {}: {}", dated_dir.display(), e))
        })?;

        let slug = dossier_slug(dossier);
        let dossier_path = dated_dir.join(format!("{}.json", slug));
        let summary_path = dated_dir.join(format!("{}.md", slug));

        let json = serde_json::to_string_pretty(dossier)?;
        write_file(&dossier_path, json).await?;
        write_file(&summary_path, render_dossier_markdown(dossier)).await?;

        tracing::info!(
            agent_id = %dossier.agent_id,
            path = %dossier_path.display(),
            "Persisted research dossier"
        );

        Ok(ArtifactFiles {
            dossier_path: dossier_path.to_string_lossy().into_owned(),
            summary_path: summary_path.to_string_lossy().into_owned(),
        })
    }

    async fn read(&self, path: &Path) -> Result<Option<ValidatedDossier>> {
        let raw = match tokio::fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::Storage(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };
        serde_json::from_str(&raw).map(Some).map_err(|e| {
            AppError::Storage(format!("Invalid dossier at {}: {}", path.display(), e))
        })
    }
}

async fn write_file(path: &Path, contents: String) -> Result<()> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| AppError::Storage(format!("Failed to write {}: {}", path.display(), e)))
}

fn dossier_slug(dossier: &ValidatedDossier) -> String {
    let topic: String = slugify(&dossier.topic).chars().take(40).collect();
    format!(
        "{}-{}-{}",
        topic,
        dossier.agent_id,
        dossier.created_at.timestamp_millis()
    )
}

/// Lowercase ASCII alphanumerics joined by single dashes.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;
    for c in value.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

pub fn render_dossier_markdown(dossier: &ValidatedDossier) -> String {
    let mut lines = vec![
        format!("# Research Dossier: {}", dossier.topic),
        String::new(),
        format!("- Agent: {}", dossier.agent_id),
        format!(
            "- Created: {}",
            dossier.created_at.to_rfc3339_opts(SecondsFormat::Millis, true)
        ),
        format!("- Sources: {}", dossier.sources.len()),
        format!("- Supported claims: {}", dossier.supported_claims.len()),
        format!("- Dropped claims: {}", dossier.dropped_claims.len()),
        String::new(),
        "## Summary".to_string(),
        String::new(),
        dossier.summary.clone(),
        String::new(),
        "## Sources".to_string(),
        String::new(),
    ];

    for source in &dossier.sources {
        let published = source
            .published_at
            .as_deref()
            .map(|p| format!(", {}", p))
            .unwrap_or_default();
        lines.push(format!(
            "- [{}] [{}]({}) ({}{})",
            source.id, source.title, source.url, source.domain, published
        ));
    }

    lines.push(String::new());
    lines.push("## Claims".to_string());
    lines.push(String::new());

    for claim in &dossier.claims {
        let refs = if claim.source_ids.is_empty() {
            "none".to_string()
        } else {
            claim.source_ids.join(", ")
        };
        let reason = claim
            .reason
            .as_deref()
            .map(|r| format!(" ({})", r))
            .unwrap_or_default();
        lines.push(format!(
            "- [{}] {} refs={}{}: {}",
            claim.id,
            claim.status.as_str().to_uppercase(),
            refs,
            reason,
            claim.text
        ));
    }
    lines.push(String::new());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::research::types::{ClaimStatus, ResearchClaim, ResearchSource};
    use chrono::{TimeZone, Utc};

    fn dossier() -> ValidatedDossier {
        let supported = ResearchClaim {
            id: "C1".to_string(),
            text: "Agents cut review time".to_string(),
            source_ids: vec!["S1".to_string()],
            status: ClaimStatus::Supported,
            reason: None,
        };
        let dropped = ResearchClaim {
            id: "C2".to_string(),
            text: "Unlinked claim".to_string(),
            source_ids: vec![],
            status: ClaimStatus::Dropped,
            reason: Some("No validated source linkage.".to_string()),
        };
        ValidatedDossier {
            id: "dossier_1".to_string(),
            agent_id: "alex".to_string(),
            topic: "AI Agents: What's New?".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 3, 4, 10, 0, 0).unwrap(),
            summary: "Short summary".to_string(),
            sources: vec![ResearchSource {
                id: "S1".to_string(),
                url: "https://example.com/a".to_string(),
                normalized_url: "https://example.com/a".to_string(),
                domain: "example.com".to_string(),
                title: "Report A".to_string(),
                summary: String::new(),
                published_at: Some("2026-03-01".to_string()),
            }],
            claims: vec![supported.clone(), dropped.clone()],
            supported_claims: vec![supported],
            dropped_claims: vec![dropped],
        }
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("AI Agents: What's New?"), "ai-agents-what-s-new");
        assert_eq!(slugify("--Hello__World--"), "hello-world");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_render_markdown_lines() {
        let md = render_dossier_markdown(&dossier());
        assert!(md.starts_with("# Research Dossier: AI Agents: What's New?"));
        assert!(md.contains("- Created: 2026-03-04T10:00:00.000Z"));
        assert!(md.contains("- [S1] [Report A](https://example.com/a) (example.com, 2026-03-01)"));
        assert!(md.contains("- [C1] SUPPORTED refs=S1: Agents cut review time"));
        assert!(md.contains("- [C2] DROPPED refs=none (No validated source linkage.): Unlinked claim"));
    }

    #[tokio::test]
    async fn test_persist_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsDossierStore::new(dir.path());
        let files = store.persist(&dossier()).await.unwrap();

        assert!(files.dossier_path.contains("2026-03-04"));
        assert!(files
            .dossier_path
            .ends_with("ai-agents-what-s-new-alex-1772618400000.json"));
        assert!(files.summary_path.ends_with(".md"));

        let loaded = store.read(Path::new(&files.dossier_path)).await.unwrap();
        assert_eq!(loaded, Some(dossier()));
    }

    #[tokio::test]
    async fn test_read_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsDossierStore::new(dir.path());
        let loaded = store.read(&dir.path().join("nope.json")).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_read_corrupt_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = FsDossierStore::new(dir.path()).read(&path).await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
    }
}
