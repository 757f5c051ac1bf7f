use crate::research::{DossierStore, ResearchArtifactRecord};
use std::path::Path;

pub const NO_CATALOG: &str = "No citation catalog available.";

/// Numbered `[i] title (url)` list from the artifact's dossier, or
/// [`NO_CATALOG`] when there is no artifact or its dossier cannot be read.
///
/// Callers pick the artifact with
/// [`RunContext::latest_artifact_for`](crate::run::RunContext::latest_artifact_for).
pub async fn render_citation_catalog(
    artifact: Option<&ResearchArtifactRecord>,
    store: &dyn DossierStore,
) -> String {
    let Some(artifact) = artifact else {
        return NO_CATALOG.to_string();
    };
    let post_id = artifact.post_id.as_deref().unwrap_or_default();

    let dossier = match store.read(Path::new(&artifact.dossier_path)).await {
        Ok(Some(dossier)) => dossier,
        Ok(None) => return NO_CATALOG.to_string(),
        Err(e) => {
            tracing::warn!(post_id, error = %e, "Unreadable dossier for citation catalog");
            return NO_CATALOG.to_string();
        }
    };

    if dossier.sources.is_empty() {
        return NO_CATALOG.to_string();
    }
    dossier
        .sources
        .iter()
        .enumerate()
        .map(|(i, source)| format!("[{}] {} ({})", i + 1, source.title, source.url))
        .collect::<Vec<_>>()
        .join("\n")
}
