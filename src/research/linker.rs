//! Claim-to-source linkage.

use super::normalize::normalize_url;
use super::types::{ClaimStatus, RawResearchClaim, ResearchClaim, ResearchSource};
use std::collections::HashMap;

/// Reason attached to every claim that could not be linked.
pub const NO_LINKAGE_REASON: &str = "No validated source linkage.";

/// Maps raw claims onto the validated source set.
///
/// A declared URL links when it matches a source's normalized URL exactly or
/// shares its domain. The domain fallback tolerates URL variants the model
/// invents, at the cost of over-linking claims on prolific domains.
pub struct ClaimLinker {
    by_url: HashMap<String, String>,
    by_domain: HashMap<String, String>,
}

impl ClaimLinker {
    pub fn new(sources: &[ResearchSource]) -> Self {
        let mut by_url = HashMap::new();
        let mut by_domain = HashMap::new();
        for source in sources {
            by_url.insert(source.normalized_url.clone(), source.id.clone());
            by_domain.insert(source.domain.clone(), source.id.clone());
        }
        Self { by_url, by_domain }
    }

    /// Link every claim, numbering them `C1..Cn` by input position.
    pub fn link(&self, claims: &[RawResearchClaim]) -> Vec<ResearchClaim> {
        claims
            .iter()
            .enumerate()
            .map(|(index, claim)| self.link_one(index, claim))
            .collect()
    }

    fn link_one(&self, index: usize, claim: &RawResearchClaim) -> ResearchClaim {
        let mut linked: Vec<String> = Vec::new();
        for source_url in &claim.source_urls {
            let Some(normalized) = normalize_url(source_url) else {
                continue;
            };
            let hits = [
                self.by_url.get(&normalized.normalized_url),
                self.by_domain.get(&normalized.domain),
            ];
            for id in hits.into_iter().flatten() {
                if !linked.contains(id) {
                    linked.push(id.clone());
                }
            }
        }

        let id = format!("C{}", index + 1);
        if linked.is_empty() {
            ResearchClaim {
                id,
                text: claim.text.clone(),
                source_ids: Vec::new(),
                status: ClaimStatus::Dropped,
                reason: Some(NO_LINKAGE_REASON.to_string()),
            }
        } else {
            ResearchClaim {
                id,
                text: claim.text.clone(),
                source_ids: linked,
                status: ClaimStatus::Supported,
                reason: None,
            }
        }
    }
}
