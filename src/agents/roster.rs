//! Agent roster loading and selection.

use super::AgentProfile;
use crate::types::{AppError, Result};
use rand::Rng;
use std::path::Path;

/// The set of agents available to a run.
#[derive(Debug, Clone, Default)]
pub struct AgentRoster {
    agents: Vec<AgentProfile>,
}

impl AgentRoster {
    pub fn new(agents: Vec<AgentProfile>) -> Self {
        Self { agents }
    }

    /// Load every `*.json` and `*.toml` profile in `dir`, ordered by file name.
    ///
    /// A missing directory yields an empty roster; a malformed profile is a
    /// configuration error.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.exists() {
            return Ok(Self::default());
        }

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        let mut agents = Vec::new();
        for path in paths {
            let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
            let parsed: Option<AgentProfile> = match extension {
                "json" => {
                    let raw = std::fs::read_to_string(&path)?;
                    Some(serde_json::from_str(&raw).map_err(|e| {
                        AppError::Configuration(format!(
                            "Failed to parse agent {}: {}",
                            path.display(),
                            e
                        ))
                    })?)
                }
                "toml" => {
                    let raw = std::fs::read_to_string(&path)?;
                    Some(toml::from_str(&raw).map_err(|e| {
                        AppError::Configuration(format!(
                            "Failed to parse agent {}: {}",
                            path.display(),
                            e
                        ))
                    })?)
                }
                _ => None,
            };
            if let Some(agent) = parsed {
                agents.push(agent);
            }
        }

        tracing::debug!(count = agents.len(), dir = %dir.display(), "Loaded agent roster");
        Ok(Self { agents })
    }

    pub fn find(&self, id: &str) -> Option<&AgentProfile> {
        self.agents.iter().find(|agent| agent.id == id)
    }

    /// Uniformly pick an agent whose id is not in `exclude`.
    pub fn pick_excluding<R: Rng + ?Sized>(
        &self,
        exclude: &[&str],
        rng: &mut R,
    ) -> Option<&AgentProfile> {
        let candidates: Vec<&AgentProfile> = self
            .agents
            .iter()
            .filter(|agent| !exclude.contains(&agent.id.as_str()))
            .collect();
        if candidates.is_empty() {
            return None;
        }
        let index = rng.random_range(0..candidates.len());
        Some(candidates[index])
    }

    /// Keep only the agents whose ids are listed, preserving roster order.
    pub fn select(&self, ids: &[String]) -> Vec<AgentProfile> {
        self.agents
            .iter()
            .filter(|agent| ids.contains(&agent.id))
            .cloned()
            .collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AgentProfile> {
        self.agents.iter()
    }

    pub fn agents(&self) -> &[AgentProfile] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn roster() -> AgentRoster {
        AgentRoster::new(vec![
            AgentProfile::new("alex", "Alex", "CTO"),
            AgentProfile::new("bea", "Bea", "Researcher"),
            AgentProfile::new("cal", "Cal", "Product lead"),
        ])
    }

    #[test]
    fn test_pick_excluding_never_returns_excluded() {
        let roster = roster();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let picked = roster.pick_excluding(&["alex", "bea"], &mut rng).unwrap();
            assert_eq!(picked.id, "cal");
        }
    }

    #[test]
    fn test_pick_excluding_everyone_is_none() {
        let roster = roster();
        let mut rng = StdRng::seed_from_u64(7);
        assert!(roster
            .pick_excluding(&["alex", "bea", "cal"], &mut rng)
            .is_none());
    }

    #[test]
    fn test_load_dir_reads_json_and_toml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("a-alex.json"),
            r#"{"id":"alex","name":"Alex","persona":"CTO","style":"direct","stance":"pragmatic","scheduleCron":"0 9 * * 1-5"}"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("b-bea.toml"),
            "id = \"bea\"\nname = \"Bea\"\npersona = \"Researcher\"\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let roster = AgentRoster::load_dir(dir.path()).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.agents()[0].id, "alex");
        assert_eq!(roster.agents()[0].stance, "pragmatic");
        assert_eq!(roster.agents()[1].style, "");
    }

    #[test]
    fn test_load_dir_missing_is_empty() {
        let roster = AgentRoster::load_dir("/definitely/not/here").unwrap();
        assert!(roster.is_empty());
    }

    #[test]
    fn test_load_dir_malformed_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.json"), "{not json").unwrap();
        let err = AgentRoster::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }
}
