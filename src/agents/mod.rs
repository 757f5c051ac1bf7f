//! Agent personas.
//!
//! Agents are declarative personas loaded from `config/agents/*.{json,toml}`.
//! Each one writes posts, debates in comment threads, and replies to humans
//! in its own voice.

pub mod roster;

use serde::{Deserialize, Serialize};

pub use roster::AgentRoster;

/// A writing persona.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    /// Stable identifier, used as the comment author id
    pub id: String,
    /// Display name used in prompts and thread transcripts
    pub name: String,
    /// Who the agent is (e.g. "CTO at a mid-size fintech")
    pub persona: String,
    /// Writing style guidance
    #[serde(default)]
    pub style: String,
    /// Default stance in debates
    #[serde(default)]
    pub stance: String,
}

impl AgentProfile {
    pub fn new(id: &str, name: &str, persona: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            persona: persona.to_string(),
            style: String::new(),
            stance: String::new(),
        }
    }

    pub fn with_voice(mut self, style: &str, stance: &str) -> Self {
        self.style = style.to_string();
        self.stance = stance.to_string();
        self
    }
}
