use crate::agents::{AgentProfile, AgentRoster};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of distinct role slots, and so the most rounds a debate can run.
pub const MAX_ROLE_ROUNDS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebateRole {
    Critic,
    AuthorRebuttal,
    Synthesizer,
}

impl DebateRole {
    pub fn for_round(round: u32) -> Self {
        match round {
            0 | 1 => DebateRole::Critic,
            2 => DebateRole::AuthorRebuttal,
            _ => DebateRole::Synthesizer,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DebateRole::Critic => "critic",
            DebateRole::AuthorRebuttal => "author_rebuttal",
            DebateRole::Synthesizer => "synthesizer",
        }
    }
}

/// Agents bound to each role slot for one debate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleAssignment {
    pub critic: Option<AgentProfile>,
    pub author: Option<AgentProfile>,
    pub synthesizer: Option<AgentProfile>,
}

impl RoleAssignment {
    /// Fill the slots from `roster`.
    ///
    /// The author slot falls back to a random member when `author_id` is not
    /// on the roster. The critic is a uniformly random non-author. The
    /// synthesizer is the first member distinct from both, else the critic.
    pub fn select<R: Rng + ?Sized>(roster: &AgentRoster, author_id: &str, rng: &mut R) -> Self {
        let author = roster
            .find(author_id)
            .or_else(|| roster.pick_excluding(&[], rng))
            .cloned();
        let author_key = author.as_ref().map(|a| a.id.as_str()).unwrap_or(author_id);
        let critic = roster.pick_excluding(&[author_key], rng).cloned();

        let synthesizer = roster
            .iter()
            .find(|agent| {
                Some(&agent.id) != author.as_ref().map(|a| &a.id)
                    && Some(&agent.id) != critic.as_ref().map(|c| &c.id)
            })
            .cloned()
            .or_else(|| critic.clone());

        Self {
            critic,
            author,
            synthesizer,
        }
    }

    /// The agent speaking in `round`, if that slot is filled.
    pub fn for_round(&self, round: u32) -> Option<&AgentProfile> {
        match DebateRole::for_round(round) {
            DebateRole::Critic => self.critic.as_ref(),
            DebateRole::AuthorRebuttal => self.author.as_ref(),
            DebateRole::Synthesizer => self.synthesizer.as_ref(),
        }
    }
}
