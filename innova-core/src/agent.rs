//! Coach personas. Labels only: they pick a voice, never behavior.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Innovation,
    Tech,
    Deadline,
    Pitch,
    Mentor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Agent {
    pub name: &'static str,
    pub kind: AgentKind,
    pub avatar: &'static str,
}

pub const AGENTS: [Agent; 5] = [
    Agent {
        name: "Nova",
        kind: AgentKind::Innovation,
        avatar: "🚀",
    },
    Agent {
        name: "Codex",
        kind: AgentKind::Tech,
        avatar: "⚡",
    },
    Agent {
        name: "Tempo",
        kind: AgentKind::Deadline,
        avatar: "⏰",
    },
    Agent {
        name: "Pitch",
        kind: AgentKind::Pitch,
        avatar: "🎯",
    },
    Agent {
        name: "Sage",
        kind: AgentKind::Mentor,
        avatar: "🧠",
    },
];

impl Agent {
    pub fn of(kind: AgentKind) -> Agent {
        // AGENTS covers every kind exactly once.
        match kind {
            AgentKind::Innovation => AGENTS[0],
            AgentKind::Tech => AGENTS[1],
            AgentKind::Deadline => AGENTS[2],
            AgentKind::Pitch => AGENTS[3],
            AgentKind::Mentor => AGENTS[4],
        }
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.avatar, self.name)
    }
}
