//! Which screen is active. Navigation is a plain state transition.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoachError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    #[default]
    Landing,
    Dashboard,
    Profile,
    IdeaEvaluation,
    TechStack,
    DeadlineManagement,
    PitchOptimization,
    QaSection,
    TaskManagement,
}

impl View {
    pub const ALL: [View; 9] = [
        View::Landing,
        View::Dashboard,
        View::Profile,
        View::IdeaEvaluation,
        View::TechStack,
        View::DeadlineManagement,
        View::PitchOptimization,
        View::QaSection,
        View::TaskManagement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            View::Landing => "landing",
            View::Dashboard => "dashboard",
            View::Profile => "profile",
            View::IdeaEvaluation => "idea-evaluation",
            View::TechStack => "tech-stack",
            View::DeadlineManagement => "deadline-management",
            View::PitchOptimization => "pitch-optimization",
            View::QaSection => "qa-section",
            View::TaskManagement => "task-management",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Landing => "Welcome",
            View::Dashboard => "Dashboard",
            View::Profile => "Profile",
            View::IdeaEvaluation => "Idea Evaluation",
            View::TechStack => "Tech Stack Suggestions",
            View::DeadlineManagement => "Smart Deadline Management",
            View::PitchOptimization => "Pitch Optimization",
            View::QaSection => "Real-time Q&A",
            View::TaskManagement => "Task Management",
        }
    }

    /// Everything past the landing page assumes a signed-in user.
    pub fn requires_user(&self) -> bool {
        *self != View::Landing
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase().replace('_', "-");
        View::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or(CoachError::UnknownView(s))
    }
}
