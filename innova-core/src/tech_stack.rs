//! Deterministic tech-stack recommendations from a project kind and a set of
//! requirement flags.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::CoachError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    Web,
    Mobile,
    Fullstack,
    Ai,
    Api,
    Game,
}

impl ProjectKind {
    pub const ALL: [ProjectKind; 6] = [
        ProjectKind::Web,
        ProjectKind::Mobile,
        ProjectKind::Fullstack,
        ProjectKind::Ai,
        ProjectKind::Api,
        ProjectKind::Game,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectKind::Web => "web",
            ProjectKind::Mobile => "mobile",
            ProjectKind::Fullstack => "fullstack",
            ProjectKind::Ai => "ai",
            ProjectKind::Api => "api",
            ProjectKind::Game => "game",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectKind::Web => "Web Application",
            ProjectKind::Mobile => "Mobile App",
            ProjectKind::Fullstack => "Full Stack",
            ProjectKind::Ai => "AI/ML Project",
            ProjectKind::Api => "API/Backend",
            ProjectKind::Game => "Game Development",
        }
    }

    fn is_web(&self) -> bool {
        matches!(self, ProjectKind::Web | ProjectKind::Fullstack)
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectKind {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        ProjectKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or(CoachError::UnknownProjectKind(s))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Requirements {
    pub realtime: bool,
    pub database: bool,
    pub mobile: bool,
    pub ai: bool,
    pub apis: bool,
    pub authentication: bool,
}

impl Requirements {
    /// Number of enabled flags.
    pub fn complexity(&self) -> u32 {
        [
            self.realtime,
            self.database,
            self.mobile,
            self.ai,
            self.apis,
            self.authentication,
        ]
        .into_iter()
        .filter(|f| *f)
        .count() as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TechOption {
    pub name: &'static str,
    pub reason: &'static str,
    pub difficulty: Difficulty,
}

const fn opt(name: &'static str, reason: &'static str, difficulty: Difficulty) -> TechOption {
    TechOption {
        name,
        reason,
        difficulty,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Timeline {
    pub total_hours: u32,
    pub planning_hours: u32,
    pub setup_hours: u32,
    pub development_hours: u32,
    pub testing_hours: u32,
    pub deployment_hours: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackSuggestions {
    pub frontend: Vec<TechOption>,
    pub backend: Vec<TechOption>,
    pub database: Vec<TechOption>,
    pub tools: Vec<TechOption>,
    pub deployment: Vec<TechOption>,
    pub timeline: Timeline,
    pub reasoning: String,
}

pub fn suggest_stack(kind: ProjectKind, req: Requirements) -> StackSuggestions {
    StackSuggestions {
        frontend: frontend(kind),
        backend: backend(kind, req),
        database: database(req),
        tools: tools(req),
        deployment: deployment(kind),
        timeline: timeline(kind, req),
        reasoning: format!(
            "Based on your {kind} project with {} advanced features, Codex recommends a modern stack that balances rapid development with scalability. The suggested technologies are hackathon-proven and have strong community support for quick problem-solving.",
            req.complexity()
        ),
    }
}

fn frontend(kind: ProjectKind) -> Vec<TechOption> {
    match kind {
        k if k.is_web() => vec![
            opt("React", "Fast development, huge ecosystem", Difficulty::Medium),
            opt("Vue.js", "Gentle learning curve, great docs", Difficulty::Easy),
            opt("TypeScript", "Better code quality and debugging", Difficulty::Medium),
        ],
        ProjectKind::Mobile => vec![
            opt("React Native", "Code sharing with web", Difficulty::Medium),
            opt("Flutter", "Fast performance, single codebase", Difficulty::Hard),
        ],
        _ => Vec::new(),
    }
}

fn backend(kind: ProjectKind, req: Requirements) -> Vec<TechOption> {
    let mut out = Vec::new();
    if kind == ProjectKind::Mobile {
        return out;
    }
    if req.realtime {
        out.push(opt("Node.js + Socket.io", "Real-time capabilities", Difficulty::Medium));
    }
    out.push(opt("Express.js", "Rapid API development", Difficulty::Easy));
    out.push(opt("FastAPI", "Auto-documentation, type safety", Difficulty::Medium));
    out
}

fn database(req: Requirements) -> Vec<TechOption> {
    let mut out = Vec::new();
    if req.database {
        out.push(opt("PostgreSQL", "Reliable, feature-rich", Difficulty::Medium));
        out.push(opt("MongoDB", "Flexible schema, JSON-like", Difficulty::Easy));
    }
    if req.realtime {
        out.push(opt("Redis", "Real-time data caching", Difficulty::Medium));
    }
    out
}

fn tools(req: Requirements) -> Vec<TechOption> {
    let mut out = vec![
        opt("Git + GitHub", "Version control and collaboration", Difficulty::Easy),
        opt("Docker", "Consistent development environment", Difficulty::Medium),
    ];
    if req.authentication {
        out.push(opt("Auth0", "Quick authentication setup", Difficulty::Easy));
    }
    if req.ai {
        out.push(opt("OpenAI API", "Ready-to-use AI capabilities", Difficulty::Easy));
    }
    out
}

fn deployment(kind: ProjectKind) -> Vec<TechOption> {
    let mut out = Vec::new();
    if kind.is_web() {
        out.push(opt("Vercel", "Zero-config deployment", Difficulty::Easy));
        out.push(opt("Netlify", "Great for static sites", Difficulty::Easy));
    }
    out.push(opt("Heroku", "Simple backend deployment", Difficulty::Easy));
    out
}

fn timeline(kind: ProjectKind, req: Requirements) -> Timeline {
    let base = if kind == ProjectKind::Mobile { 48 } else { 36 };
    let total = base + req.complexity() * 6;
    Timeline {
        total_hours: total,
        planning_hours: 4,
        setup_hours: 6,
        development_hours: total - 16,
        testing_hours: 4,
        deployment_hours: 2,
    }
}
