//! innova-core: the hackathon coach's data model and the pure derivations over it.
//!
//! Nothing here does real inference. Scores are bounded random draws, chat is a
//! keyword rule table, and schedules come from a fixed template.

pub mod agent;
pub mod dice;
pub mod error;
pub mod notifications;
pub mod persist;
pub mod project;
pub mod responder;
pub mod schedule;
pub mod scoring;
pub mod state;
pub mod stats;
pub mod task;
pub mod tech_stack;
pub mod time;
pub mod user;
pub mod view;

pub use agent::{Agent, AgentKind, AGENTS};
pub use error::{CoachError, Result};
pub use notifications::{derive_notifications, AgentMessage, MessageKind, NotificationPolicy};
pub use persist::{BlobStore, MemoryStore, SCHEMA_VERSION};
pub use project::{compute_progress, Project};
pub use responder::{Reply, Responder, ResponseRule};
pub use schedule::{generate_schedule, TEMPLATE};
pub use scoring::{
    IdeaEvaluation, MockIdeaScorer, MockPitchScorer, PitchAnalysis, ScoreBand, Scorer,
};
pub use state::{AppState, NewProject, NewTask};
pub use stats::{
    achievements, dashboard_summary, task_stats, user_stats, Achievement, DashboardSummary,
    TaskStats, UserStats,
};
pub use task::{Priority, Task};
pub use tech_stack::{suggest_stack, ProjectKind, Requirements, StackSuggestions};
pub use user::{ProfilePatch, User};
pub use view::View;
