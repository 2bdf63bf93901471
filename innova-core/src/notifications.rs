//! Advisory notifications derived from the current project list.
//!
//! Pure projection: evaluated fresh on every call, never stored.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::agent::{Agent, AgentKind};
use crate::project::Project;
use crate::time::days_until;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Suggestion,
    Redirect,
    Notification,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentMessage {
    pub id: String,
    pub agent: Agent,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub kind: MessageKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NotificationPolicy {
    /// Deadline warning when 0 < days left <= this.
    pub urgent_within_days: i64,
    /// Low-progress warning when progress is below this...
    pub low_progress_below: u8,
    /// ...and days left <= this.
    pub low_progress_within_days: i64,
    /// "Ready to pitch" once any project is above this.
    pub pitch_ready_above: u8,
}

impl Default for NotificationPolicy {
    fn default() -> Self {
        Self {
            urgent_within_days: 3,
            low_progress_below: 30,
            low_progress_within_days: 7,
            pitch_ready_above: 50,
        }
    }
}

/// Per-project messages in project order, then at most one global message.
pub fn derive_notifications(
    projects: &[Project],
    now: DateTime<Utc>,
    tz: Tz,
    policy: NotificationPolicy,
) -> Vec<AgentMessage> {
    let mut out = Vec::new();
    let message = |id: String, kind: AgentKind, text: String, msg_kind: MessageKind| AgentMessage {
        id,
        agent: Agent::of(kind),
        message: text,
        timestamp: now,
        kind: msg_kind,
    };

    for p in projects {
        let days = days_until(p.deadline, now, tz);

        if days > 0 && days <= policy.urgent_within_days {
            let plural = if days > 1 { "s" } else { "" };
            out.push(message(
                format!("deadline-{}", p.id),
                AgentKind::Deadline,
                format!(
                    "⚠️ Project \"{}\" deadline is in {days} day{plural}! Time to accelerate progress.",
                    p.name
                ),
                MessageKind::Notification,
            ));
        }

        if p.progress < policy.low_progress_below && days <= policy.low_progress_within_days {
            out.push(message(
                format!("progress-{}", p.id),
                AgentKind::Mentor,
                format!(
                    "💡 \"{}\" needs attention - only {}% complete. Let me help you prioritize tasks.",
                    p.name, p.progress
                ),
                MessageKind::Suggestion,
            ));
        }
    }

    if projects.is_empty() {
        out.push(message(
            "welcome-workflow".to_string(),
            AgentKind::Innovation,
            "🚀 Ready to start your hackathon journey? Let's begin with idea evaluation to validate your concept!"
                .to_string(),
            MessageKind::Redirect,
        ));
    } else if projects.iter().any(|p| p.progress > policy.pitch_ready_above) {
        out.push(message(
            "pitch-ready".to_string(),
            AgentKind::Pitch,
            "🎯 Great progress! Your projects are ready for pitch optimization. Let's make them shine!"
                .to_string(),
            MessageKind::Redirect,
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;
    use chrono::{Duration, NaiveDate, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 7, 1, 10, 0, 0).unwrap()
    }

    fn project(id: &str, deadline_in_days: i64, done: usize, total: usize) -> Project {
        let deadline: NaiveDate = now().date_naive() + Duration::days(deadline_in_days);
        let tasks = (0..total)
            .map(|i| {
                let mut t = Task::new(format!("{id}-t{i}"), "work");
                t.completed = i < done;
                t
            })
            .collect();
        Project::new(id, "u1", format!("Project {id}"), "idea", deadline, now()).with_tasks(tasks)
    }

    fn derive(projects: &[Project]) -> Vec<AgentMessage> {
        derive_notifications(projects, now(), Tz::UTC, NotificationPolicy::default())
    }

    #[test]
    fn test_empty_list_gets_started_only() {
        let out = derive(&[]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "welcome-workflow");
        assert_eq!(out[0].agent.name, "Nova");
        assert_eq!(out[0].kind, MessageKind::Redirect);
    }

    #[test]
    fn test_near_deadline_low_progress_emits_both() {
        // 1 of 10 tasks done -> 10%.
        let p = project("a", 2, 1, 10);
        assert_eq!(p.progress, 10);
        let out = derive(&[p]);
        let ids: Vec<&str> = out.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["deadline-a", "progress-a"]);
        assert!(out[0].message.contains("in 2 days!"));
        assert_eq!(out[0].agent.name, "Tempo");
        assert_eq!(out[1].agent.name, "Sage");
        assert!(out[1].message.contains("only 10% complete"));
    }

    #[test]
    fn test_singular_day() {
        let out = derive(&[project("a", 1, 4, 4)]);
        assert!(out[0].message.contains("in 1 day!"));
    }

    #[test]
    fn test_far_deadline_is_quiet() {
        let out = derive(&[project("a", 20, 0, 8)]);
        assert!(out.is_empty());
    }

    #[test]
    fn test_deadline_today_no_urgency_but_low_progress() {
        let out = derive(&[project("a", 0, 0, 8)]);
        let ids: Vec<&str> = out.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["progress-a"]);
    }

    #[test]
    fn test_pitch_ready_appended_last() {
        let projects = vec![project("a", 2, 1, 10), project("b", 30, 6, 10)];
        let out = derive(&projects);
        let ids: Vec<&str> = out.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["deadline-a", "progress-a", "pitch-ready"]);
    }

    #[test]
    fn test_exactly_half_is_not_pitch_ready() {
        let out = derive(&[project("a", 30, 4, 8)]);
        assert!(out.is_empty());
    }
}
