//! Project records and the progress calculator.
//!
//! Every task mutation goes through a `Project` method so `progress` is
//! recomputed in the same step; nothing else writes the field.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoachError, Result};
use crate::task::{Priority, Task};

/// Percentage of completed tasks, rounded half up. Zero for an empty list.
pub fn compute_progress(tasks: &[Task]) -> u8 {
    let total = tasks.len();
    if total == 0 {
        return 0;
    }
    let done = tasks.iter().filter(|t| t.completed).count();
    ((200 * done + total) / (2 * total)) as u8
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub idea: String,
    pub deadline: NaiveDate,
    pub priority: Priority,
    pub tasks: Vec<Task>,
    pub progress: u8,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        name: impl Into<String>,
        idea: impl Into<String>,
        deadline: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            idea: idea.into(),
            deadline,
            priority: Priority::Medium,
            tasks: Vec::new(),
            progress: 0,
            user_id: user_id.into(),
            created_at,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self.recompute_progress();
        self
    }

    pub fn recompute_progress(&mut self) {
        self.progress = compute_progress(&self.tasks);
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    pub fn is_complete(&self) -> bool {
        self.progress == 100
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
        self.recompute_progress();
    }

    /// Flip a task's completion flag; returns the new flag.
    pub fn toggle_task(&mut self, task_id: &str) -> Result<bool> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == task_id)
            .ok_or_else(|| self.task_not_found(task_id))?;
        self.tasks[idx].toggle();
        let completed = self.tasks[idx].completed;
        self.recompute_progress();
        Ok(completed)
    }

    pub fn delete_task(&mut self, task_id: &str) -> Result<Task> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == task_id)
            .ok_or_else(|| self.task_not_found(task_id))?;
        let removed = self.tasks.remove(idx);
        self.recompute_progress();
        Ok(removed)
    }

    fn task_not_found(&self, task_id: &str) -> CoachError {
        CoachError::TaskNotFound {
            project_id: self.id.clone(),
            task_id: task_id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tasks(flags: &[bool]) -> Vec<Task> {
        flags
            .iter()
            .enumerate()
            .map(|(i, done)| {
                let mut t = Task::new(format!("t{i}"), format!("task {i}"));
                t.completed = *done;
                t
            })
            .collect()
    }

    fn project(flags: &[bool]) -> Project {
        Project::new(
            "p1",
            "u1",
            "Demo",
            "An idea",
            NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap(),
        )
        .with_tasks(tasks(flags))
    }

    #[test]
    fn test_progress_empty_is_zero() {
        assert_eq!(compute_progress(&[]), 0);
    }

    #[test]
    fn test_progress_matches_rounded_ratio() {
        for total in 1..=12usize {
            for done in 0..=total {
                let mut flags = vec![false; total];
                flags[..done].iter_mut().for_each(|f| *f = true);
                let expected = (100.0 * done as f64 / total as f64).round() as u8;
                assert_eq!(compute_progress(&tasks(&flags)), expected, "{done}/{total}");
            }
        }
    }

    #[test]
    fn test_progress_rounds_half_up() {
        // 1/8 = 12.5%
        let mut flags = vec![false; 8];
        flags[0] = true;
        assert_eq!(compute_progress(&tasks(&flags)), 13);
    }

    #[test]
    fn test_toggle_twice_restores_progress() {
        let mut p = project(&[true, false, false]);
        assert_eq!(p.progress, 33);
        assert!(p.toggle_task("t1").unwrap());
        assert_eq!(p.progress, 67);
        assert!(!p.toggle_task("t1").unwrap());
        assert_eq!(p.progress, 33);
    }

    #[test]
    fn test_add_and_delete_recompute() {
        let mut p = project(&[true]);
        assert_eq!(p.progress, 100);
        p.add_task(Task::new("extra", "More work"));
        assert_eq!(p.progress, 50);
        p.delete_task("t0").unwrap();
        assert_eq!(p.progress, 0);
        p.delete_task("extra").unwrap();
        assert!(p.tasks.is_empty());
        assert_eq!(p.progress, 0);
    }

    #[test]
    fn test_unknown_task_leaves_project_alone() {
        let mut p = project(&[false, true]);
        let before = p.clone();
        assert!(matches!(
            p.toggle_task("nope"),
            Err(CoachError::TaskNotFound { .. })
        ));
        assert!(p.delete_task("nope").is_err());
        assert_eq!(p, before);
    }

    #[test]
    fn test_toggle_reports_missing_task_with_project_id() {
        let mut p = project(&[false]);
        assert_eq!(
            p.toggle_task("ghost"),
            Err(CoachError::TaskNotFound {
                project_id: p.id.clone(),
                task_id: "ghost".to_string(),
            })
        );
        assert!(p.toggle_task("t0").unwrap());
        assert!(p.task("t0").unwrap().completed);
        assert_eq!(p.progress, 100);
    }
}
