//! Roll-ups over a user's projects for the dashboard and profile views.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::project::Project;
use crate::task::{Priority, Task};
use crate::time::local_today;

fn all_tasks(projects: &[Project]) -> impl Iterator<Item = &Task> {
    projects.iter().flat_map(|p| p.tasks.iter())
}

/// Rounded mean of project progress; zero with no projects.
pub fn average_progress(projects: &[Project]) -> u8 {
    if projects.is_empty() {
        return 0;
    }
    let n = projects.len() as u32;
    let sum: u32 = projects.iter().map(|p| p.progress as u32).sum();
    ((2 * sum + n) / (2 * n)) as u8
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub overdue: usize,
    pub open_high: usize,
}

pub fn task_stats(projects: &[Project], today: NaiveDate) -> TaskStats {
    all_tasks(projects).fold(TaskStats::default(), |mut s, t| {
        s.total += 1;
        if t.completed {
            s.completed += 1;
        } else if t.priority == Priority::High {
            s.open_high += 1;
        }
        if t.is_overdue(today) {
            s.overdue += 1;
        }
        s
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub projects: usize,
    pub average_progress: u8,
    /// Open high-priority tasks due by the local date 24 hours from now (or already past due).
    pub urgent_tasks: usize,
}

pub fn dashboard_summary(projects: &[Project], now: DateTime<Utc>, tz: Tz) -> DashboardSummary {
    let horizon = local_today(now + Duration::hours(24), tz);
    let urgent_tasks = all_tasks(projects)
        .filter(|t| !t.completed && t.priority == Priority::High)
        .filter(|t| t.due_date.is_some_and(|d| d <= horizon))
        .count();

    DashboardSummary {
        projects: projects.len(),
        average_progress: average_progress(projects),
        urgent_tasks,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_projects: usize,
    pub completed_projects: usize,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub average_progress: u8,
    pub hackathons_participated: usize,
    pub pitches_optimized: usize,
    pub questions_asked: usize,
}

pub fn user_stats(projects: &[Project]) -> UserStats {
    let total_tasks = all_tasks(projects).count();
    let completed_tasks = all_tasks(projects).filter(|t| t.completed).count();

    UserStats {
        total_projects: projects.len(),
        completed_projects: projects.iter().filter(|p| p.is_complete()).count(),
        total_tasks,
        completed_tasks,
        average_progress: average_progress(projects),
        // Flavor counters, derived rather than tracked.
        hackathons_participated: projects.len() / 2 + 3,
        pitches_optimized: projects.len() * 3 / 2 + 2,
        questions_asked: total_tasks * 4 / 5 + 15,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Projects,
    Tasks,
    Innovation,
    Milestone,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub unlocked_at: DateTime<Utc>,
    pub category: AchievementCategory,
}

pub fn achievements(projects: &[Project], now: DateTime<Utc>) -> Vec<Achievement> {
    let stats = user_stats(projects);
    let mut out = Vec::new();
    let mut unlock = |id, title, description, icon, unlocked_at, category| {
        out.push(Achievement {
            id,
            title,
            description,
            icon,
            unlocked_at,
            category,
        })
    };

    if let Some(first) = projects.first() {
        unlock(
            "first-project",
            "First Steps",
            "Created your first project",
            "🚀",
            first.created_at,
            AchievementCategory::Projects,
        );
    }
    if stats.completed_projects >= 1 {
        unlock(
            "project-complete",
            "Project Finisher",
            "Completed your first project",
            "✅",
            now,
            AchievementCategory::Projects,
        );
    }
    if stats.completed_tasks >= 10 {
        unlock(
            "task-master",
            "Task Master",
            "Completed 10+ tasks",
            "📋",
            now,
            AchievementCategory::Tasks,
        );
    }
    if stats.total_projects >= 5 {
        unlock(
            "serial-innovator",
            "Serial Innovator",
            "Created 5+ projects",
            "💡",
            now,
            AchievementCategory::Innovation,
        );
    }
    if stats.average_progress >= 80 {
        unlock(
            "high-achiever",
            "High Achiever",
            "Maintained 80%+ average progress",
            "🏆",
            now,
            AchievementCategory::Milestone,
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).unwrap()
    }

    fn today() -> NaiveDate {
        now().date_naive()
    }

    fn project(id: &str, tasks: Vec<Task>) -> Project {
        Project::new(id, "u1", id, "idea", today() + Duration::days(10), now()).with_tasks(tasks)
    }

    fn done(id: &str) -> Task {
        let mut t = Task::new(id, id);
        t.completed = true;
        t
    }

    #[test]
    fn test_task_stats() {
        let yesterday = today() - Duration::days(1);
        let p = project(
            "a",
            vec![
                done("t1"),
                Task::new("t2", "late").with_due_date(yesterday),
                Task::new("t3", "hot").with_priority(Priority::High),
                done("t4").with_priority(Priority::High).with_due_date(yesterday),
            ],
        );
        let s = task_stats(&[p], today());
        assert_eq!(
            s,
            TaskStats {
                total: 4,
                completed: 2,
                overdue: 1,
                open_high: 1,
            }
        );
    }

    #[test]
    fn test_dashboard_summary() {
        let tomorrow = today() + Duration::days(1);
        let later = today() + Duration::days(5);
        let a = project(
            "a",
            vec![
                Task::new("t1", "x").with_priority(Priority::High).with_due_date(tomorrow),
                Task::new("t2", "y").with_priority(Priority::High).with_due_date(later),
                Task::new("t3", "z").with_priority(Priority::High),
                done("t4"),
            ],
        );
        let b = project("b", vec![done("t5"), done("t6")]);
        let s = dashboard_summary(&[a, b], now(), chrono_tz::UTC);
        assert_eq!(s.projects, 2);
        // (25 + 100) / 2 = 62.5 -> 63
        assert_eq!(s.average_progress, 63);
        assert_eq!(s.urgent_tasks, 1);
    }

    #[test]
    fn test_user_stats_and_achievements() {
        let tasks: Vec<Task> = (0..10).map(|i| done(&format!("t{i}"))).collect();
        let projects = vec![project("a", tasks)];
        let stats = user_stats(&projects);
        assert_eq!(stats.completed_projects, 1);
        assert_eq!(stats.completed_tasks, 10);
        assert_eq!(stats.hackathons_participated, 3);
        assert_eq!(stats.pitches_optimized, 3);
        assert_eq!(stats.questions_asked, 23);

        let ids: Vec<&str> = achievements(&projects, now()).iter().map(|a| a.id).collect();
        assert_eq!(
            ids,
            vec!["first-project", "project-complete", "task-master", "high-achiever"]
        );
    }

    #[test]
    fn test_no_projects_no_achievements() {
        assert!(achievements(&[], now()).is_empty());
        assert_eq!(user_stats(&[]).average_progress, 0);
        assert_eq!(dashboard_summary(&[], now(), chrono_tz::UTC).average_progress, 0);
    }

    #[test]
    fn test_dashboard_horizon_uses_local_date() {
        // 2026-09-01 23:30 UTC is already 2026-09-02 in Tokyo, so the horizon
        // reaches 2026-09-03 there but only 2026-09-02 in UTC.
        let late = Utc.with_ymd_and_hms(2026, 9, 1, 23, 30, 0).unwrap();
        let due = NaiveDate::from_ymd_opt(2026, 9, 3).unwrap();
        let p = project(
            "a",
            vec![Task::new("t1", "x").with_priority(Priority::High).with_due_date(due)],
        );
        let projects = [p];
        assert_eq!(dashboard_summary(&projects, late, chrono_tz::UTC).urgent_tasks, 0);
        assert_eq!(dashboard_summary(&projects, late, chrono_tz::Asia::Tokyo).urgent_tasks, 1);
    }
}
