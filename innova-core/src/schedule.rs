//! Schedule generator: a fixed hackathon task template spread over the days
//! left before a deadline.
//!
//! The idea text only gates generation; it never changes the template.

use chrono::{Duration, NaiveDate};

use crate::error::{require, Result};
use crate::task::{Priority, Task};

/// One slot of the template: title + hard-coded priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateSlot {
    pub title: &'static str,
    pub priority: Priority,
}

pub const TEMPLATE: [TemplateSlot; 8] = [
    TemplateSlot {
        title: "Project setup and initial configuration",
        priority: Priority::High,
    },
    TemplateSlot {
        title: "Design system and UI mockups",
        priority: Priority::Medium,
    },
    TemplateSlot {
        title: "Core functionality development",
        priority: Priority::High,
    },
    TemplateSlot {
        title: "Database schema and API endpoints",
        priority: Priority::High,
    },
    TemplateSlot {
        title: "Frontend component implementation",
        priority: Priority::Medium,
    },
    TemplateSlot {
        title: "Integration and testing",
        priority: Priority::High,
    },
    TemplateSlot {
        title: "Deployment and final polish",
        priority: Priority::Medium,
    },
    TemplateSlot {
        title: "Pitch deck preparation",
        priority: Priority::Low,
    },
];

/// Calendar days available for the schedule, never less than one.
pub fn schedule_span_days(deadline: NaiveDate, today: NaiveDate) -> i64 {
    (deadline - today).num_days().max(1)
}

/// Due date offset (whole days from today) of template slot `index`.
///
/// Slots are spaced `span / slots` days apart and rounded down to a calendar day,
/// so every offset stays below `span`.
pub fn slot_offset_days(index: usize, slots: usize, span: i64) -> i64 {
    if slots == 0 {
        return 0;
    }
    (index as i64 * span) / slots as i64
}

/// Build the template task list for a new project.
///
/// Task ids are `<id_prefix>-task-<index>`. A deadline of today or earlier
/// collapses every due date onto `today`.
pub fn generate_schedule(
    idea: &str,
    deadline: NaiveDate,
    today: NaiveDate,
    id_prefix: &str,
) -> Result<Vec<Task>> {
    require("idea", idea)?;

    let span = schedule_span_days(deadline, today);
    let slots = TEMPLATE.len();

    let tasks = TEMPLATE
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let due = today + Duration::days(slot_offset_days(i, slots, span));
            Task::new(format!("{id_prefix}-task-{i}"), slot.title)
                .with_priority(slot.priority)
                .with_due_date(due)
        })
        .collect();

    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoachError;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_template_shape() {
        let tasks = generate_schedule("AI study buddy", d(2026, 4, 20), d(2026, 4, 10), "p1").unwrap();
        assert_eq!(tasks.len(), 8);
        assert_eq!(tasks[0].title, "Project setup and initial configuration");
        assert_eq!(tasks[7].title, "Pitch deck preparation");
        assert_eq!(tasks[7].priority, Priority::Low);
        assert!(tasks.iter().all(|t| !t.completed));
        assert_eq!(tasks[3].id, "p1-task-3");
    }

    #[test]
    fn test_due_dates_within_window_and_ordered() {
        let today = d(2026, 4, 10);
        for days_ahead in 1..=60 {
            let deadline = today + Duration::days(days_ahead);
            let tasks = generate_schedule("idea", deadline, today, "p").unwrap();
            let dues: Vec<NaiveDate> = tasks.iter().map(|t| t.due_date.unwrap()).collect();
            assert_eq!(dues[0], today);
            assert!(dues.iter().all(|due| *due >= today && *due <= deadline));
            assert!(dues.windows(2).all(|w| w[0] <= w[1]), "{days_ahead}: {dues:?}");
        }
    }

    #[test]
    fn test_sixteen_days_spreads_two_apart() {
        let today = d(2026, 4, 1);
        let tasks = generate_schedule("idea", d(2026, 4, 17), today, "p").unwrap();
        let offsets: Vec<i64> = tasks
            .iter()
            .map(|t| (t.due_date.unwrap() - today).num_days())
            .collect();
        assert_eq!(offsets, vec![0, 2, 4, 6, 8, 10, 12, 14]);
    }

    #[test]
    fn test_deadline_today_or_past_collapses() {
        let today = d(2026, 4, 10);
        for deadline in [today, d(2026, 4, 1), d(2025, 12, 31)] {
            let tasks = generate_schedule("idea", deadline, today, "p").unwrap();
            assert_eq!(tasks.len(), 8);
            assert!(tasks.iter().all(|t| t.due_date == Some(today)));
        }
    }

    #[test]
    fn test_blank_idea_rejected() {
        assert_eq!(
            generate_schedule("   ", d(2026, 4, 20), d(2026, 4, 10), "p"),
            Err(CoachError::InvalidInput { field: "idea" })
        );
    }
}
