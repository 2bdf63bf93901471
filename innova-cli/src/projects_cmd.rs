use anyhow::{bail, Result};
use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use innova_core::time::days_until;
use innova_core::{task_stats, AppState, BlobStore, NewProject, NewTask, Priority, Project};

use crate::config::Config;
use crate::state::open_state;

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// Create a project and generate its 8-step schedule
    Create {
        #[arg(long)]
        name: String,

        /// One or two sentences describing the idea
        #[arg(long)]
        idea: String,

        /// Submission deadline, YYYY-MM-DD
        #[arg(long)]
        deadline: String,

        #[arg(long, default_value = "medium")]
        priority: Priority,
    },

    /// List your projects with progress and days left
    List {
        /// Print the stored records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one project and its tasks
    Show {
        /// Project id (a unique prefix is enough) or exact name
        project: String,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// Append a task to a project
    Add {
        project: String,

        #[arg(long)]
        title: String,

        #[arg(long, default_value = "medium")]
        priority: Priority,

        /// Optional due date, YYYY-MM-DD
        #[arg(long)]
        due: Option<NaiveDate>,
    },

    /// Flip a task between open and done
    Toggle {
        project: String,
        /// Task number as listed by `project show`, or task id
        task: String,
    },

    /// Remove a task
    Delete { project: String, task: String },

    /// Totals across all your projects
    Stats,
}

pub fn run_project(cfg: &Config, cmd: ProjectCommand) -> Result<()> {
    let mut app = open_state(cfg)?;
    let now = Utc::now();

    match cmd {
        ProjectCommand::Create {
            name,
            idea,
            deadline,
            priority,
        } => {
            let (today, tz) = (app.today(now), app.timezone());
            let project = app.create_project(
                NewProject {
                    name,
                    idea,
                    deadline,
                    priority,
                },
                now,
            )?;
            println!("Created project {} ({})\n", project.name, short_id(&project.id));
            print_project(project, today, days_until(project.deadline, now, tz));
        }

        ProjectCommand::List { json } => {
            let projects = app.my_projects();
            if json {
                println!("{}", serde_json::to_string_pretty(&projects)?);
                return Ok(());
            }
            if projects.is_empty() {
                println!("No projects yet. Create one: innova project create --name .. --idea .. --deadline YYYY-MM-DD");
                return Ok(());
            }
            for p in projects {
                println!("{}", project_line(p, days_until(p.deadline, now, app.timezone())));
            }
        }

        ProjectCommand::Show { project, json } => {
            let id = resolve_project(&app, &project)?;
            let p = app.project(&id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(p)?);
                return Ok(());
            }
            print_project(p, app.today(now), days_until(p.deadline, now, app.timezone()));
        }
    }

    Ok(())
}

pub fn run_task(cfg: &Config, cmd: TaskCommand) -> Result<()> {
    let mut app = open_state(cfg)?;
    let now = Utc::now();

    match cmd {
        TaskCommand::Add {
            project,
            title,
            priority,
            due,
        } => {
            let id = resolve_project(&app, &project)?;
            let task = app.add_task(
                &id,
                NewTask {
                    title,
                    priority,
                    due_date: due,
                },
            )?;
            println!("Added [{}] {}", task.priority, task.title);
            println!("Progress: {}%", app.project(&id)?.progress);
        }

        TaskCommand::Toggle { project, task } => {
            let id = resolve_project(&app, &project)?;
            let task_id = resolve_task(app.project(&id)?, &task)?;
            let progress = app.toggle_task(&id, &task_id)?;
            if let Some(t) = app.project(&id)?.task(&task_id) {
                let verb = if t.completed { "Done" } else { "Reopened" };
                println!("{verb}: {}", t.title);
            }
            println!("Progress: {progress}%");
        }

        TaskCommand::Delete { project, task } => {
            let id = resolve_project(&app, &project)?;
            let p = app.project(&id)?;
            let task_id = resolve_task(p, &task)?;
            let title = p.task(&task_id).map(|t| t.title.clone()).unwrap_or_default();
            let progress = app.delete_task(&id, &task_id)?;
            println!("Deleted: {title}");
            println!("Progress: {progress}%");
        }

        TaskCommand::Stats => {
            if app.user().is_none() {
                bail!("Not signed in. Run: innova signin --email you@example.com");
            }
            print_task_stats(&app.my_projects_owned(), app.today(now));
        }
    }

    Ok(())
}

pub fn print_task_stats(projects: &[Project], today: NaiveDate) {
    let s = task_stats(projects, today);
    println!("# Task stats\n");
    println!("Total:         {}", s.total);
    println!("Completed:     {}", s.completed);
    println!("Overdue:       {}", s.overdue);
    println!("Open & high:   {}", s.open_high);
}

/// Exact id, unique id prefix, or case-insensitive exact name.
pub fn resolve_project<S: BlobStore>(app: &AppState<S>, needle: &str) -> Result<String> {
    let needle = needle.trim();
    let mine = app.my_projects();
    if mine.is_empty() && app.user().is_none() {
        bail!("Not signed in. Run: innova signin --email you@example.com");
    }

    if let Some(p) = mine.iter().find(|p| p.id == needle) {
        return Ok(p.id.clone());
    }
    let by_prefix: Vec<_> = mine
        .iter()
        .filter(|p| !needle.is_empty() && p.id.starts_with(needle))
        .collect();
    match by_prefix.as_slice() {
        [only] => return Ok(only.id.clone()),
        [] => {}
        _ => bail!("'{needle}' matches {} projects; use a longer id prefix", by_prefix.len()),
    }
    let by_name: Vec<_> = mine
        .iter()
        .filter(|p| p.name.eq_ignore_ascii_case(needle))
        .collect();
    match by_name.as_slice() {
        [only] => Ok(only.id.clone()),
        [] => bail!("No project matches '{needle}'. List them: innova project list"),
        _ => bail!("Several projects are named '{needle}'; use the id"),
    }
}

/// 1-based position in the task list, or the task id itself.
pub fn resolve_task(project: &Project, needle: &str) -> Result<String> {
    let needle = needle.trim();
    if let Some(t) = project.task(needle) {
        return Ok(t.id.clone());
    }
    if let Ok(n) = needle.parse::<usize>() {
        if let Some(t) = n.checked_sub(1).and_then(|i| project.tasks.get(i)) {
            return Ok(t.id.clone());
        }
        bail!("Project has {} tasks; there is no #{n}", project.tasks.len());
    }
    bail!("No task '{needle}' in {}", project.name)
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn days_label(days: i64) -> String {
    match days {
        d if d < 0 => format!("{} days overdue", -d),
        0 => "due today".to_string(),
        1 => "1 day left".to_string(),
        d => format!("{d} days left"),
    }
}

pub fn project_line(p: &Project, days: i64) -> String {
    format!(
        "{}  {:<24} {:>3}%  [{}]  {} ({})",
        short_id(&p.id),
        p.name,
        p.progress,
        p.priority,
        p.deadline,
        days_label(days)
    )
}

pub fn print_project(p: &Project, today: NaiveDate, days: i64) {
    println!("# {}  ({})", p.name, p.id);
    println!("Idea:      {}", p.idea);
    println!("Deadline:  {} ({})", p.deadline, days_label(days));
    println!("Priority:  {}", p.priority);
    println!(
        "Progress:  {}% ({}/{} tasks)\n",
        p.progress,
        p.completed_count(),
        p.tasks.len()
    );

    for (i, t) in p.tasks.iter().enumerate() {
        let mark = if t.completed { "x" } else { " " };
        let due = match t.due_date {
            Some(d) if !t.completed && t.is_overdue(today) => format!("  due {d} (overdue)"),
            Some(d) => format!("  due {d}"),
            None => String::new(),
        };
        println!("{:>2}. [{mark}] {:<6} {}{due}", i + 1, t.priority.as_str(), t.title);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use innova_core::MemoryStore;

    fn app_with_projects(names: &[&str]) -> AppState<MemoryStore> {
        let now = Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap();
        let mut app = AppState::load(MemoryStore::new(), chrono_tz::UTC);
        app.sign_in("cli@example.com", None, now).unwrap();
        for name in names {
            app.create_project(
                NewProject {
                    name: name.to_string(),
                    idea: "Something useful".into(),
                    deadline: "2026-05-20".into(),
                    ..NewProject::default()
                },
                now,
            )
            .unwrap();
        }
        app
    }

    #[test]
    fn test_resolve_project_by_prefix_and_name() {
        let app = app_with_projects(&["Alpha", "Beta"]);
        let alpha = app.my_projects()[0].id.clone();

        assert_eq!(resolve_project(&app, &alpha).unwrap(), alpha);
        assert_eq!(resolve_project(&app, &alpha[..12]).unwrap(), alpha);
        assert_eq!(resolve_project(&app, "alpha").unwrap(), alpha);
        assert!(resolve_project(&app, "gamma").is_err());
    }

    #[test]
    fn test_resolve_project_requires_sign_in() {
        let app = AppState::load(MemoryStore::new(), chrono_tz::UTC);
        let err = resolve_project(&app, "anything").unwrap_err();
        assert!(err.to_string().contains("Not signed in"));
    }

    #[test]
    fn test_resolve_task_by_number_or_id() {
        let app = app_with_projects(&["Alpha"]);
        let p = app.my_projects()[0];

        assert_eq!(resolve_task(p, "1").unwrap(), p.tasks[0].id);
        assert_eq!(resolve_task(p, "8").unwrap(), p.tasks[7].id);
        assert_eq!(resolve_task(p, &p.tasks[3].id).unwrap(), p.tasks[3].id);
        assert!(resolve_task(p, "0").is_err());
        assert!(resolve_task(p, "9").is_err());
        assert!(resolve_task(p, "nope").is_err());
    }

    #[test]
    fn test_days_label() {
        assert_eq!(days_label(-2), "2 days overdue");
        assert_eq!(days_label(0), "due today");
        assert_eq!(days_label(1), "1 day left");
        assert_eq!(days_label(9), "9 days left");
    }
}
