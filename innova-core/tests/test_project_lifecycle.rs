use chrono::{Duration, TimeZone, Utc};
use chrono_tz::Tz;
use innova_core::{
    AppState, MemoryStore, NewProject, Priority, Responder, View, dashboard_summary, task_stats,
};

/// Sign in, plan a project, work through half of it, and watch every derived view agree.
#[test]
fn test_half_done_project_reads_fifty() {
    let tz: Tz = "America/Chicago".parse().unwrap();
    let now = Utc.with_ymd_and_hms(2026, 11, 2, 15, 0, 0).unwrap();

    let mut app = AppState::load(MemoryStore::new(), tz);
    app.sign_in("team@hack.dev", Some("Team Rocket"), now).unwrap();
    app.navigate(View::DeadlineManagement).unwrap();

    let pid = app
        .create_project(
            NewProject {
                name: "Green Route".to_string(),
                idea: "Carbon-aware trip planner".to_string(),
                deadline: "2026-11-04".to_string(),
                priority: Priority::High,
            },
            now,
        )
        .unwrap()
        .id
        .clone();

    let project = app.project(&pid).unwrap();
    assert_eq!(project.tasks.len(), 8);
    let today = app.today(now);
    let deadline = project.deadline;
    assert!(project
        .tasks
        .iter()
        .all(|t| t.due_date.is_some_and(|d| d >= today && d <= deadline)));

    // Two days out at 0%: urgency plus low progress.
    let ids: Vec<String> = app.notifications(now).into_iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![format!("deadline-{pid}"), format!("progress-{pid}")]);

    let task_ids: Vec<String> = project.tasks.iter().map(|t| t.id.clone()).collect();
    for id in &task_ids[..4] {
        app.toggle_task(&pid, id).unwrap();
    }
    assert_eq!(app.project(&pid).unwrap().progress, 50);

    let mine = app.my_projects_owned();
    let stats = task_stats(&mine, today);
    assert_eq!((stats.total, stats.completed), (8, 4));
    assert_eq!(dashboard_summary(&mine, now, tz).average_progress, 50);

    // Toggling one back and forth lands on the same value.
    app.toggle_task(&pid, &task_ids[0]).unwrap();
    app.toggle_task(&pid, &task_ids[0]).unwrap();
    assert_eq!(app.project(&pid).unwrap().progress, 50);

    // One more task done pushes it past the pitch-ready threshold.
    app.toggle_task(&pid, &task_ids[4]).unwrap();
    let later = now + Duration::hours(1);
    let ids: Vec<String> = app.notifications(later).into_iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![format!("deadline-{pid}"), "pitch-ready".to_string()]);
}

#[test]
fn test_reload_from_store_matches() {
    let now = Utc.with_ymd_and_hms(2026, 11, 2, 15, 0, 0).unwrap();
    let mut app = AppState::load(MemoryStore::new(), Tz::UTC);
    app.sign_in("solo@hack.dev", None, now).unwrap();
    let pid = app
        .create_project(
            NewProject {
                name: "Solo".to_string(),
                idea: "Tiny idea".to_string(),
                deadline: "2026-11-02".to_string(),
                priority: Priority::Low,
            },
            now,
        )
        .unwrap()
        .id
        .clone();

    // Deadline today: every due date collapses onto it.
    let today = app.today(now);
    assert!(app.project(&pid).unwrap().tasks.iter().all(|t| t.due_date == Some(today)));

    let reloaded = AppState::load(app.store().clone(), Tz::UTC);
    assert_eq!(reloaded.user().unwrap().name, "solo");
    assert_eq!(reloaded.my_projects().len(), 1);
    assert_eq!(reloaded.project(&pid).unwrap(), app.project(&pid).unwrap());
}

#[test]
fn test_guide_answers_tech_stack_questions() {
    let guide = Responder::guide();
    let mut rng = rand_core::OsRng;
    let reply = guide.respond("Can you suggest a tech stack?", &mut rng);
    assert_eq!(reply.topic, Some("tech-stack"));
    assert!(reply.text.contains("Codex"));
}
