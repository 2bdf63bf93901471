//! Application state: current user, active view and the project collection,
//! behind an explicit mutation API.
//!
//! Every mutation writes the affected blob back through the `BlobStore` before
//! returning, so the stored copy always matches memory.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::error::{require, CoachError, Result};
use crate::notifications::{derive_notifications, AgentMessage, NotificationPolicy};
use crate::persist::{encode, load_or_default, BlobStore, PROFILES_KEY, PROJECTS_KEY, USER_KEY};
use crate::project::Project;
use crate::schedule::generate_schedule;
use crate::task::{Priority, Task};
use crate::time::{local_today, parse_date};
use crate::user::{ProfilePatch, User};
use crate::view::View;

/// Submission of the create-project form.
#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub name: String,
    pub idea: String,
    /// `YYYY-MM-DD`, as typed.
    pub deadline: String,
    pub priority: Priority,
}

/// Submission of the add-task form.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
}

pub struct AppState<S: BlobStore> {
    store: S,
    tz: Tz,
    user: Option<User>,
    view: View,
    projects: Vec<Project>,
    policy: NotificationPolicy,
}

impl<S: BlobStore> AppState<S> {
    /// Read both blobs. A stored user resumes on the dashboard.
    pub fn load(store: S, tz: Tz) -> Self {
        let user: Option<User> = load_or_default(&store, USER_KEY);
        let mut projects: Vec<Project> = load_or_default(&store, PROJECTS_KEY);
        // Stored progress is derived data; never trust it over the tasks.
        projects.iter_mut().for_each(Project::recompute_progress);

        let view = if user.is_some() {
            View::Dashboard
        } else {
            View::Landing
        };
        tracing::debug!(signed_in = user.is_some(), projects = projects.len(), "state loaded");

        Self {
            store,
            tz,
            user,
            view,
            projects,
            policy: NotificationPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: NotificationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every stored project, whoever owns it.
    pub fn all_projects(&self) -> &[Project] {
        &self.projects
    }

    /// Projects owned by the signed-in user, in creation order.
    pub fn my_projects(&self) -> Vec<&Project> {
        match &self.user {
            Some(u) => self.projects.iter().filter(|p| p.user_id == u.id).collect(),
            None => Vec::new(),
        }
    }

    /// Owned copies of [`Self::my_projects`], for the slice-based derivations.
    pub fn my_projects_owned(&self) -> Vec<Project> {
        self.my_projects().into_iter().cloned().collect()
    }

    pub fn project(&self, project_id: &str) -> Result<&Project> {
        let user_id = self.require_user()?.id.as_str();
        self.projects
            .iter()
            .find(|p| p.id == project_id && p.user_id == user_id)
            .ok_or_else(|| CoachError::ProjectNotFound(project_id.to_string()))
    }

    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        local_today(now, self.tz)
    }

    /// Fresh advisory messages for the signed-in user.
    pub fn notifications(&self, now: DateTime<Utc>) -> Vec<AgentMessage> {
        if self.user.is_none() {
            return Vec::new();
        }
        derive_notifications(&self.my_projects_owned(), now, self.tz, self.policy)
    }

    pub fn sign_in(&mut self, email: &str, name: Option<&str>, now: DateTime<Utc>) -> Result<&User> {
        let mut user = User::sign_in(email, name, now)?;

        // A known identity keeps what the user already filled in, and keeps their
        // display name unless a new one was typed.
        let prev = match self.user.as_ref() {
            Some(current) if current.id == user.id => Some(current.clone()),
            _ => self.stored_profiles().remove(&user.id),
        };
        if let Some(prev) = prev {
            let typed_name = name.map(str::trim).filter(|n| !n.is_empty());
            user = User {
                name: typed_name.map_or_else(|| prev.name.clone(), str::to_string),
                email: user.email,
                last_active: now,
                ..prev
            };
        }

        if let Some(current) = self.user.as_ref().filter(|u| u.id != user.id).cloned() {
            self.archive_profile(current)?;
        }
        tracing::debug!(user_id = %user.id, "signed in");
        self.persist_user(Some(&user))?;
        self.view = View::Dashboard;
        Ok(self.user.insert(user))
    }

    /// Ends the session. The profile is kept for the next sign-in with the same email.
    pub fn sign_out(&mut self) -> Result<()> {
        if let Some(user) = self.user.clone() {
            self.archive_profile(user)?;
        }
        self.user = None;
        self.view = View::Landing;
        self.store.remove(USER_KEY).map_err(|e| CoachError::Persist {
            key: USER_KEY,
            message: e.to_string(),
        })?;
        tracing::debug!("signed out");
        Ok(())
    }

    pub fn update_profile(&mut self, patch: ProfilePatch, now: DateTime<Utc>) -> Result<&User> {
        let mut user = self.require_user()?.clone();
        user.apply(patch, now);
        self.persist_user(Some(&user))?;
        Ok(self.user.insert(user))
    }

    pub fn navigate(&mut self, view: View) -> Result<View> {
        if view.requires_user() {
            self.require_user()?;
        }
        tracing::debug!(from = %self.view, to = %view, "navigate");
        self.view = view;
        Ok(view)
    }

    pub fn create_project(&mut self, form: NewProject, now: DateTime<Utc>) -> Result<&Project> {
        let user_id = self.require_user()?.id.clone();
        let name = require("name", &form.name)?;
        let idea = require("idea", &form.idea)?;
        let deadline = parse_date(require("deadline", &form.deadline)?)?;

        let id = Uuid::new_v4().to_string();
        let tasks = generate_schedule(idea, deadline, self.today(now), &id)?;
        let project = Project::new(id, user_id, name, idea, deadline, now)
            .with_priority(form.priority)
            .with_tasks(tasks);

        tracing::debug!(project_id = %project.id, %deadline, "project created");
        self.projects.push(project);
        self.persist_projects()?;
        let idx = self.projects.len() - 1;
        Ok(&self.projects[idx])
    }

    pub fn add_task(&mut self, project_id: &str, form: NewTask) -> Result<&Task> {
        let title = require("title", &form.title)?.to_string();
        let project = self.project_mut(project_id)?;

        let mut task = Task::new(format!("{}-task-{}", project.id, Uuid::new_v4().simple()), title)
            .with_priority(form.priority);
        task.due_date = form.due_date;
        project.add_task(task);

        let progress = project.progress;
        tracing::debug!(project_id, progress, "task added");
        self.persist_projects()?;

        let project = self.project(project_id)?;
        project
            .tasks
            .last()
            .ok_or_else(|| CoachError::ProjectNotFound(project_id.to_string()))
    }

    /// Returns the project's new progress.
    pub fn toggle_task(&mut self, project_id: &str, task_id: &str) -> Result<u8> {
        let project = self.project_mut(project_id)?;
        let completed = project.toggle_task(task_id)?;
        let progress = project.progress;
        tracing::debug!(project_id, task_id, completed, progress, "task toggled");
        self.persist_projects()?;
        Ok(progress)
    }

    /// Returns the project's new progress.
    pub fn delete_task(&mut self, project_id: &str, task_id: &str) -> Result<u8> {
        let project = self.project_mut(project_id)?;
        project.delete_task(task_id)?;
        let progress = project.progress;
        tracing::debug!(project_id, task_id, progress, "task deleted");
        self.persist_projects()?;
        Ok(progress)
    }

    /// Swap in a whole collection (the only way projects go away).
    pub fn replace_projects(&mut self, mut projects: Vec<Project>) -> Result<()> {
        projects.iter_mut().for_each(Project::recompute_progress);
        self.projects = projects;
        self.persist_projects()
    }

    fn require_user(&self) -> Result<&User> {
        self.user.as_ref().ok_or(CoachError::NotSignedIn)
    }

    fn project_mut(&mut self, project_id: &str) -> Result<&mut Project> {
        let user_id = self.require_user()?.id.clone();
        self.projects
            .iter_mut()
            .find(|p| p.id == project_id && p.user_id == user_id)
            .ok_or_else(|| CoachError::ProjectNotFound(project_id.to_string()))
    }

    fn persist_user(&mut self, user: Option<&User>) -> Result<()> {
        self.write_blob(USER_KEY, encode(&user))
    }

    fn stored_profiles(&self) -> BTreeMap<String, User> {
        load_or_default(&self.store, PROFILES_KEY)
    }

    fn archive_profile(&mut self, user: User) -> Result<()> {
        let mut profiles = self.stored_profiles();
        profiles.insert(user.id.clone(), user);
        self.write_blob(PROFILES_KEY, encode(&profiles))
    }

    fn persist_projects(&mut self) -> Result<()> {
        let blob = encode(&self.projects);
        self.write_blob(PROJECTS_KEY, blob)
    }

    fn write_blob(&mut self, key: &'static str, blob: serde_json::Result<String>) -> Result<()> {
        let persist_err = |message: String| CoachError::Persist { key, message };
        let blob = blob.map_err(|e| persist_err(e.to_string()))?;
        self.store
            .write(key, &blob)
            .map_err(|e| persist_err(e.to_string()))?;
        tracing::debug!(key, bytes = blob.len(), "state written");
        Ok(())
    }
}
