//! User identity and profile.
//!
//! No credentials: any email is an identity. The id is derived from the
//! normalized email so signing in again finds the same projects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{require, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    pub joined_date: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

/// Stable id for an email address (UUIDv5 over the lower-cased address).
pub fn user_id_for_email(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    Uuid::new_v5(&Uuid::NAMESPACE_URL, format!("mailto:{normalized}").as_bytes()).to_string()
}

/// Login form without a name: the local part of the email.
fn name_from_email(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

impl User {
    /// Identity for a sign-in submission. Email is required; a blank name falls
    /// back to the email's local part.
    pub fn sign_in(email: &str, name: Option<&str>, now: DateTime<Utc>) -> Result<Self> {
        let email = require("email", email)?;
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| name_from_email(email));

        Ok(Self {
            id: user_id_for_email(email),
            name: name.to_string(),
            email: email.to_string(),
            avatar: None,
            bio: None,
            location: None,
            website: None,
            github: None,
            linkedin: None,
            joined_date: now,
            last_active: now,
        })
    }

    pub fn apply(&mut self, patch: ProfilePatch, now: DateTime<Utc>) {
        fn set(slot: &mut Option<String>, value: Option<String>) {
            if let Some(v) = value {
                let v = v.trim();
                *slot = if v.is_empty() { None } else { Some(v.to_string()) };
            }
        }

        if let Some(name) = patch.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            self.name = name.to_string();
        }
        set(&mut self.avatar, patch.avatar);
        set(&mut self.bio, patch.bio);
        set(&mut self.location, patch.location);
        set(&mut self.website, patch.website);
        set(&mut self.github, patch.github);
        set(&mut self.linkedin, patch.linkedin);
        self.last_active = now;
    }
}

/// Profile edit. `None` leaves a field alone; an empty string clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoachError;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 8, 30, 0).unwrap()
    }

    #[test]
    fn test_login_derives_name() {
        let u = User::sign_in("ada@example.com", None, now()).unwrap();
        assert_eq!(u.name, "ada");
        assert_eq!(u.joined_date, now());
        assert_eq!(u.last_active, now());

        let u = User::sign_in("ada@example.com", Some("  "), now()).unwrap();
        assert_eq!(u.name, "ada");
    }

    #[test]
    fn test_register_keeps_name() {
        let u = User::sign_in("ada@example.com", Some("Ada Lovelace"), now()).unwrap();
        assert_eq!(u.name, "Ada Lovelace");
    }

    #[test]
    fn test_id_is_stable_per_email() {
        assert_eq!(user_id_for_email("Ada@Example.com "), user_id_for_email("ada@example.com"));
        assert_ne!(user_id_for_email("ada@example.com"), user_id_for_email("bob@example.com"));
    }

    #[test]
    fn test_blank_email_rejected() {
        assert_eq!(
            User::sign_in("   ", Some("x"), now()),
            Err(CoachError::InvalidInput { field: "email" })
        );
    }

    #[test]
    fn test_profile_patch() {
        let mut u = User::sign_in("ada@example.com", None, now()).unwrap();
        u.github = Some("old".to_string());
        let later = now() + chrono::Duration::hours(2);
        u.apply(
            ProfilePatch {
                bio: Some("Builds engines".to_string()),
                github: Some(String::new()),
                ..Default::default()
            },
            later,
        );
        assert_eq!(u.bio.as_deref(), Some("Builds engines"));
        assert_eq!(u.github, None);
        assert_eq!(u.name, "ada");
        assert_eq!(u.last_active, later);
        assert_eq!(u.joined_date, now());
    }
}
