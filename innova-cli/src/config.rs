use anyhow::{Context, Result};
use chrono_tz::Tz;
use innova_core::NotificationPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::state::ensure_innova_home;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub profile: ProfileSection,
    pub coach: CoachSection,
    pub chat: ChatSection,
    pub notifications: NotificationsSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSection {
    /// IANA timezone that decides what "today" is.
    pub timezone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoachSection {
    /// Simulated thinking time before idea/pitch results (0 = instant).
    pub latency_ms: u64,
    /// Refresh cadence for `notifications --watch`.
    pub notify_interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSection {
    /// Base typing delay; replies add up to 1.5s of jitter on top.
    pub typing_delay_ms: u64,
}

/// Thresholds for the agent messages on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationsSection {
    pub urgent_within_days: i64,
    pub low_progress_below: u8,
    pub low_progress_within_days: i64,
    pub pitch_ready_above: u8,
}

impl Default for NotificationsSection {
    fn default() -> Self {
        let p = NotificationPolicy::default();
        Self {
            urgent_within_days: p.urgent_within_days,
            low_progress_below: p.low_progress_below,
            low_progress_within_days: p.low_progress_within_days,
            pitch_ready_above: p.pitch_ready_above,
        }
    }
}

impl Default for ProfileSection {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
        }
    }
}

impl Default for CoachSection {
    fn default() -> Self {
        Self {
            latency_ms: 2000,
            notify_interval_secs: 60,
        }
    }
}

impl Default for ChatSection {
    fn default() -> Self {
        Self {
            typing_delay_ms: 1000,
        }
    }
}

impl Config {
    pub fn timezone(&self) -> Result<Tz> {
        innova_core::time::parse_timezone(&self.profile.timezone)
            .with_context(|| "config.toml [profile].timezone")
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.coach.latency_ms)
    }

    pub fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.chat.typing_delay_ms)
    }

    pub fn notification_policy(&self) -> NotificationPolicy {
        let n = &self.notifications;
        NotificationPolicy {
            urgent_within_days: n.urgent_within_days,
            low_progress_below: n.low_progress_below,
            low_progress_within_days: n.low_progress_within_days,
            pitch_ready_above: n.pitch_ready_above,
        }
    }

    pub fn notify_interval(&self) -> Duration {
        Duration::from_secs(self.coach.notify_interval_secs.max(1))
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_innova_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).context("parse config.toml")
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let cfg = Config::default();
    save_config(&cfg)?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn show_config() -> Result<()> {
    let cfg = load_config()?;
    println!("# {}", config_path()?.display());
    print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_fills_defaults() {
        let cfg: Config = toml::from_str("[coach]\nlatency_ms = 0\n").unwrap();
        assert_eq!(cfg.coach.latency_ms, 0);
        assert_eq!(cfg.coach.notify_interval_secs, 60);
        assert_eq!(cfg.profile.timezone, "UTC");
        assert_eq!(cfg.latency(), Duration::ZERO);
    }

    #[test]
    fn test_bad_timezone_is_an_error() {
        let cfg: Config = toml::from_str("[profile]\ntimezone = \"Nowhere/Land\"\n").unwrap();
        assert!(cfg.timezone().is_err());
    }

    #[test]
    fn test_default_round_trips() {
        let s = toml::to_string_pretty(&Config::default()).unwrap();
        let back: Config = toml::from_str(&s).unwrap();
        assert_eq!(back.chat.typing_delay_ms, 1000);
        assert_eq!(back.notify_interval(), Duration::from_secs(60));
    }

    #[test]
    fn test_notification_thresholds_come_from_file() {
        let cfg: Config =
            toml::from_str("[notifications]\nurgent_within_days = 5\npitch_ready_above = 75\n")
                .unwrap();
        let policy = cfg.notification_policy();
        assert_eq!(policy.urgent_within_days, 5);
        assert_eq!(policy.pitch_ready_above, 75);
        assert_eq!(policy.low_progress_below, 30);
        assert_eq!(Config::default().notification_policy(), NotificationPolicy::default());
    }
}
