use anyhow::{Context, Result};
use innova_core::{AppState, BlobStore};
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::config::Config;

/// `$INNOVA_HOME`, or `~/.innova`.
pub fn innova_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("INNOVA_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".innova"))
}

pub fn ensure_innova_home() -> Result<PathBuf> {
    let dir = innova_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// One `<key>.json` file per blob.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileStore {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, key: &str, blob: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        // Temp file, then rename into place.
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, blob)?;
        fs::rename(&tmp, self.path(key))
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.path(key)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// Load app state from `~/.innova` with the configured timezone and
/// notification thresholds.
pub fn open_state(cfg: &Config) -> Result<AppState<FileStore>> {
    let dir = ensure_innova_home()?;
    let tz = cfg.timezone()?;
    Ok(AppState::load(FileStore::new(dir), tz).with_policy(cfg.notification_policy()))
}
