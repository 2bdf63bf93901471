//! Persisted-state layout: whole-document blobs (`user`, `projects` and the
//! signed-out `profiles`), each wrapped in a versioned envelope.
//!
//! Reads never fail. A missing blob is "no data"; an unreadable, undecodable or
//! foreign-version blob logs a warning and yields the default.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io;

pub const SCHEMA_VERSION: u32 = 1;

pub const USER_KEY: &str = "user";
pub const PROJECTS_KEY: &str = "projects";
/// Profiles of users who signed out, keyed by user id.
pub const PROFILES_KEY: &str = "profiles";

#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    schema_version: u32,
    data: T,
}

/// Key/value storage for whole blobs, in the spirit of browser local storage.
pub trait BlobStore {
    fn read(&self, key: &str) -> io::Result<Option<String>>;
    fn write(&mut self, key: &str, blob: &str) -> io::Result<()>;
    fn remove(&mut self, key: &str) -> io::Result<()>;
}

pub fn encode<T: Serialize>(data: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&Envelope {
        schema_version: SCHEMA_VERSION,
        data,
    })
}

pub fn decode<T: DeserializeOwned>(blob: &str) -> Result<T, DecodeError> {
    #[derive(Deserialize)]
    struct Header {
        schema_version: u32,
    }

    let header: Header = serde_json::from_str(blob).map_err(DecodeError::Malformed)?;
    if header.schema_version != SCHEMA_VERSION {
        return Err(DecodeError::UnsupportedVersion(header.schema_version));
    }
    let env: Envelope<T> = serde_json::from_str(blob).map_err(DecodeError::Malformed)?;
    Ok(env.data)
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed blob: {0}")]
    Malformed(serde_json::Error),
    #[error("unsupported schema version {0}")]
    UnsupportedVersion(u32),
}

/// Read and decode `key`, falling back to `T::default()` on any failure.
pub fn load_or_default<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: BlobStore + ?Sized,
{
    let blob = match store.read(key) {
        Ok(Some(blob)) => blob,
        Ok(None) => return T::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "could not read stored state; starting empty");
            return T::default();
        }
    };

    match decode(&blob) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding stored state");
            T::default()
        }
    }
}

/// In-process store; nothing survives the value.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(mut self, key: &str, blob: impl Into<String>) -> Self {
        self.blobs.insert(key.to_string(), blob.into());
        self
    }
}

impl BlobStore for MemoryStore {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn write(&mut self, key: &str, blob: &str) -> io::Result<()> {
        self.blobs.insert(key.to_string(), blob.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        self.blobs.remove(key);
        Ok(())
    }
}
