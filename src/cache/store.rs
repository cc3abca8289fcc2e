// Cache store for reading and writing cached data.
// Handles JSON serialization, TTL checking, and the keyed local store used by the viewer.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::Result;

use super::paths::entry_path;

/// TTL for the viewer's local store: 5 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Store key for recent activity events.
pub const EVENTS_KEY: &str = "github_events";

/// Store key for the shaped project list.
pub const PROJECTS_KEY: &str = "github_projects";

/// Wrapper for cached data with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    /// The cached data.
    pub data: T,
    /// When the data was cached.
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    /// Create a new cached data entry stamped with `cached_at`.
    pub fn at(data: T, cached_at: DateTime<Utc>) -> Self {
        Self { data, cached_at }
    }

    /// Entries are fresh while `now - cached_at < ttl`.
    /// A `cached_at` in the future counts as expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        match now.signed_duration_since(self.cached_at).to_std() {
            Ok(elapsed) => elapsed >= ttl,
            Err(_) => true,
        }
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        !self.is_expired_at(now, ttl)
    }
}

/// Read cached JSON data from a file.
pub fn read_cached<T: DeserializeOwned>(path: &Path) -> Result<Option<CachedData<T>>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let cached: CachedData<T> = serde_json::from_str(&contents)?;
    Ok(Some(cached))
}

/// Write a cache entry as JSON, atomically via a temp file.
pub fn write_cached<T: Serialize>(path: &Path, cached: &CachedData<T>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(cached)?;

    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Key-value store with one JSON file per key.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at the platform cache directory.
    pub fn open_default() -> Option<Self> {
        super::paths::cache_dir().map(Self::new)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Get the raw entry for `key`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<CachedData<T>>> {
        read_cached(&entry_path(&self.dir, key))
    }

    /// Get the value for `key` if it is still fresh at `now`.
    ///
    /// Unreadable or corrupt entries are logged and treated as a miss.
    pub fn get_if_valid_at<T: DeserializeOwned>(
        &self,
        key: &str,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Option<T> {
        match self.get::<T>(key) {
            Ok(Some(cached)) if cached.is_valid_at(now, ttl) => Some(cached.data),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(key, error = %e, "ignoring unreadable cache entry");
                None
            }
        }
    }

    /// Store `data` under `key`, stamped with `now`.
    pub fn set_at<T: Serialize>(&self, key: &str, data: &T, now: DateTime<Utc>) -> Result<()> {
        write_cached(&entry_path(&self.dir, key), &CachedData::at(data, now))
    }
}
