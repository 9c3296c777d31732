//! File-based response cache
//!
//! One JSON record per key under the cache root. Records expire lazily: a
//! stale record is reported as a miss and left on disk until overwritten.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::application::errors::CacheError;
use crate::domain::entities::ActionType;
use crate::domain::traits::ResponseStore;

/// Default time-to-live of a record
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// On-disk record. No version field: changing it invalidates old records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub timestamp: DateTime<Utc>,
    pub response: String,
}

/// Content-addressed, TTL-based response cache
#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
    ttl: Duration,
}

impl ResponseCache {
    /// Open a cache rooted at `dir`, creating it (and parents) if absent
    pub fn open(dir: impl Into<PathBuf>, ttl: Duration) -> Result<Self, CacheError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, ttl })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Hex SHA-256 of `"{action}:{text}"`
    pub fn key(action: ActionType, text: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(action.as_str().as_bytes());
        hasher.update(b":");
        hasher.update(text.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    fn read_entry(&self, path: &Path) -> Result<Option<CacheEntry>, CacheError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn is_fresh(&self, entry: &CacheEntry) -> bool {
        let age = Utc::now().signed_duration_since(entry.timestamp);
        // A timestamp from the future (clock skew) counts as age zero
        let age = age.to_std().unwrap_or(Duration::ZERO);
        age < self.ttl
    }

    fn write_entry(&self, key: &str, entry: &CacheEntry) -> Result<(), CacheError> {
        fs::create_dir_all(&self.dir)?;
        let tmp = self.dir.join(format!(".{}.{}.tmp", key, std::process::id()));
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(serde_json::to_string(entry)?.as_bytes())?;
            file.sync_all()?;
        }
        if let Err(e) = fs::rename(&tmp, self.path_for(key)) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

impl ResponseStore for ResponseCache {
    fn get(&self, action: ActionType, text: &str) -> Option<String> {
        let key = Self::key(action, text);
        let path = self.path_for(&key);

        match self.read_entry(&path) {
            Ok(Some(entry)) if self.is_fresh(&entry) => {
                tracing::debug!(%action, key = %key, "Cache hit");
                Some(entry.response)
            }
            Ok(Some(_)) => {
                tracing::debug!(%action, key = %key, "Cache entry expired");
                None
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Ignoring unreadable cache entry {}: {}", path.display(), e);
                None
            }
        }
    }

    fn put(&self, action: ActionType, text: &str, response: &str) -> Result<(), CacheError> {
        let key = Self::key(action, text);
        let entry = CacheEntry {
            timestamp: Utc::now(),
            response: response.to_string(),
        };
        self.write_entry(&key, &entry)?;
        tracing::debug!(%action, key = %key, "Cached response");
        Ok(())
    }
}
