use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use newsdesk_common::{CacheError, NewsdeskError};
use newsdesk_config::CacheSettings;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use crate::disk::{self, Sweep};
use crate::entry::CacheEntry;
use crate::eviction::Eviction;

/// Memory + disk cache of content keyed by string.
pub struct ContentCache {
    dir: PathBuf,
    default_ttl: Duration,
    memory: Mutex<HashMap<String, CacheEntry>>,
    runtime: Handle,
}

impl ContentCache {
    /// Open the cache for `settings.category` under the platform cache dir.
    pub fn open(settings: &CacheSettings, runtime: Handle) -> Result<Self, NewsdeskError> {
        let dir = newsdesk_platform::content_cache_dir(&settings.category)?;
        Ok(Self::with_dir(dir, settings.default_ttl(), runtime)?)
    }

    /// Open a cache rooted at `dir`, creating it if needed.
    pub fn with_dir(
        dir: impl Into<PathBuf>,
        default_ttl: Duration,
        runtime: Handle,
    ) -> Result<Self, CacheError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), ttl_secs = default_ttl.as_secs(), "content cache opened");
        Ok(Self {
            dir,
            default_ttl,
            memory: Mutex::new(HashMap::new()),
            runtime,
        })
    }

    /// Store `content` under `key`, replacing any previous entry.
    ///
    /// Without an explicit `expires_at` the entry lives for the default TTL.
    /// The memory tier is updated even if the disk write fails.
    pub fn put(
        &self,
        key: &str,
        content: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<(), CacheError> {
        let expires_at = expires_at.or_else(|| self.default_expiry());
        let entry = CacheEntry::new(key, content, expires_at);

        self.lock().insert(key.to_string(), entry.clone());

        let path = disk::entry_path(&self.dir, key);
        if let Err(e) = disk::write_entry(&path, &entry) {
            warn!(key = %key, path = %path.display(), error = %e, "cache disk write failed");
            return Err(e);
        }
        debug!(key = %key, bytes = content.len(), "cache entry stored");
        Ok(())
    }

    /// Content stored under `key`, if present and unexpired.
    ///
    /// Falls back to the disk tier on a memory miss and promotes a valid
    /// disk entry into memory. A corrupt file is deleted; a file holding a
    /// different key is a miss and is left in place.
    pub fn get(&self, key: &str) -> Option<String> {
        let now = Utc::now();
        if let Some(entry) = self.lock().get(key) {
            return entry.is_valid_at(now).then(|| entry.content.clone());
        }

        let path = disk::entry_path(&self.dir, key);
        let entry = match disk::read_entry(&path) {
            Ok(Some(entry)) => entry,
            Ok(None) => return None,
            Err(CacheError::Serialization(e)) => {
                warn!(key = %key, path = %path.display(), error = %e, "removing corrupt cache file");
                disk::remove_file(&path);
                return None;
            }
            Err(e) => {
                warn!(key = %key, path = %path.display(), error = %e, "cache disk read failed");
                return None;
            }
        };

        if entry.key != key {
            warn!(key = %key, stored = %entry.key, path = %path.display(), "cache file holds a different key");
            return None;
        }
        if !entry.is_valid_at(now) {
            debug!(key = %key, "disk entry expired");
            return None;
        }

        let content = entry.content.clone();
        self.lock().entry(key.to_string()).or_insert(entry);
        debug!(key = %key, "cache entry loaded from disk");
        Some(content)
    }

    /// Drop expired entries from memory now and from disk in the background.
    pub fn evict_expired(&self) -> Eviction {
        let now = Utc::now();
        let memory_removed = {
            let mut memory = self.lock();
            let before = memory.len();
            memory.retain(|_, entry| entry.is_valid_at(now));
            before - memory.len()
        };
        info!(memory_removed, "evicting expired cache entries");
        self.spawn_sweep(memory_removed, Sweep::Expired(now))
    }

    /// Drop every entry from memory now and from disk in the background.
    pub fn evict_all(&self) -> Eviction {
        let memory_removed = {
            let mut memory = self.lock();
            let count = memory.len();
            memory.clear();
            count
        };
        info!(memory_removed, "evicting all cache entries");
        self.spawn_sweep(memory_removed, Sweep::All)
    }

    /// Number of entries held in memory.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn spawn_sweep(&self, memory_removed: usize, mode: Sweep) -> Eviction {
        let dir = self.dir.clone();
        let disk = self.runtime.spawn_blocking(move || {
            let removed = disk::sweep(&dir, mode);
            debug!(dir = %dir.display(), removed, ?mode, "cache disk sweep finished");
            removed
        });
        Eviction::new(memory_removed, disk)
    }

    fn default_expiry(&self) -> Option<DateTime<Utc>> {
        let ttl = TimeDelta::from_std(self.default_ttl).ok()?;
        Utc::now().checked_add_signed(ttl)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.memory.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
