//! On-disk tier: one `<sha256 of key>.json` file per entry.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use newsdesk_common::CacheError;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::entry::CacheEntry;

const EXTENSION: &str = "json";

/// File holding `key`. The name is a fixed-length hex digest, so any key
/// maps to a plain, case-insensitive-safe file name inside `dir`. The key
/// itself lives in the file.
pub(crate) fn entry_path(dir: &Path, key: &str) -> PathBuf {
    let digest = Sha256::digest(key.as_bytes());
    let name: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    dir.join(format!("{name}.{EXTENSION}"))
}

/// Write an entry atomically (write to `.tmp`, then rename).
pub(crate) fn write_entry(path: &Path, entry: &CacheEntry) -> Result<(), CacheError> {
    let json = serde_json::to_string(entry)?;
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, &json)?;

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        // Rename failed; try a direct write (Windows compat)
        warn!(path = %path.display(), error = %e, "atomic rename failed, falling back to direct write");
        std::fs::write(path, &json)?;
        let _ = std::fs::remove_file(&tmp_path);
    }
    Ok(())
}

/// Read an entry. A missing file is `Ok(None)`; an undecodable one is
/// `CacheError::Serialization`.
pub(crate) fn read_entry(path: &Path) -> Result<Option<CacheEntry>, CacheError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_str(&raw)?))
}

/// Delete a file, treating "already gone" as success.
pub(crate) fn remove_file(path: &Path) -> bool {
    match std::fs::remove_file(path) {
        Ok(()) => true,
        Err(e) if e.kind() == ErrorKind::NotFound => false,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to remove cache file");
            false
        }
    }
}

/// Which files a sweep deletes.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Sweep {
    /// Expired or undecodable entries.
    Expired(DateTime<Utc>),
    All,
}

/// Delete entry files in `dir` selected by `mode`. Returns how many entry
/// files were removed. Runs on a blocking thread.
pub(crate) fn sweep(dir: &Path, mode: Sweep) -> usize {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return 0,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "cache sweep could not list directory");
            return 0;
        }
    };

    let mut removed = 0;
    for path in entries.filter_map(Result::ok).map(|entry| entry.path()) {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if name.ends_with(".json.tmp") {
            // Leftover from an interrupted write
            remove_file(&path);
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
            continue;
        }

        let doomed = match mode {
            Sweep::All => true,
            Sweep::Expired(now) => match read_entry(&path) {
                Ok(Some(entry)) => !entry.is_valid_at(now),
                Ok(None) => false,
                Err(CacheError::Serialization(e)) => {
                    warn!(path = %path.display(), error = %e, "removing corrupt cache file");
                    true
                }
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "skipping unreadable cache file");
                    false
                }
            },
        };
        if doomed && remove_file(&path) {
            removed += 1;
        }
    }
    removed
}
