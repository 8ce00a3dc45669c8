use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One cached piece of content, as stored in memory and on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub key: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// `None` means the entry never expires.
    pub expires_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    pub fn new(
        key: impl Into<String>,
        content: impl Into<String>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            key: key.into(),
            content: content.into(),
            created_at: Utc::now(),
            expires_at,
        }
    }

    /// Valid iff there is no expiry or it lies after `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map_or(true, |expiry| expiry > now)
    }
}
