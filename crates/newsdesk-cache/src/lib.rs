//! Two-tier content cache for fetched HTML fragments.
//!
//! Entries live in an in-memory map and in one JSON file per key under the
//! cache directory. Every entry carries an optional expiry; an expired entry
//! is never returned, though its file stays on disk until the next sweep.
//!
//! Reads and writes are synchronous. Eviction sweeps of the disk tier run on
//! the blocking pool of an injected tokio runtime and report completion
//! through [`Eviction`].

mod cache;
mod disk;
mod entry;
mod eviction;


pub use cache::ContentCache;
pub use entry::CacheEntry;
pub use eviction::{Eviction, EvictionReport};
