use tokio::task::JoinHandle;
use tracing::warn;

/// Counts from one completed eviction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvictionReport {
    pub memory_removed: usize,
    pub disk_removed: usize,
}

/// An eviction whose memory sweep is done and whose disk sweep may still be
/// running.
///
/// Dropping this does not cancel the disk sweep.
#[derive(Debug)]
#[must_use = "await `finished()` to wait for the disk sweep, or drop to let it run"]
pub struct Eviction {
    memory_removed: usize,
    disk: JoinHandle<usize>,
}

impl Eviction {
    pub(crate) fn new(memory_removed: usize, disk: JoinHandle<usize>) -> Self {
        Self {
            memory_removed,
            disk,
        }
    }

    /// Entries dropped from memory. Known as soon as eviction returns.
    pub fn memory_removed(&self) -> usize {
        self.memory_removed
    }

    /// Wait for the disk sweep and report both counts.
    pub async fn finished(self) -> EvictionReport {
        let disk_removed = match self.disk.await {
            Ok(count) => count,
            Err(e) => {
                warn!(error = %e, "cache disk sweep did not complete");
                0
            }
        };
        EvictionReport {
            memory_removed: self.memory_removed,
            disk_removed,
        }
    }
}
