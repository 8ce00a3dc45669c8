//! Bounded recycling store for idle renderers.
//!
//! Renderer creation is expensive, so released renderers wait in an idle
//! queue until the next `acquire`. The queue never holds more than
//! `max_size` entries; when full, the entry with the oldest last-used
//! timestamp is torn down to make room.
//!
//! All state lives behind one mutex, so acquire/release/clear calls from
//! different threads are linearized. Teardown of evicted renderers runs
//! after the lock is released.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use newsdesk_common::RendererId;
use tracing::{debug, warn};

use crate::renderer::{teardown, Renderer};

/// Called with the id of every renderer the pool tears down.
pub type EvictHook = Box<dyn Fn(RendererId) + Send + Sync>;

struct Idle<R> {
    renderer: R,
    last_used: Instant,
}

pub struct RendererPool<R> {
    max_size: usize,
    idle: Mutex<VecDeque<Idle<R>>>,
    on_evict: Option<EvictHook>,
}

impl<R: Renderer> RendererPool<R> {
    pub fn new(max_size: usize) -> Self {
        Self {
            max_size,
            idle: Mutex::new(VecDeque::with_capacity(max_size)),
            on_evict: None,
        }
    }

    /// Install a hook run after each teardown (e.g. to drop bridge handlers).
    pub fn with_evict_hook(mut self, hook: impl Fn(RendererId) + Send + Sync + 'static) -> Self {
        self.on_evict = Some(Box::new(hook));
        self
    }

    /// Take the renderer at the front of the idle queue.
    ///
    /// `None` means the pool is empty and the caller must build a new one.
    /// An acquired renderer is in use, so its idle stamp leaves with the
    /// entry; `release` stamps it again when that use ends.
    pub fn acquire(&self) -> Option<R> {
        let entry = self.lock().pop_front()?;
        debug!(
            renderer = %entry.renderer.id(),
            idle_for_ms = entry.last_used.elapsed().as_millis() as u64,
            "renderer acquired from pool"
        );
        Some(entry.renderer)
    }

    /// Return a renderer to the idle queue.
    ///
    /// A renderer whose id is already queued is ignored. At capacity the
    /// oldest idle renderer is evicted first. With no room at all (a zero
    /// capacity pool) the released renderer itself is torn down.
    pub fn release(&self, renderer: R) {
        let id = renderer.id();
        let mut idle = self.lock();

        if idle.iter().any(|entry| entry.renderer.id() == id) {
            debug!(renderer = %id, "renderer already pooled, ignoring release");
            return;
        }

        let mut evicted = None;
        if idle.len() >= self.max_size {
            match oldest_index(&idle) {
                Some(index) => evicted = idle.remove(index),
                None => {
                    drop(idle);
                    warn!(
                        renderer = %id,
                        max_size = self.max_size,
                        "pool has no capacity, tearing down released renderer"
                    );
                    self.teardown(renderer);
                    return;
                }
            }
        }

        idle.push_back(Idle {
            renderer,
            last_used: Instant::now(),
        });
        let len = idle.len();
        drop(idle);

        debug!(renderer = %id, idle = len, "renderer released to pool");
        if let Some(entry) = evicted {
            debug!(renderer = %entry.renderer.id(), "evicting least recently used renderer");
            self.teardown(entry.renderer);
        }
    }

    /// Tear down idle renderers unused for longer than `older_than`.
    ///
    /// Returns the number removed. Intended for memory-pressure handling.
    pub fn clear_unused(&self, older_than: Duration) -> usize {
        let now = Instant::now();
        let stale: Vec<R> = {
            let mut idle = self.lock();
            let (stale, fresh): (VecDeque<_>, VecDeque<_>) = idle
                .drain(..)
                .partition(|entry| now.saturating_duration_since(entry.last_used) > older_than);
            *idle = fresh;
            stale.into_iter().map(|entry| entry.renderer).collect()
        };

        let count = stale.len();
        for renderer in stale {
            self.teardown(renderer);
        }
        if count > 0 {
            debug!(count, "cleared unused renderers");
        }
        count
    }

    /// Tear down every idle renderer.
    pub fn clear_all(&self) -> usize {
        let all: Vec<R> = self.lock().drain(..).map(|entry| entry.renderer).collect();
        let count = all.len();
        for renderer in all {
            self.teardown(renderer);
        }
        debug!(count, "cleared all pooled renderers");
        count
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Whether a renderer with this id is currently idle in the pool.
    pub fn contains(&self, id: RendererId) -> bool {
        self.lock().iter().any(|entry| entry.renderer.id() == id)
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Idle<R>>> {
        self.idle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn teardown(&self, mut renderer: R) {
        let id = renderer.id();
        teardown(&mut renderer);
        drop(renderer);
        if let Some(hook) = &self.on_evict {
            hook(id);
        }
    }
}

/// Index of the entry with the smallest last-used time. Ties go to the
/// entry nearest the front, which was released first.
fn oldest_index<R>(idle: &VecDeque<Idle<R>>) -> Option<usize> {
    idle.iter()
        .enumerate()
        .min_by_key(|(_, entry)| entry.last_used)
        .map(|(index, _)| index)
}
