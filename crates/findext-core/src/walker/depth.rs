/// Depth controller — the shared, live-adjustable depth ceiling.
///
/// Every traversal unit reads the ceiling once, right before deciding
/// whether to list its directory, so an increase becomes visible to all
/// units that have not yet made that decision.
use std::sync::atomic::{AtomicI64, Ordering};

#[derive(Debug)]
pub struct DepthLimit {
    limit: AtomicI64,
}

impl DepthLimit {
    pub fn new(limit: i64) -> Self {
        Self {
            limit: AtomicI64::new(limit),
        }
    }

    /// Current ceiling.
    #[inline]
    pub fn get(&self) -> i64 {
        self.limit.load(Ordering::Acquire)
    }

    /// `true` if a unit at `depth` may list its directory.
    #[inline]
    pub fn allows(&self, depth: i64) -> bool {
        depth < self.get()
    }

    /// Atomically add `delta` and return the new ceiling.
    ///
    /// Plain wrapping arithmetic: a negative delta lowers the ceiling.
    pub fn increase(&self, delta: i64) -> i64 {
        self.limit
            .fetch_add(delta, Ordering::AcqRel)
            .wrapping_add(delta)
    }
}
