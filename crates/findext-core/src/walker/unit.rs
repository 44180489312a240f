/// Traversal unit — expands one directory at one depth.
///
/// Lifecycle: `CREATED -> READING_ENTRIES -> DONE`. A unit is done when its
/// entry loop ends (exhausted, cancelled or read error). Completion is
/// signalled by dropping the unit, which releases its result sender and,
/// for threaded units, its [`UnitSlot`]. Both happen exactly once on every
/// return path, including a panic inside the reader.
use crate::model::DirEntry;
use crate::walker::events::WalkEvent;
use crate::walker::{CancelToken, Shared};
use crossbeam_channel::Sender;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread;
use tracing::warn;

const UNIT_THREAD_NAME: &str = "findext-unit";

#[derive(Clone)]
pub(crate) struct Unit {
    shared: Arc<Shared>,
    results: Sender<DirEntry>,
    cancel: CancelToken,
    dir: PathBuf,
    depth: i64,
}

impl Unit {
    pub(crate) fn new(
        shared: Arc<Shared>,
        results: Sender<DirEntry>,
        cancel: CancelToken,
        dir: PathBuf,
        depth: i64,
    ) -> Self {
        Self {
            shared,
            results,
            cancel,
            dir,
            depth,
        }
    }

    /// Start the root unit on its own thread with an already-read listing.
    ///
    /// The root always gets a thread (even past `max_units`): the caller is
    /// about to block draining the result stream, so it cannot walk inline.
    pub(crate) fn launch_root(self, entries: Vec<DirEntry>) -> io::Result<()> {
        let slot = UnitSlot::force(&self.shared);
        thread::Builder::new()
            .name(UNIT_THREAD_NAME.into())
            .spawn(move || {
                self.dispatch(entries);
                // Slot before sender: `active_units` is zero once the stream closes.
                drop(slot);
                drop(self);
            })
            .map(|_| ())
    }

    /// Start this unit on its own thread, or walk it inline on the current
    /// thread when the unit bound is reached or the OS refuses a new thread.
    fn launch(self) {
        let Some(slot) = UnitSlot::acquire(&self.shared) else {
            self.record_started(true);
            self.run();
            return;
        };

        let fallback = self.clone();
        let spawned = thread::Builder::new()
            .name(UNIT_THREAD_NAME.into())
            .spawn(move || {
                self.record_started(false);
                let results = self.results.clone();
                self.run();
                drop(slot);
                drop(results);
            });

        if let Err(err) = spawned {
            warn!(
                "Failed to spawn unit thread for {}: {err}; walking inline",
                fallback.dir.display()
            );
            fallback.record_started(true);
            fallback.run();
        }
    }

    fn run(self) {
        if self.cancel.is_cancelled() {
            self.observe_cancel();
            return;
        }

        if !self.shared.depth.allows(self.depth) {
            self.shared.sink.record(&WalkEvent::DepthExceeded {
                dir: self.dir.clone(),
                depth: self.depth,
            });
            return;
        }

        let entries = match self.shared.reader.list_children(&self.dir) {
            Ok(entries) => entries,
            Err(err) => {
                self.shared.sink.record(&WalkEvent::ReadFailed {
                    dir: self.dir.clone(),
                    error: err.to_string(),
                });
                return;
            }
        };

        self.dispatch(entries);
    }

    /// Forward files and launch child units, checking cancellation and the
    /// status relay before every entry.
    fn dispatch(&self, entries: Vec<DirEntry>) {
        let mut entries = entries.into_iter().peekable();

        while entries.peek().is_some() {
            if self.cancel.is_cancelled() {
                self.observe_cancel();
                return;
            }

            // A status cycle does not consume the entry; it is handled on
            // the next pass after another cancellation check.
            if self.shared.status.take() {
                self.report_status();
                continue;
            }

            let Some(entry) = entries.next() else { break };

            if entry.is_dir {
                self.child(entry.path).launch();
            } else if self.results.send(entry).is_err() {
                // Collector is gone; nobody is left to read further results.
                return;
            }
        }
    }

    fn child(&self, dir: PathBuf) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            results: self.results.clone(),
            cancel: self.cancel.clone(),
            dir,
            depth: self.depth + 1,
        }
    }

    fn record_started(&self, inline: bool) {
        self.shared.sink.record(&WalkEvent::UnitSpawned {
            dir: self.dir.clone(),
            depth: self.depth,
            inline,
        });
    }

    fn observe_cancel(&self) {
        self.shared.sink.record(&WalkEvent::CancellationObserved {
            dir: self.dir.clone(),
            depth: self.depth,
        });
    }

    fn report_status(&self) {
        self.shared.sink.record(&WalkEvent::StatusSnapshot {
            dir: self.dir.clone(),
            depth: self.depth,
            limit: self.shared.depth.get(),
            active_units: self.shared.active_units.load(Ordering::Acquire),
        });
    }
}

/// A reservation in the live-unit counter, released on drop.
struct UnitSlot {
    shared: Arc<Shared>,
}

impl UnitSlot {
    /// Reserve a slot, honouring `max_units`. `None` when the bound is reached.
    fn acquire(shared: &Arc<Shared>) -> Option<Self> {
        let active = &shared.active_units;
        match shared.config.max_units {
            None => {
                active.fetch_add(1, Ordering::AcqRel);
            }
            Some(max) => {
                active
                    .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                        (n < max).then_some(n + 1)
                    })
                    .ok()?;
            }
        }
        Some(Self {
            shared: Arc::clone(shared),
        })
    }

    /// Reserve a slot regardless of `max_units`.
    fn force(shared: &Arc<Shared>) -> Self {
        shared.active_units.fetch_add(1, Ordering::AcqRel);
        Self {
            shared: Arc::clone(shared),
        }
    }
}

impl Drop for UnitSlot {
    fn drop(&mut self) {
        self.shared.active_units.fetch_sub(1, Ordering::AcqRel);
    }
}
