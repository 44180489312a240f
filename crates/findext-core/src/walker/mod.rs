/// Walker module — orchestrates the concurrent extension search.
///
/// A walk is a tree of **traversal units**, one per directory. Each unit
/// lists its directory through the [`DirReader`], forwards files into a
/// bounded crossbeam result stream and starts a new unit (on its own thread)
/// for every subdirectory. Every unit holds a clone of the stream's sender,
/// so the stream closes exactly when the last unit finishes; the
/// [`Collector`] on the calling thread drains it until then.
///
/// While a walk runs, three controls may be used from any thread:
/// - [`Walker::increase_depth`] — raise the shared depth ceiling.
/// - [`Walker::request_status`] — ask one unit for a status snapshot.
/// - [`CancelToken::cancel`] — stop the walk (or let its deadline pass).
pub mod cancel;
pub mod collector;
pub mod depth;
pub mod events;
pub mod status;
mod unit;

pub use cancel::CancelToken;
pub use collector::Collector;
pub use depth::DepthLimit;
pub use events::{ChannelSink, EventSink, TracingSink, WalkEvent};
pub use status::StatusRelay;

use crate::config::WalkConfig;
use crate::error::{FindError, Result};
use crate::model::{DirEntry, FileList};
use crate::reader::DirReader;
use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use unit::Unit;

/// State shared by the walker handle and every traversal unit.
pub(crate) struct Shared {
    pub(crate) reader: Box<dyn DirReader>,
    pub(crate) depth: DepthLimit,
    pub(crate) status: StatusRelay,
    pub(crate) sink: Arc<dyn EventSink>,
    pub(crate) config: WalkConfig,
    /// Traversal units currently running on their own thread.
    pub(crate) active_units: AtomicUsize,
}

/// Handle to a concurrent, depth-bounded file finder.
///
/// Cloning is cheap; clones share the depth ceiling, the status relay and
/// the event sink, so a control thread can hold one while another thread
/// is blocked in [`find_files`](Self::find_files).
#[derive(Clone)]
pub struct Walker {
    shared: Arc<Shared>,
}

impl fmt::Debug for Walker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Walker")
            .field("depth_limit", &self.depth_limit())
            .field("active_units", &self.active_units())
            .field("config", &self.shared.config)
            .finish_non_exhaustive()
    }
}

impl Walker {
    /// Create a walker that reports events through [`TracingSink`].
    pub fn new(reader: impl DirReader + 'static, config: WalkConfig) -> Result<Self> {
        Self::with_sink(reader, config, Arc::new(TracingSink))
    }

    /// Create a walker that reports events to `sink`.
    pub fn with_sink(
        reader: impl DirReader + 'static,
        config: WalkConfig,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            shared: Arc::new(Shared {
                reader: Box::new(reader),
                depth: DepthLimit::new(config.max_depth),
                status: StatusRelay::new(),
                sink,
                config,
                active_units: AtomicUsize::new(0),
            }),
        })
    }

    /// Walk `root` and return every file whose extension is exactly `ext`
    /// (leading dot included, case-sensitive).
    ///
    /// Blocks until every traversal unit has finished. Directories at or
    /// beyond the depth ceiling are skipped, unreadable subdirectories are
    /// reported to the sink and skipped, and cancellation yields whatever
    /// was found so far. The only error is failing to list `root` itself
    /// (or to start the first unit).
    pub fn find_files(&self, root: &Path, ext: &str, cancel: &CancelToken) -> Result<FileList> {
        let start = Instant::now();
        let shared = &self.shared;
        shared.sink.record(&WalkEvent::ScanStarted {
            dir: root.to_path_buf(),
        });

        let (tx, rx) = crossbeam_channel::bounded::<DirEntry>(shared.config.result_capacity);

        if shared.depth.allows(0) {
            let entries = shared.reader.list_children(root).map_err(|source| {
                FindError::RootUnreadable {
                    path: root.to_path_buf(),
                    source,
                }
            })?;

            Unit::new(Arc::clone(shared), tx, cancel.clone(), root.to_path_buf(), 0)
                .launch_root(entries)
                .map_err(FindError::Spawn)?;
        } else {
            shared.sink.record(&WalkEvent::DepthExceeded {
                dir: root.to_path_buf(),
                depth: 0,
            });
            drop(tx);
        }

        let files =
            Collector::new(ext, shared.config.dedup_by_name, shared.sink.as_ref()).drain(rx);

        shared.sink.record(&WalkEvent::RunComplete {
            matched: files.len(),
            cancelled: cancel.is_cancelled(),
            duration: start.elapsed(),
        });
        Ok(files)
    }

    /// Add `delta` to the depth ceiling and return the new ceiling.
    ///
    /// Takes effect for every unit that has not yet checked its depth.
    pub fn increase_depth(&self, delta: i64) -> i64 {
        let limit = self.shared.depth.increase(delta);
        self.shared
            .sink
            .record(&WalkEvent::DepthIncreased { limit });
        limit
    }

    /// Ask the next traversal unit to report where it is.
    ///
    /// Returns `false` if a request was already pending; at most one request
    /// is outstanding at a time.
    ///
    /// The request belongs to the walker, not to one walk: a request made
    /// while no walk is running stays pending and is answered by the first
    /// unit of the next [`find_files`](Self::find_files).
    pub fn request_status(&self) -> bool {
        self.shared.status.request()
    }

    pub fn depth_limit(&self) -> i64 {
        self.shared.depth.get()
    }

    pub fn active_units(&self) -> usize {
        self.shared.active_units.load(Ordering::Acquire)
    }

    pub fn config(&self) -> &WalkConfig {
        &self.shared.config
    }
}
