/// Walk events — structured notifications sent from traversal units to an
/// observability sink.
///
/// The walker never logs directly; it hands every noteworthy moment to an
/// [`EventSink`]. The default [`TracingSink`] turns events into `tracing`
/// records, while [`ChannelSink`] forwards them over a crossbeam channel so
/// a frontend (or a test) can inspect them.
use crossbeam_channel::{bounded, Receiver, Sender};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info};

/// Maximum number of events that may queue up in a [`ChannelSink`].
///
/// Traversal units never block on the sink: once the channel is full,
/// further events are dropped until the consumer catches up.
pub const EVENT_CHANNEL_CAPACITY: usize = 4_096;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkEvent {
    /// `find_files` accepted a root and is about to start the walk.
    ScanStarted { dir: PathBuf },
    /// A unit reached the depth ceiling and did not list its directory.
    DepthExceeded { dir: PathBuf, depth: i64 },
    /// Listing a directory failed. Only that branch is lost.
    ReadFailed { dir: PathBuf, error: String },
    /// A traversal unit was started for a subdirectory. `inline` units run
    /// on the discovering thread (unit bound reached or no thread available).
    UnitSpawned {
        dir: PathBuf,
        depth: i64,
        inline: bool,
    },
    /// The collector kept a file.
    FileMatched { path: PathBuf, name: String },
    /// Answer to a status request.
    StatusSnapshot {
        dir: PathBuf,
        depth: i64,
        limit: i64,
        active_units: usize,
    },
    /// The depth ceiling changed.
    DepthIncreased { limit: i64 },
    /// A unit saw the cancellation token and stopped.
    CancellationObserved { dir: PathBuf, depth: i64 },
    /// Every unit finished and the collector returned.
    RunComplete {
        matched: usize,
        cancelled: bool,
        duration: Duration,
    },
}

/// Receiver of walk events. Called concurrently from every traversal unit,
/// so implementations must be cheap and must not block.
pub trait EventSink: Send + Sync {
    fn record(&self, event: &WalkEvent);
}

/// Writes each event as a `tracing` record.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: &WalkEvent) {
        match event {
            WalkEvent::ScanStarted { dir } => {
                info!(dir = %dir.display(), "Starting scan");
            }
            WalkEvent::DepthExceeded { dir, depth } => {
                debug!(dir = %dir.display(), depth, "Depth limit reached, not descending");
            }
            WalkEvent::ReadFailed { dir, error } => {
                error!(dir = %dir.display(), %error, "Failed to read directory");
            }
            WalkEvent::UnitSpawned { dir, depth, inline } => {
                debug!(dir = %dir.display(), depth, inline, "Walking subdirectory");
            }
            WalkEvent::FileMatched { path, name } => {
                debug!(path = %path.display(), filename = %name, "Extension matched");
            }
            WalkEvent::StatusSnapshot {
                dir,
                depth,
                limit,
                active_units,
            } => {
                info!(
                    dir = %dir.display(),
                    depth,
                    max_depth = limit,
                    active_units,
                    "Status requested"
                );
            }
            WalkEvent::DepthIncreased { limit } => {
                info!(current_depth = limit, "Depth limit increased");
            }
            WalkEvent::CancellationObserved { dir, depth } => {
                info!(dir = %dir.display(), depth, "Walk cancelled");
            }
            WalkEvent::RunComplete {
                matched,
                cancelled,
                duration,
            } => {
                info!(matched, cancelled, ?duration, "Scan complete");
            }
        }
    }
}

/// Forwards events into a bounded crossbeam channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: Sender<WalkEvent>,
}

impl ChannelSink {
    /// Create a sink and the receiver that drains it.
    pub fn new() -> (Self, Receiver<WalkEvent>) {
        Self::with_capacity(EVENT_CHANNEL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> (Self, Receiver<WalkEvent>) {
        let (tx, rx) = bounded(capacity);
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelSink {
    fn record(&self, event: &WalkEvent) {
        let _ = self.tx.try_send(event.clone());
    }
}

const _: () = assert!(EVENT_CHANNEL_CAPACITY > 0);
