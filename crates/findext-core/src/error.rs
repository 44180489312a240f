/// Error type for the findext engine.
///
/// Only failures that make the whole call meaningless surface here. A
/// subdirectory that cannot be read is reported through the event sink and
/// merely truncates that branch of the walk.
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, FindError>;

#[derive(Debug, Error)]
pub enum FindError {
    /// The scan root could not be listed, so no traversal unit was started.
    #[error("cannot read scan root {}: {source}", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The thread for the root traversal unit could not be started.
    #[error("failed to start walker thread: {0}")]
    Spawn(#[source] std::io::Error),

    /// A `WalkConfig` value is out of range.
    #[error("invalid walk configuration: {0}")]
    InvalidConfig(String),
}
