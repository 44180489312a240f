/// findext core — concurrent, depth-bounded extension search.
///
/// This crate contains the traversal engine with zero CLI or terminal
/// dependencies. Process bootstrap, logging setup and OS signal wiring live
/// in the `findext` binary, which drives the engine through [`walker::Walker`].
///
/// # Modules
///
/// - [`model`] — Directory entries and matched-file results.
/// - [`reader`] — The pluggable "list the children of a directory" capability.
/// - [`walker`] — Concurrent walker, depth controller, status relay, collector.
/// - [`config`] — Tunable walk parameters.
/// - [`error`] — Error type returned by `find_files`.
pub mod config;
pub mod error;
pub mod model;
pub mod reader;
pub mod walker;

pub use config::WalkConfig;
pub use error::{FindError, Result};
pub use model::{DirEntry, FileList, TargetFile};
pub use reader::{DirReader, FsReader, MemoryReader};
pub use walker::{CancelToken, ChannelSink, EventSink, TracingSink, WalkEvent, Walker};
