/// Directory reader capability — the only I/O the walker performs.
///
/// The walker never touches storage directly. Each traversal unit asks a
/// [`DirReader`] for the immediate children of one directory, so any backend
/// can be plugged in:
/// - [`FsReader`] — the real filesystem via `std::fs::read_dir`.
/// - [`MemoryReader`] — a virtual tree for tests and dry runs.
/// - any `Fn(&Path) -> io::Result<Vec<DirEntry>>` closure.
///
/// Readers are shared by every unit of a walk without locking, so they
/// must be `Send + Sync` and perform independent I/O per call.
pub mod fs;
pub mod memory;

pub use fs::FsReader;
pub use memory::MemoryReader;

use crate::model::DirEntry;
use std::io;
use std::path::Path;

/// List the immediate children of a directory, each tagged as file or
/// subdirectory.
pub trait DirReader: Send + Sync {
    fn list_children(&self, dir: &Path) -> io::Result<Vec<DirEntry>>;
}

impl<F> DirReader for F
where
    F: Fn(&Path) -> io::Result<Vec<DirEntry>> + Send + Sync,
{
    fn list_children(&self, dir: &Path) -> io::Result<Vec<DirEntry>> {
        self(dir)
    }
}
