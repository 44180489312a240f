/// Data model for the findext walker.
///
/// Re-exports the directory entry produced by readers and the matched-file
/// record returned to callers.
pub mod entry;
pub mod target_file;

pub use entry::DirEntry;
pub use target_file::{extension_of, FileList, TargetFile};
