/// A single child of a directory, as reported by a [`DirReader`].
///
/// Entries are produced fresh on every listing and never mutated afterwards.
/// The walker only needs three facts about a child: what it is called,
/// where it lives, and whether it should be descended into.
///
/// [`DirReader`]: crate::reader::DirReader
use compact_str::CompactString;
use std::path::{Path, PathBuf};

/// One listed child: a file or a subdirectory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// File or directory name only (NOT the full path).
    pub name: CompactString,

    /// Full path of the entry: the listed directory joined with `name`.
    pub path: PathBuf,

    /// `true` if the walker should spawn a traversal unit for this entry.
    pub is_dir: bool,
}

impl DirEntry {
    /// Create an entry for a regular file inside `parent`.
    pub fn file(parent: &Path, name: &str) -> Self {
        Self {
            name: CompactString::new(name),
            path: parent.join(name),
            is_dir: false,
        }
    }

    /// Create an entry for a subdirectory inside `parent`.
    pub fn dir(parent: &Path, name: &str) -> Self {
        Self {
            name: CompactString::new(name),
            path: parent.join(name),
            is_dir: true,
        }
    }
}
