/// Matched-file records and extension extraction.
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A file whose extension matched the query.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TargetFile {
    /// Full path of the matched file.
    pub path: PathBuf,
    /// File name only.
    pub name: CompactString,
}

/// Result of one `find_files` call. Order is whatever the concurrent
/// traversal produced; sort before comparing.
pub type FileList = Vec<TargetFile>;

impl TargetFile {
    pub fn new(path: impl Into<PathBuf>, name: &str) -> Self {
        Self {
            path: path.into(),
            name: CompactString::new(name),
        }
    }

    /// The directory that contains this file.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// Extension of a file name: everything from the last `.` onward,
/// including the dot. Names without a dot have an empty extension.
///
/// `a.tar.gz` → `.gz`, `Makefile` → ``, `.bashrc` → `.bashrc`.
pub fn extension_of(name: &str) -> &str {
    match name.rfind('.') {
        Some(pos) => &name[pos..],
        None => "",
    }
}
