/// In-memory virtual directory tree.
///
/// Built from a list of file paths: every ancestor directory is registered
/// automatically, so `"/folder/sub/file.md"` yields `/`, `/folder` and
/// `/folder/sub` as listable directories. Individual directories can be
/// marked as failing to exercise branch-local error handling.
use crate::model::DirEntry;
use crate::reader::DirReader;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone)]
pub struct MemoryReader {
    /// Directory path → its children in insertion order.
    children: HashMap<PathBuf, Vec<DirEntry>>,
    /// Directories whose listing returns an error of the given kind.
    failing: HashMap<PathBuf, io::ErrorKind>,
}

impl MemoryReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree containing exactly the given files (and their ancestors).
    pub fn from_files<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut reader = Self::new();
        for file in files {
            reader.add_file(file);
        }
        reader
    }

    /// Register a file and every directory above it.
    pub fn add_file(&mut self, path: impl AsRef<Path>) -> &mut Self {
        let path = path.as_ref();
        let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
            return self;
        };
        self.ensure_dir(parent);
        let name = name.to_string_lossy();
        if let Some(list) = self.children.get_mut(parent) {
            list.push(DirEntry::file(parent, &name));
        }
        self
    }

    /// Register a (possibly empty) directory and every directory above it.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.ensure_dir(path.as_ref());
        self
    }

    /// Make listing `path` fail with `kind`. The directory stays visible
    /// in its parent's listing.
    pub fn fail_dir(&mut self, path: impl AsRef<Path>, kind: io::ErrorKind) -> &mut Self {
        let path = path.as_ref();
        self.ensure_dir(path);
        self.failing.insert(path.to_path_buf(), kind);
        self
    }

    /// Number of listable directories.
    pub fn dir_count(&self) -> usize {
        self.children.len()
    }

    fn ensure_dir(&mut self, dir: &Path) {
        if self.children.contains_key(dir) {
            return;
        }
        self.children.insert(dir.to_path_buf(), Vec::new());

        if let (Some(parent), Some(name)) = (dir.parent(), dir.file_name()) {
            self.ensure_dir(parent);
            let name = name.to_string_lossy();
            if let Some(list) = self.children.get_mut(parent) {
                list.push(DirEntry::dir(parent, &name));
            }
        }
    }
}

impl DirReader for MemoryReader {
    fn list_children(&self, dir: &Path) -> io::Result<Vec<DirEntry>> {
        if let Some(&kind) = self.failing.get(dir) {
            return Err(io::Error::new(
                kind,
                format!("listing {} is disabled", dir.display()),
            ));
        }
        self.children.get(dir).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{}: no such directory", dir.display()),
            )
        })
    }
}
