/// Real-filesystem reader built on `std::fs::read_dir`.
///
/// Symlinks are reported as files and never followed, so a walk cannot
/// loop through a symlink cycle. A child whose metadata cannot be read is
/// logged and skipped; only failure to open the directory itself is an error.
use crate::model::DirEntry;
use crate::reader::DirReader;
use compact_str::CompactString;
use std::io;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Default, Clone, Copy)]
pub struct FsReader;

impl FsReader {
    pub fn new() -> Self {
        Self
    }
}

impl DirReader for FsReader {
    fn list_children(&self, dir: &Path) -> io::Result<Vec<DirEntry>> {
        let read_dir = std::fs::read_dir(dir)?;
        let mut entries = Vec::with_capacity(read_dir.size_hint().0);

        for entry_result in read_dir {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    warn!("Skipping unreadable entry in {}: {err}", dir.display());
                    continue;
                }
            };

            // `file_type` does not traverse symlinks.
            let is_dir = match entry.file_type() {
                Ok(ft) => ft.is_dir(),
                Err(err) => {
                    warn!("Skipping {}: {err}", entry.path().display());
                    continue;
                }
            };

            let name = entry.file_name();
            entries.push(DirEntry {
                name: CompactString::new(name.to_string_lossy()),
                path: entry.path(),
                is_dir,
            });
        }

        Ok(entries)
    }
}
