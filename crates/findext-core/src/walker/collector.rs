/// Collector/filter — drains the result stream into the final file list.
///
/// The stream closes only when the last traversal unit drops its sender, so
/// draining to the end doubles as waiting for the whole walk to finish.
use crate::model::{extension_of, DirEntry, FileList, TargetFile};
use crate::walker::events::{EventSink, WalkEvent};
use compact_str::CompactString;
use crossbeam_channel::Receiver;
use std::collections::HashSet;

/// Keep files whose extension is exactly `ext` (case-sensitive).
pub struct Collector<'a> {
    ext: &'a str,
    dedup_by_name: bool,
    sink: &'a dyn EventSink,
}

impl<'a> Collector<'a> {
    pub fn new(ext: &'a str, dedup_by_name: bool, sink: &'a dyn EventSink) -> Self {
        Self {
            ext,
            dedup_by_name,
            sink,
        }
    }

    /// Block until every sender is gone, returning the matching files.
    pub fn drain(&self, files: Receiver<DirEntry>) -> FileList {
        let mut ret = FileList::new();
        let mut seen: HashSet<CompactString> = HashSet::new();

        for entry in files {
            if !self.matches(&entry.name) {
                continue;
            }
            if self.dedup_by_name && !seen.insert(entry.name.clone()) {
                continue;
            }
            self.sink.record(&WalkEvent::FileMatched {
                path: entry.path.clone(),
                name: entry.name.to_string(),
            });
            ret.push(TargetFile {
                path: entry.path,
                name: entry.name,
            });
        }

        ret
    }

    #[inline]
    fn matches(&self, name: &str) -> bool {
        extension_of(name) == self.ext
    }
}
