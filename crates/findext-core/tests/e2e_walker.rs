/// End-to-end walker tests against an in-memory directory tree.
///
/// `MemoryReader` makes every tree reproducible, and wrapping it in a closure
/// gives a reader that parks on one directory until the test releases it.
/// That gate is how the races around depth increases and cancellation are
/// pinned down deterministically: the test acts while a unit is known to be
/// blocked, then lets it continue.
use crossbeam_channel::{bounded, Receiver, Sender};
use findext_core::{
    CancelToken, ChannelSink, DirEntry, DirReader, FileList, FindError, MemoryReader, TargetFile,
    WalkConfig, WalkEvent, Walker,
};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

// ── Helpers ──────────────────────────────────────────────────────────────────

/// The tree from the documented example:
///
/// ```text
/// /root/
///   a.go
///   sub/
///     b.go
///     deep/
///       c.go
/// ```
const EXAMPLE_TREE: [&str; 3] = ["/root/a.go", "/root/sub/b.go", "/root/sub/deep/c.go"];

fn walker_with_events(
    reader: impl DirReader + 'static,
    config: WalkConfig,
) -> (Walker, Receiver<WalkEvent>) {
    let (sink, events) = ChannelSink::new();
    let walker = Walker::with_sink(reader, config, Arc::new(sink)).expect("valid config");
    (walker, events)
}

fn depth(max_depth: i64) -> WalkConfig {
    WalkConfig::default().with_max_depth(max_depth)
}

fn sorted(mut files: FileList) -> FileList {
    files.sort();
    files
}

fn target(path: &str) -> TargetFile {
    let name = Path::new(path).file_name().unwrap().to_str().unwrap();
    TargetFile::new(path, name)
}

fn find(walker: &Walker, root: &str, ext: &str) -> FileList {
    sorted(
        walker
            .find_files(Path::new(root), ext, &CancelToken::new())
            .expect("walk should succeed"),
    )
}

/// Wrap `reader` so that listing `gate_dir` first signals `entered`, then
/// blocks until something arrives on `release`.
fn gated(
    reader: MemoryReader,
    gate_dir: &str,
) -> (
    impl Fn(&Path) -> io::Result<Vec<DirEntry>> + Send + Sync + 'static,
    Receiver<()>,
    Sender<()>,
) {
    let gate_dir = PathBuf::from(gate_dir);
    let (entered_tx, entered_rx) = bounded::<()>(1);
    let (release_tx, release_rx) = bounded::<()>(1);

    let read = move |dir: &Path| {
        if dir == gate_dir.as_path() {
            let _ = entered_tx.send(());
            let _ = release_rx.recv_timeout(Duration::from_secs(30));
        }
        reader.list_children(dir)
    };
    (read, entered_rx, release_tx)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn finds_files_in_single_directory() {
    let reader =
        MemoryReader::from_files(["/folder/file1.md", "/folder/file2.md", "/folder/file3.md"]);
    let (walker, _) = walker_with_events(reader, depth(100));

    assert_eq!(
        find(&walker, "/folder", ".md"),
        vec![
            target("/folder/file1.md"),
            target("/folder/file2.md"),
            target("/folder/file3.md"),
        ]
    );
}

#[test]
fn finds_files_across_subfolders_and_filters_extension() {
    let reader = MemoryReader::from_files([
        "/folder/sub1/file1.md",
        "/folder/sub2/file2.md",
        "/folder/file3.md",
        "/folder/file4.go",
    ]);
    let (walker, _) = walker_with_events(reader, depth(100));

    assert_eq!(
        find(&walker, "/folder", ".md"),
        vec![
            target("/folder/file3.md"),
            target("/folder/sub1/file1.md"),
            target("/folder/sub2/file2.md"),
        ]
    );
}

#[test]
fn no_matching_extension_yields_empty_result() {
    let reader =
        MemoryReader::from_files(["/folder/file1.md", "/folder/file2.md", "/folder/file3.md"]);
    let (walker, _) = walker_with_events(reader, depth(100));

    assert!(find(&walker, "/folder", ".go").is_empty());
}

/// `/root/sub/deep` sits at depth 2, which is not below a ceiling of 2.
#[test]
fn subtree_at_depth_limit_is_excluded() {
    let (walker, events) = walker_with_events(MemoryReader::from_files(EXAMPLE_TREE), depth(2));

    assert_eq!(
        find(&walker, "/root", ".go"),
        vec![target("/root/a.go"), target("/root/sub/b.go")]
    );
    assert!(events.try_iter().any(|e| e
        == WalkEvent::DepthExceeded {
            dir: PathBuf::from("/root/sub/deep"),
            depth: 2,
        }));
}

#[test]
fn all_files_found_when_tree_within_limit() {
    let (walker, _) = walker_with_events(MemoryReader::from_files(EXAMPLE_TREE), depth(3));

    assert_eq!(
        find(&walker, "/root", ".go"),
        vec![
            target("/root/a.go"),
            target("/root/sub/b.go"),
            target("/root/sub/deep/c.go"),
        ]
    );
}

#[test]
fn zero_depth_limit_reads_nothing() {
    let (walker, _) = walker_with_events(MemoryReader::from_files(EXAMPLE_TREE), depth(0));
    assert!(find(&walker, "/root", ".go").is_empty());
}

#[test]
fn empty_tree_is_empty_result_not_error() {
    let mut reader = MemoryReader::new();
    reader.add_dir("/empty");
    let (walker, events) = walker_with_events(reader, depth(5));

    assert!(find(&walker, "/empty", ".go").is_empty());
    assert!(events
        .try_iter()
        .any(|e| matches!(e, WalkEvent::RunComplete { matched: 0, .. })));
}

#[test]
fn missing_root_is_an_error() {
    let (walker, _) = walker_with_events(MemoryReader::from_files(EXAMPLE_TREE), depth(5));

    let err = walker
        .find_files(Path::new("/does/not/exist"), ".go", &CancelToken::new())
        .unwrap_err();
    match err {
        FindError::RootUnreadable { path, source } => {
            assert_eq!(path, PathBuf::from("/does/not/exist"));
            assert_eq!(source.kind(), io::ErrorKind::NotFound);
        }
        other => panic!("expected RootUnreadable, got {other:?}"),
    }
}

/// An unreadable subdirectory costs only its own subtree.
#[test]
fn subdirectory_read_failure_is_branch_local() {
    let mut reader = MemoryReader::from_files([
        "/root/a.go",
        "/root/locked/hidden.go",
        "/root/open/b.go",
    ]);
    reader.fail_dir("/root/locked", io::ErrorKind::PermissionDenied);
    let (walker, events) = walker_with_events(reader, depth(5));

    assert_eq!(
        find(&walker, "/root", ".go"),
        vec![target("/root/a.go"), target("/root/open/b.go")]
    );
    assert!(events.try_iter().any(|e| matches!(
        e,
        WalkEvent::ReadFailed { ref dir, .. } if dir == Path::new("/root/locked")
    )));
}

#[test]
fn same_name_in_different_directories_is_kept() {
    let reader = MemoryReader::from_files(["/root/x/mod.rs", "/root/y/mod.rs"]);
    let (walker, _) = walker_with_events(reader, depth(5));

    assert_eq!(find(&walker, "/root", ".rs").len(), 2);
}

#[test]
fn dedup_by_name_collapses_same_name() {
    let reader = MemoryReader::from_files(["/root/x/mod.rs", "/root/y/mod.rs", "/root/lib.rs"]);
    let config = WalkConfig {
        dedup_by_name: true,
        ..WalkConfig::default()
    };
    let (walker, _) = walker_with_events(reader, config);

    let got = find(&walker, "/root", ".rs");
    let mut names: Vec<&str> = got.iter().map(|t| t.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["lib.rs", "mod.rs"]);
}

/// A wide tree pushed through a one-slot result stream must still complete:
/// units block on the full stream and resume as the collector drains.
#[test]
fn wide_tree_completes_under_backpressure() {
    let mut files = Vec::new();
    for d in 0..40 {
        for f in 0..25 {
            files.push(format!("/wide/dir{d:02}/file{f:02}.txt"));
        }
    }
    let config = WalkConfig {
        result_capacity: 1,
        ..WalkConfig::default()
    };
    let (walker, _) = walker_with_events(MemoryReader::from_files(&files), config);

    assert_eq!(find(&walker, "/wide", ".txt").len(), 1_000);
    assert_eq!(walker.active_units(), 0);
}

/// With a unit bound, directories past the bound are walked inline and the
/// result is unchanged.
#[test]
fn bounded_units_find_everything() {
    let mut files = Vec::new();
    for a in 0..6 {
        for b in 0..6 {
            files.push(format!("/tree/a{a}/b{b}/leaf.go"));
        }
        files.push(format!("/tree/a{a}/mid.go"));
    }
    let config = WalkConfig {
        max_units: Some(2),
        ..WalkConfig::default()
    };
    let (walker, _) = walker_with_events(MemoryReader::from_files(&files), config);

    assert_eq!(find(&walker, "/tree", ".go").len(), 42);
    assert_eq!(walker.active_units(), 0);
}

/// Threaded units never exceed the bound, so neither do concurrent reads:
/// an inline walk reads on a thread that already holds a slot.
#[test]
fn bounded_units_cap_concurrent_reads() {
    let mut files = Vec::new();
    for a in 0..20 {
        for b in 0..5 {
            files.push(format!("/tree/a{a:02}/b{b}/leaf.go"));
        }
    }
    let inner = MemoryReader::from_files(&files);
    let in_flight = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    let read = {
        let in_flight = Arc::clone(&in_flight);
        let peak = Arc::clone(&peak);
        move |dir: &Path| {
            let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(5));
            let listing = inner.list_children(dir);
            in_flight.fetch_sub(1, Ordering::SeqCst);
            listing
        }
    };
    let config = WalkConfig {
        max_units: Some(3),
        ..WalkConfig::default()
    };
    let (walker, _) = walker_with_events(read, config);

    assert_eq!(find(&walker, "/tree", ".go").len(), 100);
    let peak = peak.load(Ordering::SeqCst);
    assert!(peak <= 3, "{peak} directories were read at once");
    assert_eq!(in_flight.load(Ordering::SeqCst), 0);
}

/// With a single slot the root thread holds it, so every subdirectory is
/// walked inline; without a bound every subdirectory gets its own thread.
#[test]
fn unit_started_events_report_inline_walks() {
    let spawned = |config: WalkConfig| -> Vec<bool> {
        let (walker, events) =
            walker_with_events(MemoryReader::from_files(EXAMPLE_TREE), config);
        find(&walker, "/root", ".go");
        events
            .try_iter()
            .filter_map(|e| match e {
                WalkEvent::UnitSpawned { inline, .. } => Some(inline),
                _ => None,
            })
            .collect()
    };

    let bounded = spawned(WalkConfig {
        max_units: Some(1),
        ..WalkConfig::default()
    });
    assert_eq!(bounded, vec![true, true]);

    let unbounded = spawned(WalkConfig::default());
    assert_eq!(unbounded, vec![false, false]);
}

#[test]
fn invalid_config_is_rejected() {
    let config = WalkConfig {
        result_capacity: 0,
        ..WalkConfig::default()
    };
    let err = Walker::new(MemoryReader::new(), config).unwrap_err();
    assert!(matches!(err, FindError::InvalidConfig(_)));
}

/// Raising the ceiling while `/root/sub` is being listed lets its child
/// `deep/` (depth 2) through a ceiling that started at 2.
#[test]
fn depth_increase_during_walk_includes_previously_excluded_subtree() {
    let (reader, entered, release) = gated(MemoryReader::from_files(EXAMPLE_TREE), "/root/sub");
    let (walker, events) = walker_with_events(reader, depth(2));

    let walk = {
        let walker = walker.clone();
        thread::spawn(move || walker.find_files(Path::new("/root"), ".go", &CancelToken::new()))
    };

    entered
        .recv_timeout(Duration::from_secs(10))
        .expect("unit for /root/sub never started");
    assert_eq!(walker.increase_depth(1), 3);
    release.send(()).unwrap();

    let got = sorted(walk.join().unwrap().unwrap());
    assert_eq!(
        got,
        vec![
            target("/root/a.go"),
            target("/root/sub/b.go"),
            target("/root/sub/deep/c.go"),
        ]
    );
    assert!(events
        .try_iter()
        .any(|e| e == WalkEvent::DepthIncreased { limit: 3 }));
}

#[test]
fn negative_depth_delta_lowers_ceiling() {
    let (walker, _) = walker_with_events(MemoryReader::from_files(EXAMPLE_TREE), depth(3));
    assert_eq!(walker.increase_depth(-1), 2);
    assert_eq!(
        find(&walker, "/root", ".go"),
        vec![target("/root/a.go"), target("/root/sub/b.go")]
    );
}

/// Cancelling while `/root/sub` is being listed: the call still returns, the
/// result is a subset of the full answer, and `/root/sub` spawns nothing.
#[test]
fn cancellation_mid_walk_returns_partial_subset() {
    let (reader, entered, release) = gated(MemoryReader::from_files(EXAMPLE_TREE), "/root/sub");
    let (walker, events) = walker_with_events(reader, depth(10));
    let token = CancelToken::new();

    let walk = {
        let walker = walker.clone();
        let token = token.clone();
        thread::spawn(move || walker.find_files(Path::new("/root"), ".go", &token))
    };

    entered
        .recv_timeout(Duration::from_secs(10))
        .expect("unit for /root/sub never started");
    token.cancel();
    release.send(()).unwrap();

    let got = sorted(walk.join().unwrap().expect("cancellation is not an error"));
    let full = vec![
        target("/root/a.go"),
        target("/root/sub/b.go"),
        target("/root/sub/deep/c.go"),
    ];
    assert!(got.iter().all(|t| full.contains(t)));
    assert!(!got.contains(&target("/root/sub/b.go")));

    let events: Vec<WalkEvent> = events.try_iter().collect();
    assert!(events.contains(&WalkEvent::CancellationObserved {
        dir: PathBuf::from("/root/sub"),
        depth: 1,
    }));
    assert!(!events.iter().any(|e| matches!(
        e,
        WalkEvent::UnitSpawned { dir, .. } if dir == Path::new("/root/sub/deep")
    )));
    assert!(events
        .iter()
        .any(|e| matches!(e, WalkEvent::RunComplete { cancelled: true, .. })));
}

#[test]
fn cancelled_before_start_returns_empty() {
    let (walker, events) = walker_with_events(MemoryReader::from_files(EXAMPLE_TREE), depth(5));
    let token = CancelToken::new();
    token.cancel();

    let got = walker
        .find_files(Path::new("/root"), ".go", &token)
        .unwrap();
    assert!(got.is_empty());
    assert!(!events
        .try_iter()
        .any(|e| matches!(e, WalkEvent::UnitSpawned { .. })));
}

#[test]
fn expired_deadline_cancels_walk() {
    let (walker, _) = walker_with_events(MemoryReader::from_files(EXAMPLE_TREE), depth(5));
    let token = CancelToken::with_deadline(Instant::now());

    let got = walker
        .find_files(Path::new("/root"), ".go", &token)
        .unwrap();
    assert!(got.is_empty());
}

/// Two requests before any unit polls collapse into a single snapshot.
#[test]
fn double_status_request_yields_one_snapshot() {
    let (walker, events) = walker_with_events(MemoryReader::from_files(EXAMPLE_TREE), depth(5));

    assert!(walker.request_status());
    assert!(!walker.request_status());

    let got = find(&walker, "/root", ".go");
    assert_eq!(got.len(), 3, "a status cycle must not drop the entry");

    let snapshots: Vec<WalkEvent> = events
        .try_iter()
        .filter(|e| matches!(e, WalkEvent::StatusSnapshot { .. }))
        .collect();
    assert_eq!(snapshots.len(), 1);
    match &snapshots[0] {
        WalkEvent::StatusSnapshot {
            dir, depth, limit, ..
        } => {
            assert_eq!(dir, Path::new("/root"));
            assert_eq!(*depth, 0);
            assert_eq!(*limit, 5);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

/// A status request raised while a unit is parked is answered by the walk
/// without aborting it.
#[test]
fn status_request_during_walk_is_answered() {
    let (reader, entered, release) = gated(MemoryReader::from_files(EXAMPLE_TREE), "/root/sub");
    let (walker, events) = walker_with_events(reader, depth(5));

    let walk = {
        let walker = walker.clone();
        thread::spawn(move || walker.find_files(Path::new("/root"), ".go", &CancelToken::new()))
    };

    entered
        .recv_timeout(Duration::from_secs(10))
        .expect("unit for /root/sub never started");
    assert!(walker.request_status());
    release.send(()).unwrap();

    assert_eq!(walk.join().unwrap().unwrap().len(), 3);
    assert!(events.try_iter().any(|e| matches!(
        e,
        WalkEvent::StatusSnapshot { ref dir, depth: 1, .. } if dir == Path::new("/root/sub")
    )));
}

/// The relay belongs to the walker: a request made between walks waits for
/// the next walk and is answered exactly once.
#[test]
fn idle_status_request_is_answered_by_next_walk() {
    let (walker, events) = walker_with_events(MemoryReader::from_files(EXAMPLE_TREE), depth(5));
    let snapshots = |events: &Receiver<WalkEvent>| {
        events
            .try_iter()
            .filter(|e| matches!(e, WalkEvent::StatusSnapshot { .. }))
            .count()
    };

    find(&walker, "/root", ".go");
    assert_eq!(snapshots(&events), 0);

    assert!(walker.request_status());
    assert_eq!(find(&walker, "/root", ".go").len(), 3);
    assert_eq!(snapshots(&events), 1);

    find(&walker, "/root", ".go");
    assert_eq!(snapshots(&events), 0);
}
