//! Integration tests for demand-driven reader access and fail-fast faults.

use std::path::{Path, PathBuf};
use std::rc::Rc;
use test_support::{EventLog, MemoryReader, Query};
use visit::{Event, FileSystemVisitor, NodeEvent, VisitErrorKind};

fn tree() -> MemoryReader {
    MemoryReader::new()
        .file("top/d0/a")
        .file("top/d1/b")
        .file("top/f")
}

// ============================================================================
// Laziness
// ============================================================================

#[test]
fn first_pull_only_classifies_the_root() {
    let reader = Rc::new(tree());
    let mut visitor = FileSystemVisitor::with_reader("top", Rc::clone(&reader)).expect("visitor");
    let mut visit = visitor.visit();

    assert_eq!(visit.next().expect("root").expect("ok"), PathBuf::from("top"));
    assert_eq!(
        reader.queries(),
        vec![
            Query::IsFile(PathBuf::from("top")),
            Query::IsDirectory(PathBuf::from("top")),
        ]
    );
}

#[test]
fn each_pull_lists_only_what_the_next_path_needs() {
    let reader = Rc::new(tree());
    let mut visitor = FileSystemVisitor::with_reader("top", Rc::clone(&reader)).expect("visitor");
    let mut visit = visitor.visit();

    visit.next().expect("root").expect("ok");
    assert_eq!(visit.next().expect("d0").expect("ok"), PathBuf::from("top/d0"));
    assert!(reader.listed(Path::new("top")));
    assert!(!reader.listed(Path::new("top/d0")));

    assert_eq!(visit.next().expect("a").expect("ok"), PathBuf::from("top/d0/a"));
    assert!(reader.listed(Path::new("top/d0")));
    assert!(!reader.listed(Path::new("top/d1")));
    assert!(
        !reader
            .queries()
            .contains(&Query::Files(PathBuf::from("top"))),
        "root files must wait for subdirectory recursion"
    );
}

#[test]
fn dropping_the_iterator_stops_all_work() {
    let reader = Rc::new(tree());
    let mut visitor = FileSystemVisitor::with_reader("top", Rc::clone(&reader)).expect("visitor");
    let log = EventLog::new();
    log.attach(visitor.handlers_mut());

    let taken: Vec<_> = visitor.visit().take(2).collect::<Result<_, _>>().expect("visit");
    assert_eq!(taken, vec![PathBuf::from("top"), PathBuf::from("top/d0")]);

    let queries = reader.query_count();
    assert!(!reader.listed(Path::new("top/d0")));
    assert_eq!(log.count(Event::Finish), 0);
    assert_eq!(reader.query_count(), queries);
}

#[test]
fn frontier_depth_tracks_pending_work() {
    let mut visitor = FileSystemVisitor::with_reader("top", tree()).expect("visitor");
    let mut visit = visitor.visit();
    assert_eq!(visit.depth(), 0);

    visit.next().expect("root").expect("ok");
    assert_eq!(visit.depth(), 1);

    for item in visit.by_ref() {
        item.expect("visit item");
    }
    assert_eq!(visit.depth(), 0);
    assert_eq!(visit.stats().yielded, 6);
}

// ============================================================================
// Faults
// ============================================================================

#[test]
fn directory_listing_fault_ends_traversal_without_finish() {
    let reader = tree().fail_directories("top/d0");
    let mut visitor = FileSystemVisitor::with_reader("top", reader).expect("visitor");
    let log = EventLog::new();
    log.attach(visitor.handlers_mut());
    let mut visit = visitor.visit();

    assert_eq!(visit.next().expect("root").expect("ok"), PathBuf::from("top"));
    assert_eq!(visit.next().expect("d0").expect("ok"), PathBuf::from("top/d0"));
    let error = visit.next().expect("fault").expect_err("listing fails");
    assert!(matches!(error.kind(), VisitErrorKind::ListDirectories { .. }));
    assert_eq!(error.path(), Some(Path::new("top/d0")));
    assert!(error.to_string().contains("failed to list directories in 'top/d0'"));

    assert!(visit.next().is_none());
    assert!(visit.next().is_none());
    drop(visit);
    assert_eq!(log.count(Event::Finish), 0);
    assert_eq!(log.count(Event::Start), 1);
}

#[test]
fn file_listing_fault_keeps_earlier_items() {
    let reader = tree().fail_files("top");
    let mut visitor = FileSystemVisitor::with_reader("top", reader).expect("visitor");

    let mut delivered = Vec::new();
    let mut failure = None;
    for item in visitor.visit() {
        match item {
            Ok(path) => delivered.push(path),
            Err(error) => failure = Some(error),
        }
    }

    assert_eq!(
        delivered,
        vec![
            PathBuf::from("top"),
            PathBuf::from("top/d0"),
            PathBuf::from("top/d0/a"),
            PathBuf::from("top/d1"),
            PathBuf::from("top/d1/b"),
        ]
    );
    let error = failure.expect("fault surfaced");
    assert!(matches!(error.kind(), VisitErrorKind::ListFiles { .. }));
    assert!(std::error::Error::source(&error).is_some());
}

#[test]
fn collect_paths_returns_the_fault() {
    let mut visitor =
        FileSystemVisitor::with_reader("top", tree().fail_files("top/d1")).expect("visitor");
    let error = visitor.collect_paths().expect_err("fault");
    assert_eq!(error.path(), Some(Path::new("top/d1")));
}

#[test]
fn subscriber_fault_aborts_and_skips_later_subscribers() {
    let mut visitor = FileSystemVisitor::with_reader("top", tree()).expect("visitor");
    visitor
        .handlers_mut()
        .try_on(NodeEvent::FilteredFileFound, |notification| {
            if notification.path() == Path::new("top/d0/a") {
                return Err("refused".into());
            }
            Ok(())
        });
    let log = EventLog::new();
    log.attach(visitor.handlers_mut());

    let results: Vec<_> = visitor.visit().collect();
    let (last, delivered) = results.split_last().expect("items");
    let error = last.as_ref().expect_err("subscriber fault");

    assert_eq!(delivered.len(), 2);
    assert!(delivered.iter().all(Result::is_ok));
    match error.kind() {
        VisitErrorKind::Subscriber { event, path, .. } => {
            assert_eq!(*event, Event::FilteredFileFound);
            assert_eq!(path.as_deref(), Some(Path::new("top/d0/a")));
        }
        other => panic!("unexpected error kind: {other:?}"),
    }
    assert_eq!(
        error.to_string(),
        "FilteredFileFound subscriber failed for 'top/d0/a': refused"
    );
    assert!(log.paths(Event::FilteredFileFound).is_empty());
    assert_eq!(log.count(Event::Finish), 0);
}

#[test]
fn start_subscriber_fault_precedes_any_query() {
    let reader = Rc::new(tree());
    let mut visitor = FileSystemVisitor::with_reader("top", Rc::clone(&reader)).expect("visitor");
    visitor.handlers_mut().try_on_start(|| Err("not today".into()));
    let mut visit = visitor.visit();

    let error = visit.next().expect("fault").expect_err("start fails");
    assert!(error.path().is_none());
    assert!(visit.next().is_none());
    assert_eq!(reader.query_count(), 0);
}

#[test]
fn finish_subscriber_fault_is_the_last_item() {
    let mut visitor =
        FileSystemVisitor::with_reader("top", MemoryReader::new().dir("top")).expect("visitor");
    visitor.handlers_mut().try_on_finish(|| Err("flush failed".into()));
    let mut visit = visitor.visit();

    assert!(visit.next().expect("root").is_ok());
    let error = visit.next().expect("fault").expect_err("finish fails");
    assert_eq!(error.to_string(), "Finish subscriber failed: flush failed");
    assert!(visit.next().is_none());
}

#[test]
fn empty_root_is_a_construction_error() {
    let error = FileSystemVisitor::with_reader("", MemoryReader::new()).expect_err("empty root");
    assert!(matches!(error.kind(), VisitErrorKind::EmptyRoot));
    assert_eq!(error.to_string(), "traversal root path must not be empty");
}
