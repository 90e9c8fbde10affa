use std::cell::{Cell, RefCell};
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use filters::{FilterError, FilterSet};
use logging::{VerbosityConfig, drain_events, info_log, init_tracing_with_filter};
use tracing_subscriber::EnvFilter;
use visit::{
    DirectoryReader, FileSystemVisitor, FsDirectoryReader, VisitBuilder, VisitError,
    VisitErrorKind, VisitNotification, VisitStats,
};

use crate::args::ParsedArgs;
use crate::{HELP_TEXT, VERSION_TEXT};

/// Filter applied to `tracing` events when `RUST_LOG` is unset.
const DEFAULT_TRACE_FILTER: &str = "visit=trace";

/// Echoed event lines waiting to be written ahead of the next path.
type EventLines = Rc<RefCell<Vec<String>>>;

/// Reasons a run ends without success.
#[derive(Debug)]
enum Failure {
    /// Missing operand or an invalid diagnostic flag.
    Usage(String),
    /// A filter pattern failed to compile.
    Filter(FilterError),
    /// The visitor could not be built, or the traversal faulted.
    Visit(VisitError),
    /// Writing the results failed.
    Output(io::Error),
}

impl Failure {
    fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) | Self::Filter(_) => 1,
            Self::Visit(error) if is_construction_error(error) => 1,
            Self::Visit(_) | Self::Output(_) => 2,
        }
    }
}

fn is_construction_error(error: &VisitError) -> bool {
    matches!(error.kind(), VisitErrorKind::EmptyRoot)
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage(message) => f.write_str(message),
            Self::Filter(error) => write!(f, "{error}"),
            Self::Visit(error) => write!(f, "{error}"),
            Self::Output(error) => write!(f, "failed to write output: {error}"),
        }
    }
}

impl From<FilterError> for Failure {
    fn from(error: FilterError) -> Self {
        Self::Filter(error)
    }
}

impl From<VisitError> for Failure {
    fn from(error: VisitError) -> Self {
        Self::Visit(error)
    }
}

impl From<io::Error> for Failure {
    fn from(error: io::Error) -> Self {
        Self::Output(error)
    }
}

pub(crate) fn execute<Out, Err>(parsed: ParsedArgs, stdout: &mut Out, stderr: &mut Err) -> i32
where
    Out: Write,
    Err: Write,
{
    if parsed.show_help {
        return match stdout.write_all(HELP_TEXT.as_bytes()) {
            Ok(()) => 0,
            Err(_) => 1,
        };
    }

    if parsed.show_version {
        return match stdout.write_all(VERSION_TEXT.as_bytes()) {
            Ok(()) => 0,
            Err(_) => 1,
        };
    }

    let outcome = traverse(parsed, stdout, stderr);
    let diagnostics = drain_diagnostics(stderr);

    match outcome.and(diagnostics.map_err(Failure::Output)) {
        Ok(()) => 0,
        Err(failure) => {
            let _ = writeln!(stderr, "fs-visit error: {failure}");
            failure.exit_code()
        }
    }
}

fn traverse<Out, Err>(parsed: ParsedArgs, stdout: &mut Out, stderr: &mut Err) -> Result<(), Failure>
where
    Out: Write,
    Err: Write,
{
    let ParsedArgs {
        root,
        rules,
        follow_symlinks,
        stop_at,
        max_items,
        verbose,
        info,
        debug,
        print_events,
        ..
    } = parsed;

    let Some(root) = root else {
        return Err(Failure::Usage(
            "missing ROOT operand; try 'fs-visit --help'".to_owned(),
        ));
    };

    install_diagnostics(verbosity(verbose, &info, &debug)?);

    let rules = FilterSet::from_rules(rules)?;
    let reader = FsDirectoryReader::new().follow_symlinks(follow_symlinks);
    let mut visitor = build_visitor(&root, reader, rules)?;

    if let Some(target) = stop_at {
        let target = resolve_against(&root, target);
        let directory_target = target.clone();
        visitor
            .on_file_found(stop_when_found(target))
            .on_directory_found(stop_when_found(directory_target));
    }

    if let Some(limit) = max_items {
        let accepted = Rc::new(Cell::new(0_u64));
        let directories = Rc::clone(&accepted);
        visitor
            .on_filtered_file_found(stop_after(accepted, limit))
            .on_filtered_directory_found(stop_after(directories, limit));
    }

    let echoed = print_events.then(|| echo_events(&mut visitor));

    let mut visit = visitor.visit();
    for item in visit.by_ref() {
        let path = item?;
        if let Some(lines) = &echoed {
            flush_events(lines, stdout)?;
        }
        writeln!(stdout, "{}", path.display())?;
        drain_diagnostics(stderr)?;
    }
    if let Some(lines) = &echoed {
        flush_events(lines, stdout)?;
    }
    stdout.flush()?;

    report_stats(visit.stats());
    Ok(())
}

fn verbosity(verbose: u8, info: &[String], debug: &[String]) -> Result<VerbosityConfig, Failure> {
    let mut config = VerbosityConfig::from_verbose_level(verbose);
    for token in info {
        config.apply_info_flag(token).map_err(Failure::Usage)?;
    }
    for token in debug {
        config.apply_debug_flag(token).map_err(Failure::Usage)?;
    }
    Ok(config)
}

/// Installs the verbosity configuration for this thread and, once per
/// process, the tracing bridge honouring `RUST_LOG`.
fn install_diagnostics(config: VerbosityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACE_FILTER));
    init_tracing_with_filter(config, filter);
    let _ = drain_events();
}

fn build_visitor(
    root: &Path,
    reader: FsDirectoryReader,
    rules: FilterSet,
) -> Result<FileSystemVisitor, VisitError> {
    let builder = VisitBuilder::new(root).reader(reader);
    if rules.is_empty() {
        return builder.build();
    }

    let base = root.to_path_buf();
    builder
        .filter(move |path| {
            // The predicate only receives the path, so it stats the node
            // again to decide whether directory-only rules apply.
            let relative = path.strip_prefix(&base).unwrap_or(path);
            rules.allows(relative, reader.is_directory(path))
        })
        .build()
}

/// Relative stop targets name a node beneath the root.
fn resolve_against(root: &Path, target: PathBuf) -> PathBuf {
    if target.is_absolute() {
        target
    } else {
        root.join(target)
    }
}

fn stop_when_found(target: PathBuf) -> impl FnMut(&mut VisitNotification) + 'static {
    move |notification| {
        if notification.path() == target.as_path() {
            info_log!(Visit, 1, "stopping at {}", target.display());
            notification.request_stop();
        }
    }
}

fn stop_after(
    accepted: Rc<Cell<u64>>,
    limit: u64,
) -> impl FnMut(&mut VisitNotification) + 'static {
    move |notification| {
        accepted.set(accepted.get() + 1);
        if accepted.get() >= limit {
            notification.request_stop();
        }
    }
}

fn echo_events(visitor: &mut FileSystemVisitor) -> EventLines {
    let lines: EventLines = Rc::default();

    let start = Rc::clone(&lines);
    let finish = Rc::clone(&lines);
    visitor
        .on_start(move || start.borrow_mut().push("event: Start".to_owned()))
        .on_finish(move || finish.borrow_mut().push("event: Finish".to_owned()))
        .on_file_found(echo_node(&lines, "FileFound"))
        .on_filtered_file_found(echo_node(&lines, "FilteredFileFound"))
        .on_directory_found(echo_node(&lines, "DirectoryFound"))
        .on_filtered_directory_found(echo_node(&lines, "FilteredDirectoryFound"));

    lines
}

fn echo_node(
    lines: &EventLines,
    name: &'static str,
) -> impl FnMut(&mut VisitNotification) + 'static {
    let lines = Rc::clone(lines);
    move |notification| {
        lines
            .borrow_mut()
            .push(format!("event: {name} {}", notification.path().display()));
    }
}

fn flush_events<Out: Write>(lines: &EventLines, stdout: &mut Out) -> io::Result<()> {
    for line in lines.borrow_mut().drain(..) {
        writeln!(stdout, "{line}")?;
    }
    Ok(())
}

/// Detailed summary, shown from `--info=stats2`.
fn report_stats(stats: &VisitStats) {
    tracing::debug!(
        target: "visit::stats",
        "{} paths visited, {} files skipped, {} directories pruned",
        stats.yielded,
        stats.files_rejected,
        stats.directories_rejected
    );
}

fn drain_diagnostics<Err: Write>(stderr: &mut Err) -> io::Result<()> {
    for event in drain_events() {
        writeln!(stderr, "{}", event.render())?;
    }
    Ok(())
}
