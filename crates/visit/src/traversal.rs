use crate::error::VisitError;
use crate::events::EventHandlers;
use crate::notification::NodeKind;
use crate::pipeline::{NodePipeline, PathFilter};
use crate::reader::DirectoryReader;
use crate::state::{VisitState, VisitStats};
use logging::{debug_log, info_log};
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};
use std::vec;

/// Lazy pre-order traversal produced by [`FileSystemVisitor::visit`].
///
/// Each call to [`next`](Iterator::next) advances the depth-first frontier
/// until exactly one accepted path can be returned, querying the reader only
/// for the work that path requires. `Start` fires on the first pull; `Finish`
/// fires on the pull that finds the traversal exhausted or cancelled. A fault
/// from the reader or a subscriber is yielded once as `Err` and ends the
/// traversal without firing `Finish`.
///
/// [`FileSystemVisitor::visit`]: crate::FileSystemVisitor::visit
pub struct Visit<'v, R> {
    root: &'v Path,
    reader: &'v R,
    pipeline: NodePipeline<'v>,
    state: VisitState,
    stats: VisitStats,
    phase: Phase,
    frontier: Vec<Pending>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    NotStarted,
    Walking,
    Done,
}

/// Work remaining on the depth-first frontier. The last entry is processed
/// first.
#[derive(Debug)]
enum Pending {
    /// An accepted directory whose subdirectories have not been listed.
    Expand(PathBuf),
    /// Sibling directories still to be dispatched.
    Directories(vec::IntoIter<PathBuf>),
    /// A directory whose own files are listed once its subdirectories are done.
    ListFiles(PathBuf),
    /// Sibling files still to be dispatched.
    Files(vec::IntoIter<PathBuf>),
}

enum Step {
    Yield(PathBuf),
    Continue,
    Exhausted,
}

impl<'v, R: DirectoryReader> Visit<'v, R> {
    pub(crate) fn new(
        root: &'v Path,
        reader: &'v R,
        filter: Option<&'v PathFilter>,
        handlers: &'v mut EventHandlers,
    ) -> Self {
        Self {
            root,
            reader,
            pipeline: NodePipeline::new(filter, handlers),
            state: VisitState::new(),
            stats: VisitStats::default(),
            phase: Phase::NotStarted,
            frontier: Vec::new(),
        }
    }

    /// The cancellation state of this traversal.
    #[must_use]
    pub const fn state(&self) -> &VisitState {
        &self.state
    }

    /// Reports whether the traversal has been cancelled or has ended.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Counters accumulated so far.
    #[must_use]
    pub const fn stats(&self) -> &VisitStats {
        &self.stats
    }

    /// Number of pending entries on the frontier.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frontier.len()
    }

    fn begin(&mut self) -> Result<(), VisitError> {
        self.phase = Phase::Walking;
        info_log!(Visit, 1, "visiting {:?}", self.root);
        self.pipeline.handlers().fire_start()?;

        let root = self.root.to_path_buf();
        if self.reader.is_file(self.root) {
            debug_log!(Reader, 1, "root {:?} is a file", self.root);
            self.frontier.push(Pending::Files(vec![root].into_iter()));
        } else if self.reader.is_directory(self.root) {
            debug_log!(Reader, 1, "root {:?} is a directory", self.root);
            self.frontier
                .push(Pending::Directories(vec![root].into_iter()));
        } else {
            debug_log!(Reader, 1, "root {:?} is neither file nor directory", self.root);
        }
        Ok(())
    }

    fn step(&mut self) -> Result<Step, VisitError> {
        let Some(pending) = self.frontier.pop() else {
            return Ok(Step::Exhausted);
        };

        match pending {
            Pending::Expand(directory) => {
                debug_log!(Walk, 2, "expanding {:?}", directory);
                let children = self
                    .reader
                    .directories(&directory)
                    .map_err(|error| VisitError::list_directories(directory.clone(), error))?;
                debug_log!(Reader, 2, "{} subdirectories in {:?}", children.len(), directory);
                self.frontier.push(Pending::ListFiles(directory));
                self.push_remaining(Pending::Directories(children.into_iter()));
                Ok(Step::Continue)
            }
            Pending::Directories(mut siblings) => {
                let Some(directory) = siblings.next() else {
                    return Ok(Step::Continue);
                };
                self.push_remaining(Pending::Directories(siblings));
                match self.dispatch(directory, NodeKind::Directory)? {
                    Some(accepted) => {
                        self.frontier.push(Pending::Expand(accepted.clone()));
                        Ok(Step::Yield(accepted))
                    }
                    None => Ok(Step::Continue),
                }
            }
            Pending::ListFiles(directory) => {
                let files = self
                    .reader
                    .files(&directory)
                    .map_err(|error| VisitError::list_files(directory.clone(), error))?;
                debug_log!(Reader, 2, "{} files in {:?}", files.len(), directory);
                self.push_remaining(Pending::Files(files.into_iter()));
                Ok(Step::Continue)
            }
            Pending::Files(mut siblings) => {
                let Some(file) = siblings.next() else {
                    return Ok(Step::Continue);
                };
                self.push_remaining(Pending::Files(siblings));
                Ok(self
                    .dispatch(file, NodeKind::File)?
                    .map_or(Step::Continue, Step::Yield))
            }
        }
    }

    fn push_remaining(&mut self, pending: Pending) {
        let empty = match &pending {
            Pending::Directories(siblings) | Pending::Files(siblings) => {
                siblings.as_slice().is_empty()
            }
            Pending::Expand(_) | Pending::ListFiles(_) => false,
        };
        if !empty {
            self.frontier.push(pending);
        }
    }

    fn dispatch(&mut self, path: PathBuf, kind: NodeKind) -> Result<Option<PathBuf>, VisitError> {
        debug_log!(Walk, 3, "dispatching {kind} {:?}", path);
        self.pipeline
            .run(path, kind, &mut self.state, &mut self.stats)
    }

    fn finish(&mut self) -> Option<Result<PathBuf, VisitError>> {
        let cancelled = self.state.is_finished();
        self.phase = Phase::Done;
        self.state.finish();
        self.frontier.clear();

        info_log!(
            Visit,
            1,
            "finished {:?}{}",
            self.root,
            if cancelled { " (stopped early)" } else { "" }
        );
        info_log!(
            Stats,
            1,
            "{} yielded, {} files and {} directories found, {} rejected",
            self.stats.yielded,
            self.stats.files_found,
            self.stats.directories_found,
            self.stats.files_rejected + self.stats.directories_rejected
        );

        self.pipeline.handlers().fire_finish().err().map(Err)
    }

    fn fail(&mut self, error: VisitError) -> Option<Result<PathBuf, VisitError>> {
        debug_log!(Walk, 1, "traversal aborted: {error}");
        self.phase = Phase::Done;
        self.state.finish();
        self.frontier.clear();
        Some(Err(error))
    }
}

impl<R: DirectoryReader> Iterator for Visit<'_, R> {
    type Item = Result<PathBuf, VisitError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.phase {
            Phase::Done => return None,
            Phase::NotStarted => {
                if let Err(error) = self.begin() {
                    return self.fail(error);
                }
            }
            Phase::Walking => {
                if self.state.is_finished() {
                    return self.finish();
                }
            }
        }

        loop {
            match self.step() {
                Ok(Step::Yield(path)) => {
                    self.stats.yielded += 1;
                    return Some(Ok(path));
                }
                // A stop raised by a node that produced nothing ends the
                // traversal before any further node is dispatched.
                Ok(Step::Continue) if self.state.is_finished() => return self.finish(),
                Ok(Step::Continue) => {}
                Ok(Step::Exhausted) => return self.finish(),
                Err(error) => return self.fail(error),
            }
        }
    }
}

impl<R: DirectoryReader> FusedIterator for Visit<'_, R> {}

impl<R> std::fmt::Debug for Visit<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Visit")
            .field("root", &self.root)
            .field("phase", &self.phase)
            .field("state", &self.state)
            .field("stats", &self.stats)
            .field("frontier", &self.frontier)
            .finish_non_exhaustive()
    }
}
