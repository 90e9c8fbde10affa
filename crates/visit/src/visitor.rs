use crate::builder::VisitBuilder;
use crate::error::VisitError;
use crate::events::{Event, EventHandlers, NodeEvent};
use crate::notification::VisitNotification;
use crate::pipeline::PathFilter;
use crate::reader::{DirectoryReader, FsDirectoryReader};
use crate::traversal::Visit;
use std::fmt;
use std::path::{Path, PathBuf};

/// Event-instrumented visitor over a directory tree.
///
/// The visitor holds configuration only. Every call to [`visit`](Self::visit)
/// starts an independent traversal with a fresh cancellation state and its own
/// `Start`/`Finish` bracket, so the same visitor can be walked any number of
/// times.
pub struct FileSystemVisitor<R = FsDirectoryReader> {
    root: PathBuf,
    reader: R,
    filter: Option<Box<PathFilter>>,
    handlers: EventHandlers,
}

impl FileSystemVisitor<FsDirectoryReader> {
    /// Creates a visitor over the live filesystem with no filter.
    pub fn new<P: Into<PathBuf>>(root: P) -> Result<Self, VisitError> {
        Self::from_parts(root.into(), FsDirectoryReader::default(), None)
    }

    /// Starts a [`VisitBuilder`] for `root`.
    #[must_use]
    pub fn builder<P: Into<PathBuf>>(root: P) -> VisitBuilder {
        VisitBuilder::new(root)
    }
}

impl<R: DirectoryReader> FileSystemVisitor<R> {
    /// Creates a visitor that queries `reader` instead of the filesystem.
    pub fn with_reader<P: Into<PathBuf>>(root: P, reader: R) -> Result<Self, VisitError> {
        Self::from_parts(root.into(), reader, None)
    }

    pub(crate) fn from_parts(
        root: PathBuf,
        reader: R,
        filter: Option<Box<PathFilter>>,
    ) -> Result<Self, VisitError> {
        if root.as_os_str().is_empty() {
            return Err(VisitError::empty_root());
        }

        Ok(Self {
            root,
            reader,
            filter,
            handlers: EventHandlers::new(),
        })
    }

    /// Starts a new traversal.
    ///
    /// Nothing happens until the returned iterator is first polled.
    pub fn visit(&mut self) -> Visit<'_, R> {
        Visit::new(
            &self.root,
            &self.reader,
            self.filter.as_deref(),
            &mut self.handlers,
        )
    }

    /// Runs a full traversal and collects every yielded path.
    ///
    /// Stops at the first fault; paths yielded before it are discarded.
    pub fn collect_paths(&mut self) -> Result<Vec<PathBuf>, VisitError> {
        self.visit().collect()
    }
}

impl<R> FileSystemVisitor<R> {
    /// The traversal root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The directory reader.
    #[must_use]
    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Reports whether a filter predicate is installed.
    #[must_use]
    pub fn has_filter(&self) -> bool {
        self.filter.is_some()
    }

    /// Subscriber table, for fallible registrations and inspection.
    pub fn handlers_mut(&mut self) -> &mut EventHandlers {
        &mut self.handlers
    }

    /// Subscriber table.
    #[must_use]
    pub fn handlers(&self) -> &EventHandlers {
        &self.handlers
    }

    /// Number of subscribers registered on `event`.
    #[must_use]
    pub fn subscriber_count(&self, event: Event) -> usize {
        self.handlers.subscriber_count(event)
    }

    /// Subscribes to the `Start` channel.
    pub fn on_start<F: FnMut() + 'static>(&mut self, handler: F) -> &mut Self {
        self.handlers.on_start(handler);
        self
    }

    /// Subscribes to the `Finish` channel.
    pub fn on_finish<F: FnMut() + 'static>(&mut self, handler: F) -> &mut Self {
        self.handlers.on_finish(handler);
        self
    }

    /// Subscribes to the `FileFound` channel.
    pub fn on_file_found<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&mut VisitNotification) + 'static,
    {
        self.handlers.on(NodeEvent::FileFound, handler);
        self
    }

    /// Subscribes to the `FilteredFileFound` channel.
    pub fn on_filtered_file_found<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&mut VisitNotification) + 'static,
    {
        self.handlers.on(NodeEvent::FilteredFileFound, handler);
        self
    }

    /// Subscribes to the `DirectoryFound` channel.
    pub fn on_directory_found<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&mut VisitNotification) + 'static,
    {
        self.handlers.on(NodeEvent::DirectoryFound, handler);
        self
    }

    /// Subscribes to the `FilteredDirectoryFound` channel.
    pub fn on_filtered_directory_found<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&mut VisitNotification) + 'static,
    {
        self.handlers.on(NodeEvent::FilteredDirectoryFound, handler);
        self
    }
}

impl<R: fmt::Debug> fmt::Debug for FileSystemVisitor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileSystemVisitor")
            .field("root", &self.root)
            .field("reader", &self.reader)
            .field("filtered", &self.filter.is_some())
            .field("handlers", &self.handlers)
            .finish()
    }
}
