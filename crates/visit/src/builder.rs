use crate::error::VisitError;
use crate::pipeline::PathFilter;
use crate::reader::{DirectoryReader, FsDirectoryReader};
use crate::visitor::FileSystemVisitor;
use std::fmt;
use std::path::{Path, PathBuf};

/// Configures a [`FileSystemVisitor`] rooted at a specific path.
///
/// The reader defaults to [`FsDirectoryReader`]; [`reader`](Self::reader)
/// swaps in any other [`DirectoryReader`], such as an in-memory double.
pub struct VisitBuilder<R = FsDirectoryReader> {
    root: PathBuf,
    reader: R,
    filter: Option<Box<PathFilter>>,
}

impl VisitBuilder<FsDirectoryReader> {
    /// Creates a builder that will visit `root` through the live filesystem.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            reader: FsDirectoryReader::default(),
            filter: None,
        }
    }
}

impl<R> VisitBuilder<R> {
    /// Replaces the directory reader.
    #[must_use]
    pub fn reader<T: DirectoryReader>(self, reader: T) -> VisitBuilder<T> {
        VisitBuilder {
            root: self.root,
            reader,
            filter: self.filter,
        }
    }

    /// Installs the filter predicate. Rejected directories prune their subtree.
    #[must_use]
    pub fn filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Path) -> bool + 'static,
    {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Builds the visitor.
    ///
    /// Fails with [`VisitErrorKind::EmptyRoot`] when the root path is empty.
    ///
    /// [`VisitErrorKind::EmptyRoot`]: crate::VisitErrorKind::EmptyRoot
    pub fn build(self) -> Result<FileSystemVisitor<R>, VisitError>
    where
        R: DirectoryReader,
    {
        FileSystemVisitor::from_parts(self.root, self.reader, self.filter)
    }
}

impl<R: fmt::Debug> fmt::Debug for VisitBuilder<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisitBuilder")
            .field("root", &self.root)
            .field("reader", &self.reader)
            .field("filtered", &self.filter.is_some())
            .finish()
    }
}
