use crate::events::Event;
use std::error::Error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Error type subscribers return to abort a traversal.
pub type SubscriberError = Box<dyn Error + Send + Sync + 'static>;

/// Error returned when a visitor cannot be built or a traversal fails.
#[derive(Debug)]
pub struct VisitError {
    kind: VisitErrorKind,
}

impl VisitError {
    pub(crate) fn new(kind: VisitErrorKind) -> Self {
        Self { kind }
    }

    pub(crate) fn empty_root() -> Self {
        Self::new(VisitErrorKind::EmptyRoot)
    }

    pub(crate) fn list_directories(path: PathBuf, source: io::Error) -> Self {
        Self::new(VisitErrorKind::ListDirectories { path, source })
    }

    pub(crate) fn list_files(path: PathBuf, source: io::Error) -> Self {
        Self::new(VisitErrorKind::ListFiles { path, source })
    }

    pub(crate) fn subscriber(event: Event, path: Option<PathBuf>, source: SubscriberError) -> Self {
        Self::new(VisitErrorKind::Subscriber {
            event,
            path,
            source,
        })
    }

    /// Returns the specific failure.
    #[must_use]
    pub fn kind(&self) -> &VisitErrorKind {
        &self.kind
    }

    /// Returns the path tied to the failure, if any.
    ///
    /// Construction errors and faults raised by `Start`/`Finish` subscribers
    /// have no associated node.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.kind.path()
    }
}

impl fmt::Display for VisitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            VisitErrorKind::EmptyRoot => f.write_str("traversal root path must not be empty"),
            VisitErrorKind::ListDirectories { path, source } => {
                write!(
                    f,
                    "failed to list directories in '{}': {}",
                    path.display(),
                    source
                )
            }
            VisitErrorKind::ListFiles { path, source } => {
                write!(
                    f,
                    "failed to list files in '{}': {}",
                    path.display(),
                    source
                )
            }
            VisitErrorKind::Subscriber {
                event,
                path: Some(path),
                source,
            } => {
                write!(
                    f,
                    "{} subscriber failed for '{}': {}",
                    event.name(),
                    path.display(),
                    source
                )
            }
            VisitErrorKind::Subscriber {
                event,
                path: None,
                source,
            } => write!(f, "{} subscriber failed: {}", event.name(), source),
        }
    }
}

impl Error for VisitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            VisitErrorKind::EmptyRoot => None,
            VisitErrorKind::ListDirectories { source, .. }
            | VisitErrorKind::ListFiles { source, .. } => Some(source),
            VisitErrorKind::Subscriber { source, .. } => {
                let source: &(dyn Error + 'static) = &**source;
                Some(source)
            }
        }
    }
}

/// Classification of visitor failures.
#[derive(Debug)]
pub enum VisitErrorKind {
    /// The visitor was constructed with an empty root path.
    EmptyRoot,
    /// The reader failed to list the subdirectories of an accepted directory.
    ListDirectories {
        /// Directory whose subdirectories could not be listed.
        path: PathBuf,
        /// Error reported by the reader.
        source: io::Error,
    },
    /// The reader failed to list the files of an accepted directory.
    ListFiles {
        /// Directory whose files could not be listed.
        path: PathBuf,
        /// Error reported by the reader.
        source: io::Error,
    },
    /// A subscriber returned an error.
    Subscriber {
        /// Channel whose subscriber failed.
        event: Event,
        /// Node being dispatched, absent for `Start` and `Finish`.
        path: Option<PathBuf>,
        /// Error returned by the subscriber.
        source: SubscriberError,
    },
}

impl VisitErrorKind {
    /// Returns the filesystem path tied to the failure, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::EmptyRoot => None,
            Self::ListDirectories { path, .. } | Self::ListFiles { path, .. } => Some(path),
            Self::Subscriber { path, .. } => path.as_deref(),
        }
    }
}
