use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use visit::DirectoryReader;

/// One call answered by a [`MemoryReader`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Query {
    /// `is_file(path)`
    IsFile(PathBuf),
    /// `is_directory(path)`
    IsDirectory(PathBuf),
    /// `directories(path)`
    Directories(PathBuf),
    /// `files(path)`
    Files(PathBuf),
}

impl Query {
    /// The path the query was issued for.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::IsFile(path)
            | Self::IsDirectory(path)
            | Self::Directories(path)
            | Self::Files(path) => path,
        }
    }
}

#[derive(Debug)]
enum Node {
    File,
    Directory {
        directories: Vec<PathBuf>,
        files: Vec<PathBuf>,
    },
}

/// In-memory directory tree implementing [`DirectoryReader`].
///
/// Listings come back in insertion order. Adding a node registers it with its
/// parent, creating missing ancestors as directories, so a tree can be built
/// from leaf paths alone:
///
/// ```
/// use test_support::MemoryReader;
/// use visit::DirectoryReader;
/// use std::path::Path;
///
/// let reader = MemoryReader::new().file("top/f0").dir("top/d0");
/// assert!(reader.is_directory(Path::new("top")));
/// assert_eq!(reader.files(Path::new("top")).unwrap(), vec![Path::new("top/f0")]);
/// ```
#[derive(Debug, Default)]
pub struct MemoryReader {
    nodes: HashMap<PathBuf, Node>,
    failing_directories: HashSet<PathBuf>,
    failing_files: HashSet<PathBuf>,
    queries: RefCell<Vec<Query>>,
}

impl MemoryReader {
    /// Creates an empty tree. Every path classifies as neither file nor
    /// directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory, creating missing ancestors.
    #[must_use]
    pub fn dir<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.insert_dir(path.into());
        self
    }

    /// Adds a file, creating missing ancestors.
    #[must_use]
    pub fn file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        let path = path.into();
        if self.nodes.contains_key(&path) {
            return self;
        }
        self.attach(&path, false);
        self.nodes.insert(path, Node::File);
        self
    }

    /// Makes `directories(path)` fail with [`io::ErrorKind::NotFound`].
    #[must_use]
    pub fn fail_directories<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.failing_directories.insert(path.into());
        self
    }

    /// Makes `files(path)` fail with [`io::ErrorKind::PermissionDenied`].
    #[must_use]
    pub fn fail_files<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.failing_files.insert(path.into());
        self
    }

    /// Every query answered so far, in call order.
    #[must_use]
    pub fn queries(&self) -> Vec<Query> {
        self.queries.borrow().clone()
    }

    /// Number of queries answered so far.
    #[must_use]
    pub fn query_count(&self) -> usize {
        self.queries.borrow().len()
    }

    /// Reports whether any listing (not classification) touched `path`.
    #[must_use]
    pub fn listed(&self, path: &Path) -> bool {
        self.queries.borrow().iter().any(|query| {
            matches!(query, Query::Directories(_) | Query::Files(_)) && query.path() == path
        })
    }

    /// Forgets the recorded queries.
    pub fn clear_queries(&self) {
        self.queries.borrow_mut().clear();
    }

    fn insert_dir(&mut self, path: PathBuf) {
        if self.nodes.contains_key(&path) {
            return;
        }
        self.attach(&path, true);
        self.nodes.insert(
            path,
            Node::Directory {
                directories: Vec::new(),
                files: Vec::new(),
            },
        );
    }

    fn attach(&mut self, path: &Path, is_dir: bool) {
        let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return;
        };
        let parent = parent.to_path_buf();
        self.insert_dir(parent.clone());
        if let Some(Node::Directory { directories, files }) = self.nodes.get_mut(&parent) {
            let list = if is_dir { directories } else { files };
            list.push(path.to_path_buf());
        }
    }

    fn record(&self, query: Query) {
        self.queries.borrow_mut().push(query);
    }

    fn listing(&self, path: &Path, directories: bool) -> io::Result<Vec<PathBuf>> {
        match self.nodes.get(path) {
            Some(Node::Directory {
                directories: dirs,
                files,
            }) => Ok(if directories { dirs.clone() } else { files.clone() }),
            Some(Node::File) => Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("{} is not a directory", path.display()),
            )),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            )),
        }
    }
}

impl DirectoryReader for MemoryReader {
    fn is_file(&self, path: &Path) -> bool {
        self.record(Query::IsFile(path.to_path_buf()));
        matches!(self.nodes.get(path), Some(Node::File))
    }

    fn is_directory(&self, path: &Path) -> bool {
        self.record(Query::IsDirectory(path.to_path_buf()));
        matches!(self.nodes.get(path), Some(Node::Directory { .. }))
    }

    fn directories(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        self.record(Query::Directories(path.to_path_buf()));
        if self.failing_directories.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} vanished", path.display()),
            ));
        }
        self.listing(path, true)
    }

    fn files(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        self.record(Query::Files(path.to_path_buf()));
        if self.failing_files.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is unreadable", path.display()),
            ));
        }
        self.listing(path, false)
    }
}
