use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Directory tree created under a temporary directory and removed on drop.
#[derive(Debug)]
pub struct TempTree {
    _temp: TempDir,
    root: PathBuf,
}

impl TempTree {
    /// Creates an empty root directory named `name`.
    pub fn new(name: &str) -> io::Result<Self> {
        let temp = tempfile::tempdir()?;
        let root = temp.path().join(name);
        fs::create_dir(&root)?;
        Ok(Self { _temp: temp, root })
    }

    /// The root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of `relative` inside the tree.
    #[must_use]
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Creates a directory (and its parents) at `relative`.
    pub fn dir(&self, relative: &str) -> io::Result<PathBuf> {
        let path = self.path(relative);
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Creates a file at `relative`, creating parent directories as needed.
    pub fn file(&self, relative: &str) -> io::Result<PathBuf> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, relative.as_bytes())?;
        Ok(path)
    }
}
