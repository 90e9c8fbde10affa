use logging::debug_log;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Read-only view of the storage a visitor walks.
///
/// The visitor never touches the filesystem directly; every classification
/// and listing goes through this trait. Listings are traversed in the order
/// they are returned. No atomicity is assumed across calls for the same path:
/// an entry classified as a directory may fail to list moments later, in
/// which case the listing error ends the traversal.
pub trait DirectoryReader {
    /// Reports whether `path` names an existing non-directory entry.
    fn is_file(&self, path: &Path) -> bool;

    /// Reports whether `path` names an existing directory.
    fn is_directory(&self, path: &Path) -> bool;

    /// Lists the immediate subdirectories of `path`.
    fn directories(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Lists the immediate files of `path`.
    fn files(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}

impl<R: DirectoryReader + ?Sized> DirectoryReader for &R {
    fn is_file(&self, path: &Path) -> bool {
        (**self).is_file(path)
    }

    fn is_directory(&self, path: &Path) -> bool {
        (**self).is_directory(path)
    }

    fn directories(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        (**self).directories(path)
    }

    fn files(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        (**self).files(path)
    }
}

impl<R: DirectoryReader + ?Sized> DirectoryReader for Box<R> {
    fn is_file(&self, path: &Path) -> bool {
        (**self).is_file(path)
    }

    fn is_directory(&self, path: &Path) -> bool {
        (**self).is_directory(path)
    }

    fn directories(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        (**self).directories(path)
    }

    fn files(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        (**self).files(path)
    }
}

impl<R: DirectoryReader + ?Sized> DirectoryReader for Rc<R> {
    fn is_file(&self, path: &Path) -> bool {
        (**self).is_file(path)
    }

    fn is_directory(&self, path: &Path) -> bool {
        (**self).is_directory(path)
    }

    fn directories(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        (**self).directories(path)
    }

    fn files(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        (**self).files(path)
    }
}

/// [`DirectoryReader`] backed by the live filesystem.
///
/// Listings are sorted by file name so repeated traversals of an unchanged
/// tree observe the same order on every platform. Symbolic links are reported
/// as files and never descended into unless [`follow_symlinks`] is enabled.
/// Following links performs no cycle detection; a link pointing at one of its
/// ancestors makes the traversal unbounded.
///
/// [`follow_symlinks`]: FsDirectoryReader::follow_symlinks
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FsDirectoryReader {
    follow_symlinks: bool,
}

impl FsDirectoryReader {
    /// Creates a reader that does not follow symbolic links.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            follow_symlinks: false,
        }
    }

    /// Configures whether symbolic links are classified by their target.
    #[must_use]
    pub const fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Reports whether symbolic links are followed.
    #[must_use]
    pub const fn follows_symlinks(&self) -> bool {
        self.follow_symlinks
    }

    fn metadata(&self, path: &Path) -> io::Result<fs::Metadata> {
        if self.follow_symlinks {
            fs::metadata(path)
        } else {
            fs::symlink_metadata(path)
        }
    }

    fn entry_is_dir(&self, entry: &fs::DirEntry) -> io::Result<bool> {
        if self.follow_symlinks {
            Ok(fs::metadata(entry.path()).is_ok_and(|metadata| metadata.is_dir()))
        } else {
            Ok(entry.file_type()?.is_dir())
        }
    }

    fn list(&self, path: &Path, directories: bool) -> io::Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            if self.entry_is_dir(&entry)? == directories {
                entries.push(entry.path());
            }
        }
        entries.sort();

        debug_log!(
            Reader,
            3,
            "found {} {} in {:?}",
            entries.len(),
            if directories { "directories" } else { "files" },
            path
        );
        Ok(entries)
    }
}

impl DirectoryReader for FsDirectoryReader {
    fn is_file(&self, path: &Path) -> bool {
        self.metadata(path)
            .is_ok_and(|metadata| !metadata.file_type().is_dir())
    }

    fn is_directory(&self, path: &Path) -> bool {
        self.metadata(path)
            .is_ok_and(|metadata| metadata.file_type().is_dir())
    }

    fn directories(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        self.list(path, true)
    }

    fn files(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        self.list(path, false)
    }
}
