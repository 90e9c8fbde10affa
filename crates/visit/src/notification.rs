use std::fmt;
use std::path::{Path, PathBuf};

/// Kind of node a notification describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A non-directory entry.
    File,
    /// A directory.
    Directory,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::File => "file",
            Self::Directory => "directory",
        })
    }
}

/// Payload handed to node subscribers.
///
/// One notification is created per visited node and shared between its
/// "found" and "filtered-found" firings, so a stop requested during the first
/// stage is still set when the second stage runs. Subscribers of the same
/// firing see each other's changes in subscription order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisitNotification {
    path: PathBuf,
    kind: NodeKind,
    stop_requested: bool,
}

impl VisitNotification {
    pub(crate) fn new(path: PathBuf, kind: NodeKind) -> Self {
        Self {
            path,
            kind,
            stop_requested: false,
        }
    }

    /// Path of the node being visited.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the node is a file or a directory.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Reports whether a subscriber asked the traversal to stop.
    #[must_use]
    pub const fn stop_requested(&self) -> bool {
        self.stop_requested
    }

    /// Asks the traversal to stop after the current node completes.
    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    /// Sets or clears the stop request.
    ///
    /// Clearing only affects subscribers that run later in the same node's
    /// dispatch. A stop already observed by the traversal stays in effect.
    pub fn set_stop_requested(&mut self, stop: bool) {
        self.stop_requested = stop;
    }

    pub(crate) fn into_path(self) -> PathBuf {
        self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_notification_has_no_stop_request() {
        let notification = VisitNotification::new(PathBuf::from("top/f0"), NodeKind::File);
        assert_eq!(notification.path(), Path::new("top/f0"));
        assert_eq!(notification.kind(), NodeKind::File);
        assert!(!notification.stop_requested());
    }

    #[test]
    fn stop_request_can_be_set_and_cleared() {
        let mut notification = VisitNotification::new(PathBuf::from("d"), NodeKind::Directory);
        notification.request_stop();
        assert!(notification.stop_requested());
        notification.set_stop_requested(false);
        assert!(!notification.stop_requested());
        assert_eq!(notification.into_path(), PathBuf::from("d"));
    }

    #[test]
    fn node_kind_displays_lowercase() {
        assert_eq!(NodeKind::Directory.to_string(), "directory");
        assert_eq!(NodeKind::File.to_string(), "file");
    }
}
