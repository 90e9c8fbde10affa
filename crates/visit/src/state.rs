/// Cancellation flag owned by a single traversal.
///
/// A fresh state is created every time [`FileSystemVisitor::visit`] starts a
/// traversal. Once finished it never resets; the traversal observes it only
/// between pulls.
///
/// [`FileSystemVisitor::visit`]: crate::FileSystemVisitor::visit
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VisitState {
    finished: bool,
}

impl VisitState {
    /// Creates an unfinished state.
    #[must_use]
    pub const fn new() -> Self {
        Self { finished: false }
    }

    /// Reports whether the traversal was asked to stop or has ended.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Marks the traversal finished. Idempotent.
    pub fn finish(&mut self) {
        self.finished = true;
    }
}

/// Counters describing the progress of one traversal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VisitStats {
    /// Files that reached the `FileFound` stage.
    pub files_found: usize,
    /// Directories that reached the `DirectoryFound` stage.
    pub directories_found: usize,
    /// Files rejected by the filter gate.
    pub files_rejected: usize,
    /// Directories rejected by the filter gate, each pruning its subtree.
    pub directories_rejected: usize,
    /// Paths handed to the consumer.
    pub yielded: usize,
}

impl VisitStats {
    /// Nodes that passed the filter gate.
    ///
    /// The fields are public, so inconsistent counts saturate at zero.
    #[must_use]
    pub const fn accepted(&self) -> usize {
        let found = self.files_found.saturating_add(self.directories_found);
        let rejected = self.files_rejected.saturating_add(self.directories_rejected);
        found.saturating_sub(rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_is_monotonic() {
        let mut state = VisitState::new();
        assert!(!state.is_finished());
        state.finish();
        state.finish();
        assert!(state.is_finished());
    }

    #[test]
    fn accepted_subtracts_rejections() {
        let stats = VisitStats {
            files_found: 5,
            directories_found: 3,
            files_rejected: 2,
            directories_rejected: 1,
            yielded: 5,
        };
        assert_eq!(stats.accepted(), 5);
    }

    #[test]
    fn accepted_saturates_when_rejections_exceed_finds() {
        let stats = VisitStats {
            files_found: 1,
            directories_rejected: 4,
            ..VisitStats::default()
        };
        assert_eq!(stats.accepted(), 0);
    }
}
