use crate::error::VisitError;
use crate::events::{EventHandlers, NodeEvent};
use crate::notification::{NodeKind, VisitNotification};
use crate::state::{VisitState, VisitStats};
use logging::{debug_log, info_log};
use std::path::{Path, PathBuf};

/// Predicate deciding whether a node (and, for directories, its subtree) is
/// included. A visitor without a filter accepts every node.
pub type PathFilter = dyn Fn(&Path) -> bool;

/// Runs the per-node notification sequence:
/// found event, filter gate, filtered-found event.
pub(crate) struct NodePipeline<'v> {
    filter: Option<&'v PathFilter>,
    handlers: &'v mut EventHandlers,
}

impl<'v> NodePipeline<'v> {
    pub(crate) fn new(filter: Option<&'v PathFilter>, handlers: &'v mut EventHandlers) -> Self {
        Self { filter, handlers }
    }

    pub(crate) fn handlers(&mut self) -> &mut EventHandlers {
        self.handlers
    }

    /// Dispatches one node. Returns the path when the node passed the filter
    /// gate and should be yielded.
    ///
    /// A stop request marks `state` finished but never cuts the node short:
    /// an accepted node still fires its filtered-found event and is returned.
    pub(crate) fn run(
        &mut self,
        path: PathBuf,
        kind: NodeKind,
        state: &mut VisitState,
        stats: &mut VisitStats,
    ) -> Result<Option<PathBuf>, VisitError> {
        match kind {
            NodeKind::File => stats.files_found += 1,
            NodeKind::Directory => stats.directories_found += 1,
        }

        let mut notification = VisitNotification::new(path, kind);

        self.handlers
            .fire(NodeEvent::found(kind), &mut notification)?;
        observe_stop(&notification, state);

        if !self.admits(notification.path()) {
            match kind {
                NodeKind::File => stats.files_rejected += 1,
                NodeKind::Directory => stats.directories_rejected += 1,
            }
            info_log!(Skip, 1, "skipping {kind} {:?}", notification.path());
            return Ok(None);
        }

        self.handlers
            .fire(NodeEvent::filtered(kind), &mut notification)?;
        observe_stop(&notification, state);

        Ok(Some(notification.into_path()))
    }

    fn admits(&self, path: &Path) -> bool {
        let Some(filter) = self.filter else {
            return true;
        };
        let accepted = filter(path);
        debug_log!(
            Filter,
            2,
            "{} {:?}",
            if accepted { "accepted" } else { "rejected" },
            path
        );
        accepted
    }
}

fn observe_stop(notification: &VisitNotification, state: &mut VisitState) {
    if notification.stop_requested() && !state.is_finished() {
        info_log!(Visit, 1, "stop requested at {:?}", notification.path());
        state.finish();
    }
}
