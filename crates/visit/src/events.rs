use crate::error::{SubscriberError, VisitError};
use crate::notification::{NodeKind, VisitNotification};
use logging::debug_log;
use std::fmt;

/// Every channel a visitor fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Fired once when a traversal begins, before any reader query.
    Start,
    /// Fired once when a traversal ends by exhaustion or cancellation.
    Finish,
    /// A file was encountered, before the filter gate.
    FileFound,
    /// A file passed the filter gate.
    FilteredFileFound,
    /// A directory was encountered, before the filter gate.
    DirectoryFound,
    /// A directory passed the filter gate.
    FilteredDirectoryFound,
}

impl Event {
    /// All channels in firing-table order.
    pub const ALL: [Self; 6] = [
        Self::Start,
        Self::Finish,
        Self::FileFound,
        Self::FilteredFileFound,
        Self::DirectoryFound,
        Self::FilteredDirectoryFound,
    ];

    /// Channel name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Start => "Start",
            Self::Finish => "Finish",
            Self::FileFound => "FileFound",
            Self::FilteredFileFound => "FilteredFileFound",
            Self::DirectoryFound => "DirectoryFound",
            Self::FilteredDirectoryFound => "FilteredDirectoryFound",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Channels that carry a [`VisitNotification`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeEvent {
    /// See [`Event::FileFound`].
    FileFound,
    /// See [`Event::FilteredFileFound`].
    FilteredFileFound,
    /// See [`Event::DirectoryFound`].
    DirectoryFound,
    /// See [`Event::FilteredDirectoryFound`].
    FilteredDirectoryFound,
}

impl NodeEvent {
    /// The pre-filter channel for a node kind.
    #[must_use]
    pub const fn found(kind: NodeKind) -> Self {
        match kind {
            NodeKind::File => Self::FileFound,
            NodeKind::Directory => Self::DirectoryFound,
        }
    }

    /// The post-filter channel for a node kind.
    #[must_use]
    pub const fn filtered(kind: NodeKind) -> Self {
        match kind {
            NodeKind::File => Self::FilteredFileFound,
            NodeKind::Directory => Self::FilteredDirectoryFound,
        }
    }

    const fn slot(self) -> usize {
        match self {
            Self::FileFound => 0,
            Self::FilteredFileFound => 1,
            Self::DirectoryFound => 2,
            Self::FilteredDirectoryFound => 3,
        }
    }
}

impl From<NodeEvent> for Event {
    fn from(event: NodeEvent) -> Self {
        match event {
            NodeEvent::FileFound => Self::FileFound,
            NodeEvent::FilteredFileFound => Self::FilteredFileFound,
            NodeEvent::DirectoryFound => Self::DirectoryFound,
            NodeEvent::FilteredDirectoryFound => Self::FilteredDirectoryFound,
        }
    }
}

type PhaseHandler = Box<dyn FnMut() -> Result<(), SubscriberError>>;
type NodeHandler = Box<dyn FnMut(&mut VisitNotification) -> Result<(), SubscriberError>>;

/// Ordered subscriber lists for every [`Event`] channel.
///
/// Subscribers run synchronously, in subscription order, on the thread that
/// pulls the traversal. The first subscriber returning an error aborts the
/// firing; later subscribers on the same channel are not invoked and the
/// error ends the traversal.
#[derive(Default)]
pub struct EventHandlers {
    start: Vec<PhaseHandler>,
    finish: Vec<PhaseHandler>,
    nodes: [Vec<NodeHandler>; 4],
}

impl EventHandlers {
    /// Creates an empty handler table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to [`Event::Start`].
    pub fn on_start<F>(&mut self, mut handler: F)
    where
        F: FnMut() + 'static,
    {
        self.try_on_start(move || {
            handler();
            Ok(())
        });
    }

    /// Subscribes a fallible handler to [`Event::Start`].
    pub fn try_on_start<F>(&mut self, handler: F)
    where
        F: FnMut() -> Result<(), SubscriberError> + 'static,
    {
        self.start.push(Box::new(handler));
    }

    /// Subscribes to [`Event::Finish`].
    pub fn on_finish<F>(&mut self, mut handler: F)
    where
        F: FnMut() + 'static,
    {
        self.try_on_finish(move || {
            handler();
            Ok(())
        });
    }

    /// Subscribes a fallible handler to [`Event::Finish`].
    pub fn try_on_finish<F>(&mut self, handler: F)
    where
        F: FnMut() -> Result<(), SubscriberError> + 'static,
    {
        self.finish.push(Box::new(handler));
    }

    /// Subscribes to a node channel.
    pub fn on<F>(&mut self, event: NodeEvent, mut handler: F)
    where
        F: FnMut(&mut VisitNotification) + 'static,
    {
        self.try_on(event, move |notification| {
            handler(notification);
            Ok(())
        });
    }

    /// Subscribes a fallible handler to a node channel.
    pub fn try_on<F>(&mut self, event: NodeEvent, handler: F)
    where
        F: FnMut(&mut VisitNotification) -> Result<(), SubscriberError> + 'static,
    {
        self.nodes[event.slot()].push(Box::new(handler));
    }

    /// Number of subscribers registered on a channel.
    #[must_use]
    pub fn subscriber_count(&self, event: Event) -> usize {
        match event {
            Event::Start => self.start.len(),
            Event::Finish => self.finish.len(),
            Event::FileFound => self.nodes[NodeEvent::FileFound.slot()].len(),
            Event::FilteredFileFound => self.nodes[NodeEvent::FilteredFileFound.slot()].len(),
            Event::DirectoryFound => self.nodes[NodeEvent::DirectoryFound.slot()].len(),
            Event::FilteredDirectoryFound => {
                self.nodes[NodeEvent::FilteredDirectoryFound.slot()].len()
            }
        }
    }

    /// Removes every subscriber from every channel.
    pub fn clear(&mut self) {
        self.start.clear();
        self.finish.clear();
        for handlers in &mut self.nodes {
            handlers.clear();
        }
    }

    pub(crate) fn fire_start(&mut self) -> Result<(), VisitError> {
        Self::fire_phase(Event::Start, &mut self.start)
    }

    pub(crate) fn fire_finish(&mut self) -> Result<(), VisitError> {
        Self::fire_phase(Event::Finish, &mut self.finish)
    }

    fn fire_phase(event: Event, handlers: &mut [PhaseHandler]) -> Result<(), VisitError> {
        debug_log!(Event, 2, "{event} -> {} subscriber(s)", handlers.len());
        for handler in handlers {
            handler().map_err(|source| VisitError::subscriber(event, None, source))?;
        }
        Ok(())
    }

    pub(crate) fn fire(
        &mut self,
        event: NodeEvent,
        notification: &mut VisitNotification,
    ) -> Result<(), VisitError> {
        let handlers = &mut self.nodes[event.slot()];
        debug_log!(
            Event,
            3,
            "{} -> {} subscriber(s) for {:?}",
            Event::from(event),
            handlers.len(),
            notification.path()
        );
        for handler in handlers {
            handler(&mut *notification).map_err(|source| {
                VisitError::subscriber(
                    event.into(),
                    Some(notification.path().to_path_buf()),
                    source,
                )
            })?;
        }
        Ok(())
    }
}

impl fmt::Debug for EventHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("EventHandlers");
        for event in Event::ALL {
            debug.field(event.name(), &self.subscriber_count(event));
        }
        debug.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    fn notification(path: &str) -> VisitNotification {
        VisitNotification::new(PathBuf::from(path), NodeKind::File)
    }

    #[test]
    fn subscribers_run_in_subscription_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut handlers = EventHandlers::new();
        for id in 0..3 {
            let order = Rc::clone(&order);
            handlers.on(NodeEvent::FileFound, move |_| order.borrow_mut().push(id));
        }

        handlers
            .fire(NodeEvent::FileFound, &mut notification("f"))
            .expect("fire");
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn later_subscriber_sees_earlier_mutation() {
        let seen = Rc::new(RefCell::new(None));
        let mut handlers = EventHandlers::new();
        handlers.on(NodeEvent::DirectoryFound, VisitNotification::request_stop);
        let observer = Rc::clone(&seen);
        handlers.on(NodeEvent::DirectoryFound, move |n| {
            *observer.borrow_mut() = Some(n.stop_requested());
        });

        let mut payload = notification("d");
        handlers
            .fire(NodeEvent::DirectoryFound, &mut payload)
            .expect("fire");
        assert_eq!(*seen.borrow(), Some(true));
        assert!(payload.stop_requested());
    }

    #[test]
    fn failing_subscriber_short_circuits_channel() {
        let reached = Rc::new(RefCell::new(false));
        let mut handlers = EventHandlers::new();
        handlers.try_on(NodeEvent::FileFound, |_| Err("denied".into()));
        let flag = Rc::clone(&reached);
        handlers.on(NodeEvent::FileFound, move |_| *flag.borrow_mut() = true);

        let error = handlers
            .fire(NodeEvent::FileFound, &mut notification("top/f0"))
            .expect_err("subscriber failure");
        assert_eq!(
            error.to_string(),
            "FileFound subscriber failed for 'top/f0': denied"
        );
        assert!(!*reached.borrow());
    }

    #[test]
    fn channels_are_independent() {
        let mut handlers = EventHandlers::new();
        handlers.on_start(|| {});
        handlers.on_finish(|| {});
        handlers.on_finish(|| {});
        handlers.on(NodeEvent::FilteredFileFound, |_| {});

        assert_eq!(handlers.subscriber_count(Event::Start), 1);
        assert_eq!(handlers.subscriber_count(Event::Finish), 2);
        assert_eq!(handlers.subscriber_count(Event::FilteredFileFound), 1);
        assert_eq!(handlers.subscriber_count(Event::FileFound), 0);

        handlers.clear();
        for event in Event::ALL {
            assert_eq!(handlers.subscriber_count(event), 0);
        }
    }

    #[test]
    fn phase_failure_has_no_path() {
        let mut handlers = EventHandlers::new();
        handlers.try_on_start(|| Err("no".into()));
        let error = handlers.fire_start().expect_err("start failure");
        assert!(error.path().is_none());
        assert!(handlers.fire_finish().is_ok());
    }

    #[test]
    fn node_event_helpers_pick_channel_by_kind() {
        assert_eq!(NodeEvent::found(NodeKind::File), NodeEvent::FileFound);
        assert_eq!(
            NodeEvent::filtered(NodeKind::Directory),
            NodeEvent::FilteredDirectoryFound
        );
        assert_eq!(Event::from(NodeEvent::DirectoryFound), Event::DirectoryFound);
    }
}
