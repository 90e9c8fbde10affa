use std::cell::RefCell;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use visit::{Event, EventHandlers, NodeEvent};

/// One firing captured by an [`EventLog`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recorded {
    /// Channel that fired.
    pub event: Event,
    /// Node path, absent for `Start` and `Finish`.
    pub path: Option<PathBuf>,
}

impl fmt::Display for Recorded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{} {}", self.event, path.display()),
            None => write!(f, "{}", self.event),
        }
    }
}

/// Shared recorder subscribed to every visitor channel.
///
/// Clones share the same buffer, so a test can keep one handle while the
/// subscribers own the others.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    entries: Rc<RefCell<Vec<Recorded>>>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes this log to all six channels of `handlers`.
    pub fn attach(&self, handlers: &mut EventHandlers) {
        let start = self.clone();
        handlers.on_start(move || start.push(Event::Start, None));
        let finish = self.clone();
        handlers.on_finish(move || finish.push(Event::Finish, None));

        for event in [
            NodeEvent::FileFound,
            NodeEvent::FilteredFileFound,
            NodeEvent::DirectoryFound,
            NodeEvent::FilteredDirectoryFound,
        ] {
            let log = self.clone();
            handlers.on(event, move |notification| {
                log.push(event.into(), Some(notification.path().to_path_buf()));
            });
        }
    }

    /// Appends an entry directly.
    pub fn push(&self, event: Event, path: Option<PathBuf>) {
        self.entries.borrow_mut().push(Recorded { event, path });
    }

    /// Snapshot of every firing so far.
    #[must_use]
    pub fn entries(&self) -> Vec<Recorded> {
        self.entries.borrow().clone()
    }

    /// Every firing rendered as `"<Event> <path>"`.
    #[must_use]
    pub fn rendered(&self) -> Vec<String> {
        self.entries.borrow().iter().map(ToString::to_string).collect()
    }

    /// Number of firings on `event`.
    #[must_use]
    pub fn count(&self, event: Event) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|entry| entry.event == event)
            .count()
    }

    /// Paths carried by firings on `event`, in order.
    #[must_use]
    pub fn paths(&self, event: Event) -> Vec<PathBuf> {
        self.entries
            .borrow()
            .iter()
            .filter(|entry| entry.event == event)
            .filter_map(|entry| entry.path.clone())
            .collect()
    }

    /// Reports whether any node firing mentions `path` or one of its
    /// descendants.
    #[must_use]
    pub fn mentions_under(&self, path: &Path) -> bool {
        self.entries
            .borrow()
            .iter()
            .filter_map(|entry| entry.path.as_deref())
            .any(|candidate| candidate.starts_with(path))
    }

    /// Empties the log.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}
