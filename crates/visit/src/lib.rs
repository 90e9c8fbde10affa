#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `visit` provides a lazy, cancellable, event-instrumented traversal of a
//! directory tree. A [`FileSystemVisitor`] yields accepted paths in pre-order,
//! one per pull, and publishes lifecycle and per-node notifications to
//! subscribers registered ahead of time. Subscribers can ask the traversal to
//! stop; an optional filter predicate prunes whole subtrees.
//!
//! # Design
//!
//! - [`DirectoryReader`] abstracts the four filesystem queries the traversal
//!   needs. [`FsDirectoryReader`] answers them from the live filesystem with
//!   listings sorted by name; tests substitute in-memory readers.
//! - [`EventHandlers`] keeps one ordered subscriber list per [`Event`]
//!   channel. Node channels receive a shared, mutable [`VisitNotification`]
//!   so a later subscriber observes a stop request raised by an earlier one.
//! - [`Visit`] implements [`Iterator`]. Each call to `next` advances an
//!   explicit depth-first frontier just far enough to produce one path, so the
//!   reader is never queried for work the consumer has not demanded.
//! - [`VisitBuilder`] configures the root, reader, and filter.
//!
//! # Invariants
//!
//! - `Start` fires on the first pull, before any reader query. `Finish` fires
//!   at most once per traversal, after the last yielded path.
//! - Directories yield before their subdirectories, subdirectories before the
//!   directory's own files.
//! - The filter runs once per node. A rejected directory fires no events for
//!   anything beneath it and its contents are never listed.
//! - Once a subscriber requests a stop, the traversal yields at most the node
//!   currently being dispatched and then finishes.
//! - Every call to [`FileSystemVisitor::visit`] starts with a fresh
//!   [`VisitState`]; cancellation never leaks between traversals.
//!
//! # Errors
//!
//! Construction fails with [`VisitErrorKind::EmptyRoot`] for an empty root
//! path. During traversal, a reader failure or a subscriber error is yielded
//! once as [`VisitError`]; the iterator then ends without firing `Finish`.
//!
//! # Examples
//!
//! Stop after the first file is found.
//!
//! ```
//! use visit::FileSystemVisitor;
//! use std::fs;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let root = temp.path().join("top");
//! fs::create_dir_all(root.join("nested"))?;
//! fs::write(root.join("a.txt"), b"data")?;
//! fs::write(root.join("b.txt"), b"data")?;
//!
//! let mut visitor = FileSystemVisitor::new(&root)?;
//! visitor.on_filtered_file_found(|notification| notification.request_stop());
//!
//! let paths = visitor.collect_paths()?;
//! assert_eq!(paths, vec![root.clone(), root.join("nested"), root.join("a.txt")]);
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod builder;
mod error;
mod events;
mod notification;
mod pipeline;
mod reader;
mod state;
mod traversal;
mod visitor;

pub use crate::builder::VisitBuilder;
pub use crate::error::{SubscriberError, VisitError, VisitErrorKind};
pub use crate::events::{Event, EventHandlers, NodeEvent};
pub use crate::notification::{NodeKind, VisitNotification};
pub use crate::pipeline::PathFilter;
pub use crate::reader::{DirectoryReader, FsDirectoryReader};
pub use crate::state::{VisitState, VisitStats};
pub use crate::traversal::Visit;
pub use crate::visitor::FileSystemVisitor;
