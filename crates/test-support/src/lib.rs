#![deny(unsafe_code)]

//! Shared test doubles for the visitor workspace.
//!
//! - [`MemoryReader`] is an in-memory [`DirectoryReader`] that records every
//!   query it answers and can be told to fail specific listings.
//! - [`EventLog`] subscribes to every visitor channel and records the firing
//!   sequence, including the path carried by node notifications.
//! - [`TempTree`] materialises a small directory tree on disk for tests that
//!   exercise the live filesystem adapter.

mod events;
mod memory;
mod tree;

pub use self::events::{EventLog, Recorded};
pub use self::memory::{MemoryReader, Query};
pub use self::tree::TempTree;

#[doc(no_inline)]
pub use visit::DirectoryReader;
