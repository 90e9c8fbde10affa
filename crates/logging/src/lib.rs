#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` provides the verbosity flag system shared by the fs-visit
//! workspace. Diagnostics are grouped into info categories ([`InfoFlag`]) for
//! user-facing output and debug categories ([`DebugFlag`]) for internal
//! tracing of the traversal engine. Each category carries an independent level
//! so callers can enable, for example, `walk2` without drowning in event
//! dispatch noise.
//!
//! # Design
//!
//! - [`VerbosityConfig`] stores per-flag levels and understands `-v` counts as
//!   well as `name[N]` tokens.
//! - Configuration and collected [`DiagnosticEvent`]s live in thread-local
//!   storage. Traversals are single-threaded, so the producer and the drain run
//!   on the same thread.
//! - [`debug_log!`] and [`info_log!`] check the level before formatting.
//! - With the `tracing` feature, `VisitLayer` forwards `tracing` events whose
//!   target starts with `visit::` into the same buffer.
//!
//! # Examples
//!
//! ```
//! use logging::{info_log, drain_events, init, VerbosityConfig};
//!
//! init(VerbosityConfig::from_verbose_level(1));
//! info_log!(Visit, 1, "traversal of {} started", "top");
//!
//! let events = drain_events();
//! assert_eq!(events[0].render(), "[info:visit1] traversal of top started");
//! ```

mod config;
mod levels;
mod macros;
mod thread_local;
#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use config::VerbosityConfig;
pub use levels::{DebugFlag, DebugLevels, InfoFlag, InfoLevels};
pub use thread_local::{
    DiagnosticEvent, apply_debug_flag, apply_info_flag, debug_gte, drain_events, emit_debug,
    emit_info, info_gte, init,
};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{TARGET_PREFIX, VisitLayer, init_tracing, init_tracing_with_filter};
