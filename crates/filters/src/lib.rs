#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `filters` turns ordered include/exclude glob rules into a predicate that
//! can gate a directory visitor. Rules are evaluated against paths relative
//! to the traversal root, the last matching rule wins, and paths that match
//! no rule are included.
//!
//! # Design
//!
//! - [`FilterRule`] captures the action ([`FilterAction::Include`] or
//!   [`FilterAction::Exclude`]) and the pattern text.
//! - [`FilterSet`] compiles each rule into a [`globset`] matcher. Unanchored
//!   patterns are prefixed with `**/` so they match at any depth.
//!
//! # Invariants
//!
//! - A leading `/` anchors a rule to the root.
//! - A trailing `/` restricts a rule to directories. A rule that matches a
//!   directory also covers everything beneath it.
//! - `*` and `?` never match `/`.
//!
//! # Errors
//!
//! [`FilterSet::from_rules`] reports [`FilterError`] when a rule is empty or
//! expands to an invalid glob expression.
//!
//! # Examples
//!
//! ```
//! use filters::{FilterRule, FilterSet};
//! use std::path::Path;
//!
//! let rules = [
//!     FilterRule::exclude("*.swp"),
//!     FilterRule::exclude("target/"),
//!     FilterRule::include("target/doc/"),
//! ];
//! let filters = FilterSet::from_rules(rules).expect("filters compile");
//!
//! assert!(filters.allows(Path::new("notes.txt"), false));
//! assert!(!filters.allows(Path::new("scratch.swp"), false));
//! assert!(!filters.allows(Path::new("target"), true));
//! assert!(filters.allows(Path::new("target/doc/index.html"), false));
//! ```

mod action;
mod compiled;
mod error;
mod rule;
mod set;

pub use action::FilterAction;
pub use error::FilterError;
pub use rule::FilterRule;
pub use set::FilterSet;

#[cfg(test)]
mod tests;
