use std::path::Path;
use std::sync::Arc;

use logging::debug_log;

use crate::{FilterError, FilterRule, compiled::CompiledRule};

/// Compiled, immutable collection of filter rules.
///
/// Rules are evaluated against paths relative to the traversal root. The
/// last rule that matches decides; a path no rule matches is included. The
/// empty relative path (the root itself) is always included.
///
/// `FilterSet` is cheaply cloneable (the compiled rules sit behind an
/// [`Arc`]), so it can be moved into a `'static` visitor filter while a copy
/// stays with the caller.
///
/// # Examples
///
/// ```
/// use filters::{FilterRule, FilterSet};
/// use std::path::Path;
///
/// let set = FilterSet::from_rules([
///     FilterRule::exclude("*.o"),
///     FilterRule::include("keep.o"),
/// ]).unwrap();
///
/// assert!(!set.allows(Path::new("main.o"), false));
/// assert!(set.allows(Path::new("keep.o"), false));
/// assert!(set.allows(Path::new("README.md"), false));
/// ```
#[derive(Clone, Debug, Default)]
pub struct FilterSet {
    rules: Arc<Vec<CompiledRule>>,
}

impl FilterSet {
    /// Compiles `rules` in iteration order.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError`] for the first rule whose pattern is empty or
    /// is not a valid glob.
    pub fn from_rules<I>(rules: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = FilterRule>,
    {
        let compiled = rules
            .into_iter()
            .map(CompiledRule::new)
            .collect::<Result<Vec<_>, _>>()?;
        debug_log!(Filter, 1, "compiled {} filter rule(s)", compiled.len());

        Ok(Self {
            rules: Arc::new(compiled),
        })
    }

    /// Returns `true` if the set contains no rules. An empty set allows
    /// every path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Number of compiled rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Iterates over the source rules in definition order.
    pub fn rules(&self) -> impl Iterator<Item = &FilterRule> {
        self.rules.iter().map(|compiled| &compiled.rule)
    }

    /// Returns the rule that decides `path`, if any.
    #[must_use]
    pub fn decisive_rule(&self, path: &Path, is_dir: bool) -> Option<&FilterRule> {
        if path.as_os_str().is_empty() {
            return None;
        }
        self.rules
            .iter()
            .rev()
            .find(|compiled| compiled.matches(path, is_dir))
            .map(|compiled| &compiled.rule)
    }

    /// Returns `true` if `path` should be visited.
    ///
    /// `is_dir` must be `true` when the path names a directory; it decides
    /// whether directory-only rules (trailing `/`) apply to the path itself.
    #[must_use]
    pub fn allows(&self, path: &Path, is_dir: bool) -> bool {
        let allowed = self
            .decisive_rule(path, is_dir)
            .is_none_or(|rule| rule.action().is_include());

        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "visit::filter",
            path = %path.display(),
            is_dir,
            allowed,
            "filter decision"
        );

        allowed
    }
}
