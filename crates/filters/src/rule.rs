use crate::FilterAction;
use std::fmt;

/// User-visible filter rule consisting of an action and pattern.
///
/// Pattern syntax:
///
/// - a leading `/` anchors the pattern to the traversal root;
///   otherwise it may match at any depth;
/// - a trailing `/` restricts the rule to directories;
/// - `*` and `?` never cross a `/`; `**` spans any number of directories.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FilterRule {
    pub(crate) action: FilterAction,
    pub(crate) pattern: String,
}

impl FilterRule {
    /// Creates an include rule for `pattern`.
    #[must_use]
    pub fn include(pattern: impl Into<String>) -> Self {
        Self::new(FilterAction::Include, pattern)
    }

    /// Creates an exclude rule for `pattern`.
    #[must_use]
    pub fn exclude(pattern: impl Into<String>) -> Self {
        Self::new(FilterAction::Exclude, pattern)
    }

    /// Creates a rule with an explicit action.
    #[must_use]
    pub fn new(action: FilterAction, pattern: impl Into<String>) -> Self {
        Self {
            action,
            pattern: pattern.into(),
        }
    }

    /// Returns the rule action.
    #[must_use]
    pub const fn action(&self) -> FilterAction {
        self.action
    }

    /// Returns the pattern text associated with the rule.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns whether the rule only applies to directories.
    #[must_use]
    pub fn is_directory_only(&self) -> bool {
        self.pattern.len() > 1 && self.pattern.ends_with('/')
    }

    /// Returns whether the rule is anchored to the traversal root.
    #[must_use]
    pub fn is_anchored(&self) -> bool {
        self.pattern.starts_with('/')
    }
}

impl fmt::Display for FilterRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.action, self.pattern)
    }
}
