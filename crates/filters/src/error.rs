/// Error produced when a rule cannot be compiled into a matcher.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// The rule had no pattern text.
    #[error("{action} rule has an empty pattern")]
    EmptyPattern {
        /// Action of the offending rule.
        action: crate::FilterAction,
    },
    /// The pattern is not a valid glob.
    #[error("failed to compile filter pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern, as supplied.
        pattern: String,
        /// Error reported by the glob compiler.
        #[source]
        source: globset::Error,
    },
}

impl FilterError {
    /// Returns the offending pattern, if the error concerns one.
    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        match self {
            Self::EmptyPattern { .. } => None,
            Self::InvalidPattern { pattern, .. } => Some(pattern),
        }
    }
}
