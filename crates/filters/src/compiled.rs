use crate::{FilterError, FilterRule};
use globset::{GlobBuilder, GlobMatcher};
use std::path::Path;

/// A [`FilterRule`] paired with its glob matcher.
#[derive(Clone, Debug)]
pub(crate) struct CompiledRule {
    pub(crate) rule: FilterRule,
    matcher: GlobMatcher,
    directory_only: bool,
}

impl CompiledRule {
    pub(crate) fn new(rule: FilterRule) -> Result<Self, FilterError> {
        let directory_only = rule.is_directory_only();
        let anchored = rule.is_anchored();
        let body = rule.pattern.trim_end_matches('/').trim_start_matches('/');
        if body.is_empty() {
            return Err(FilterError::EmptyPattern {
                action: rule.action,
            });
        }

        // `**/` also matches zero leading directories.
        let glob = if anchored {
            body.to_owned()
        } else {
            format!("**/{body}")
        };
        let matcher = GlobBuilder::new(&glob)
            .literal_separator(true)
            .backslash_escape(true)
            .build()
            .map_err(|source| FilterError::InvalidPattern {
                pattern: rule.pattern.clone(),
                source,
            })?
            .compile_matcher();

        Ok(Self {
            rule,
            matcher,
            directory_only,
        })
    }

    /// Reports whether the rule covers `path`, either directly or through one
    /// of its ancestor directories.
    pub(crate) fn matches(&self, path: &Path, is_dir: bool) -> bool {
        if (is_dir || !self.directory_only) && self.matcher.is_match(path) {
            return true;
        }
        path.ancestors()
            .skip(1)
            .filter(|ancestor| !ancestor.as_os_str().is_empty())
            .any(|ancestor| self.matcher.is_match(ancestor))
    }
}
