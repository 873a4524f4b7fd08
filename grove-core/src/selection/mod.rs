//! Group selection and filtering
//!
//! Resolves the user-facing scope flags into a concrete mode and
//! builds the final, deduplicated set of groups to present.
//!
//! # Overview
//!
//! Selection runs in two steps:
//! - With patterns, the working set is every group whose id or
//!   display name matches any pattern; visibility is ignored.
//! - Without patterns, the working set is the visible groups, or the
//!   whole catalog when hidden groups are requested.
//!
//! The resolved mode then keeps the installed subset, the available
//! subset, or their union. Results are deduplicated by id and
//! returned in id order, so the same catalog and criteria always
//! produce the same output.

use std::collections::HashSet;

use thiserror::Error;

use crate::catalog::Group;

mod matcher;

pub use matcher::{GlobMatcher, PatternMatcher};

/// Errors for selection input that cannot be resolved
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Both scope flags were set at once
    #[error("--available and --installed cannot be used together")]
    ConflictingScope,
}

/// Resolved selection scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Installed and available groups together
    All,
    /// Only groups that are not installed
    AvailableOnly,
    /// Only installed groups
    InstalledOnly,
}

impl Mode {
    /// Resolve the two scope flags into a mode
    ///
    /// The flags are mutually exclusive. The CLI rejects the
    /// combination at parse time, but callers constructing criteria
    /// directly get the same guarantee here.
    pub fn resolve(available: bool, installed: bool) -> Result<Self, ConfigurationError> {
        match (available, installed) {
            (true, true) => Err(ConfigurationError::ConflictingScope),
            (true, false) => Ok(Mode::AvailableOnly),
            (false, true) => Ok(Mode::InstalledOnly),
            (false, false) => Ok(Mode::All),
        }
    }
}

/// Immutable selection input, built once per invocation
#[derive(Debug, Clone)]
pub struct SelectionCriteria {
    /// Glob patterns matched against group ids and display names
    pub patterns: Vec<String>,
    /// Resolved scope
    pub mode: Mode,
    /// Include hidden groups in pattern-less listings
    pub show_hidden: bool,
}

impl SelectionCriteria {
    /// Build criteria from raw flags, validating scope exclusivity
    pub fn from_flags(
        patterns: Vec<String>,
        available: bool,
        installed: bool,
        show_hidden: bool,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            patterns,
            mode: Mode::resolve(available, installed)?,
            show_hidden,
        })
    }
}

/// Builds the set of groups matching a selection
///
/// Generic over the pattern matcher so the matching engine can be
/// swapped independently of the set-building rules.
pub struct Selector<M: PatternMatcher = GlobMatcher> {
    matcher: M,
}

impl Default for Selector<GlobMatcher> {
    fn default() -> Self {
        Self {
            matcher: GlobMatcher,
        }
    }
}

impl<M: PatternMatcher> Selector<M> {
    /// Create a selector with a custom matcher
    pub fn with_matcher(matcher: M) -> Self {
        Self { matcher }
    }

    /// Select the groups matching the criteria
    ///
    /// Pure over its inputs: no side effects, and an empty result is
    /// a valid outcome. Installed groups are never dropped from the
    /// default scope.
    pub fn select<'a>(&self, catalog: &'a [Group], criteria: &SelectionCriteria) -> Vec<&'a Group> {
        let working: Vec<&Group> = if criteria.patterns.is_empty() {
            catalog
                .iter()
                .filter(|group| criteria.show_hidden || group.user_visible)
                .collect()
        } else {
            catalog
                .iter()
                .filter(|group| self.matches_any(group, &criteria.patterns))
                .collect()
        };

        let mut seen: HashSet<&str> = HashSet::new();
        let mut result: Vec<&Group> = working
            .into_iter()
            .filter(|group| match criteria.mode {
                Mode::InstalledOnly => group.installed,
                Mode::AvailableOnly => !group.installed,
                Mode::All => true,
            })
            .filter(|group| seen.insert(group.id.as_str()))
            .collect();

        result.sort_by(|a, b| a.id.cmp(&b.id));
        result
    }

    /// Whether any pattern matches the group's id or display name
    fn matches_any(&self, group: &Group, patterns: &[String]) -> bool {
        patterns.iter().any(|pattern| {
            self.matcher.matches(pattern, &group.id) || self.matcher.matches(pattern, &group.name)
        })
    }
}
