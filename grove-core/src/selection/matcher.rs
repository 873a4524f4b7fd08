//! Glob-style pattern matching for group selection

use glob::{MatchOptions, Pattern};

// Globs are case-insensitive and treat ids as flat names, not paths
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// A pluggable pattern matching engine
///
/// The selector only needs a yes/no answer per pattern and text, so
/// the matching strategy can be swapped without touching the
/// set-building rules.
pub trait PatternMatcher {
    /// Whether `pattern` matches `text`
    fn matches(&self, pattern: &str, text: &str) -> bool;
}

/// Case-insensitive glob matching (`*`, `?`, `[seq]`)
#[derive(Debug, Default, Clone, Copy)]
pub struct GlobMatcher;

impl PatternMatcher for GlobMatcher {
    fn matches(&self, pattern: &str, text: &str) -> bool {
        match Pattern::new(pattern) {
            Ok(compiled) => compiled.matches_with(text, MATCH_OPTIONS),
            // A malformed glob selects only its literal spelling
            Err(_) => pattern.to_lowercase() == text.to_lowercase(),
        }
    }
}
