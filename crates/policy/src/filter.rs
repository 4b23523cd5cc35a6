//! Regex policy filter.
//!
//! A [`PolicyPattern`] is compiled once, when the run configuration is loaded,
//! and then applied to project titles, label names, or changed filenames. A
//! pattern that does not compile never produces a `PolicyPattern`; the caller
//! receives a [`ConfigurationError`] instead.

use regex::Regex;

use crate::{CheckName, ConfigurationError};

/// A compiled, validated pattern owned by one check.
#[derive(Debug, Clone)]
pub struct PolicyPattern {
    check: CheckName,
    regex: Regex,
}

impl PolicyPattern {
    /// Compiles `pattern` for `check`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when the regex compiler rejects the
    /// pattern (unbalanced brackets, bad escapes, oversized programs, ...).
    pub fn compile(check: CheckName, pattern: &str) -> Result<Self, ConfigurationError> {
        Regex::new(pattern)
            .map(|regex| Self { check, regex })
            .map_err(|e| ConfigurationError {
                check,
                pattern: pattern.to_string(),
                message: e.to_string(),
            })
    }

    /// Returns `true` if `candidate` contains a match for this pattern.
    ///
    /// Matching is unanchored; use `^`/`$` in the pattern to anchor it.
    pub fn matches(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }

    /// Returns the candidates that match, preserving their order.
    pub fn select<'a, I>(&self, candidates: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        candidates.into_iter().filter(|c| self.matches(c)).collect()
    }

    /// The check this pattern belongs to.
    pub fn check(&self) -> CheckName {
        self.check
    }

    /// The pattern source as configured.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// One-shot form of [`PolicyPattern::matches`].
///
/// # Errors
///
/// Returns [`ConfigurationError`] when `pattern` does not compile.
pub fn matches(
    check: CheckName,
    pattern: &str,
    candidate: &str,
) -> Result<bool, ConfigurationError> {
    Ok(PolicyPattern::compile(check, pattern)?.matches(candidate))
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
