//! Content-URL decoding for project cards that lack a structured number.
//!
//! Classic project cards only exposed a `content_url` such as
//! `https://api.github.com/repos/o/r/issues/17`. The number is recovered by
//! removing the issues collection prefix (the repository's `issues_url`
//! template minus its `{/number}` suffix) and parsing what remains.
//!
//! Only used when an item's content carries a URL but no number.

use policy::IssueNumber;
use thiserror::Error;

const NUMBER_TEMPLATE_SUFFIX: &str = "{/number}";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentUrlError {
    #[error("content URL '{url}' is not under issues collection '{base}'")]
    ForeignUrl { url: String, base: String },

    #[error("content URL '{url}' does not end in an issue number")]
    NotANumber { url: String },
}

/// Derives the issue number from a card's content URL.
///
/// # Errors
///
/// [`ContentUrlError::ForeignUrl`] when `content_url` does not start with the
/// issues collection derived from `issues_url_template`, and
/// [`ContentUrlError::NotANumber`] when the remaining segment is not a
/// positive integer.
pub fn issue_number_from_content_url(
    content_url: &str,
    issues_url_template: &str,
) -> Result<IssueNumber, ContentUrlError> {
    let base = issues_url_template
        .strip_suffix(NUMBER_TEMPLATE_SUFFIX)
        .unwrap_or(issues_url_template)
        .trim_end_matches('/');

    let remainder = content_url
        .strip_prefix(base)
        .and_then(|rest| rest.strip_prefix('/'))
        .ok_or_else(|| ContentUrlError::ForeignUrl {
            url: content_url.to_string(),
            base: base.to_string(),
        })?;

    remainder
        .trim_end_matches('/')
        .parse::<u64>()
        .ok()
        .filter(|n| *n > 0)
        .map(IssueNumber::new)
        .ok_or_else(|| ContentUrlError::NotANumber {
            url: content_url.to_string(),
        })
}

#[cfg(test)]
#[path = "legacy_tests.rs"]
mod tests;
