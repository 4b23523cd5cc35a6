//! Shared value types for the Themis policy domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! the data that flows through a single evaluation: what the gateway fetched
//! and what each check decided. All of them are created fresh per run and
//! discarded when the run ends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CommitSha, IssueNumber, ProjectId};

// ---------------------------------------------------------------------------
// Run context
// ---------------------------------------------------------------------------

/// Which owner's project boards the membership check searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectScope {
    /// Projects attached to the repository itself.
    Repository,
    /// Projects owned by the organization that owns the repository.
    Organization,
}

impl ProjectScope {
    /// Selects the scope from the `org-level` switch.
    pub fn from_org_level(org_level: bool) -> Self {
        if org_level {
            Self::Organization
        } else {
            Self::Repository
        }
    }
}

impl std::fmt::Display for ProjectScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repository => f.write_str("repository"),
            Self::Organization => f.write_str("organization"),
        }
    }
}

// ---------------------------------------------------------------------------

/// Identifies the event that triggered the evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestContext {
    /// Number of the pull request (shared with the issue number space).
    pub issue_number: IssueNumber,

    /// Commit whose changed files are inspected by the changelog check.
    pub commit_sha: CommitSha,

    /// Issues collection URL template, e.g.
    /// `https://api.github.com/repos/o/r/issues{/number}`.
    ///
    /// `None` when the host did not supply one; only the legacy content-URL
    /// decoder needs it.
    pub issues_base_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Remote data
// ---------------------------------------------------------------------------

/// One project board returned by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: ProjectId,
    pub title: String,
}

/// One item on a project board.
///
/// `linked_issue_number` is `None` for draft items and for items whose
/// content is not an issue or pull request; such cards never take part in a
/// membership decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRef {
    pub project_id: ProjectId,
    pub linked_issue_number: Option<IssueNumber>,
}

/// A label attached to an issue or pull request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
}

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A file touched by a commit, as a path relative to the repository root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangedFile {
    pub filename: String,
}

impl ChangedFile {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Check outcomes
// ---------------------------------------------------------------------------

/// The three independently enabled policy checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckName {
    /// The pull request must sit on a project board whose title matches.
    Membership,
    /// No label on the pull request may match the forbidden pattern.
    LabelExclusion,
    /// At least one file in the commit must match the changelog pattern.
    ChangelogPresence,
}

impl std::fmt::Display for CheckName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Membership => f.write_str("project-membership"),
            Self::LabelExclusion => f.write_str("label-exclusion"),
            Self::ChangelogPresence => f.write_str("changelog-presence"),
        }
    }
}

// ---------------------------------------------------------------------------

/// The decision produced by one enabled check.
///
/// `reason` is always `Some` when `passed` is `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyResult {
    pub check: CheckName,
    pub passed: bool,
    pub reason: Option<String>,
}

impl PolicyResult {
    /// A passing result.
    pub fn pass(check: CheckName) -> Self {
        Self {
            check,
            passed: true,
            reason: None,
        }
    }

    /// A policy violation with a human-readable reason.
    pub fn fail(check: CheckName, reason: impl Into<String>) -> Self {
        Self {
            check,
            passed: false,
            reason: Some(reason.into()),
        }
    }
}

impl std::fmt::Display for PolicyResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.passed, &self.reason) {
            (true, _) => write!(f, "{}: passed", self.check),
            (false, Some(reason)) => write!(f, "{}: {}", self.check, reason),
            (false, None) => write!(f, "{}: failed", self.check),
        }
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
