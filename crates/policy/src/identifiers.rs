//! Newtype domain identifiers.
//!
//! Every domain concept that has an identity is represented as a distinct newtype
//! wrapping a primitive. This prevents accidentally interchanging, for example,
//! a [`ProjectId`] with a [`CommitSha`] even though both are strings under the
//! hood.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers, GitHub-integer-backed
// ---------------------------------------------------------------------------

/// The number of the issue or pull request under evaluation.
///
/// Pull requests share the issue number space, so the same value identifies
/// the pull request itself, its labels, and any project item linked to it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct IssueNumber(u64);

impl IssueNumber {
    /// Creates a new issue number from a raw integer.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying integer value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers, UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies a single evaluation run (one invocation of the gatekeeper).
///
/// Generated fresh for every CLI invocation; recorded on the root span so all
/// activity from a single run can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EvaluationRunId(Uuid);

impl EvaluationRunId {
    /// Generates a new random run identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying [`Uuid`].
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for EvaluationRunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers, String-backed
// ---------------------------------------------------------------------------

string_id! {
    /// A Git commit SHA (40-character lowercase hex string).
    CommitSha
}

string_id! {
    /// Opaque node identifier of a project board, as issued by the remote API.
    ///
    /// Never parsed; only handed back to the gateway to traverse the project's
    /// items.
    ProjectId
}

// ---------------------------------------------------------------------------
// Repository reference
// ---------------------------------------------------------------------------

/// Identifies the repository the pull request belongs to.
///
/// Supplied once per run and never modified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    owner: String,
    name: String,
}

impl RepoRef {
    /// Creates a repository reference, returning `None` if either part is empty.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Option<Self> {
        let owner = owner.into();
        let name = name.into();
        if owner.is_empty() || name.is_empty() {
            None
        } else {
            Some(Self { owner, name })
        }
    }

    /// Parses an `"owner/name"` slug, as found in `GITHUB_REPOSITORY`.
    ///
    /// Returns `None` unless the slug has exactly two non-empty segments.
    pub fn parse_slug(slug: &str) -> Option<Self> {
        let (owner, name) = slug.trim().split_once('/')?;
        if name.contains('/') {
            return None;
        }
        Self::new(owner, name)
    }

    /// The owning user or organization login.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The repository name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
#[path = "identifiers_tests.rs"]
mod tests;
