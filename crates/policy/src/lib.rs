//! Core policy domain for Themis.
//!
//! This crate contains every domain concept, newtype identifier, value type,
//! and error type used by the pull-request gatekeeper, together with the
//! regex policy filter and the [`ProjectGateway`] port. Infrastructure crates
//! implement the trait defined here; they never add policy rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* data is needed; infrastructure crates define *how* to
//! fetch it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`IssueNumber`, `ProjectId`, `RepoRef`, etc.) |
//! | [`types`] | Value types (`ProjectSummary`, `CardRef`, `PolicyResult`, etc.) |
//! | [`filter`] | Compiled regex patterns applied to titles, labels, filenames |
//! | [`gateway`] | The `ProjectGateway` port trait |
//! | [`errors`] | Configuration, gateway, and run-level error types |

pub mod errors;
pub mod filter;
pub mod gateway;
pub mod identifiers;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::{ConfigurationError, GatewayError, ThemisError};
pub use filter::PolicyPattern;
pub use gateway::ProjectGateway;
pub use identifiers::{CommitSha, EvaluationRunId, IssueNumber, ProjectId, RepoRef};
pub use types::{
    CardRef, ChangedFile, CheckName, Label, PolicyResult, ProjectScope, ProjectSummary,
    PullRequestContext, Timestamp,
};
