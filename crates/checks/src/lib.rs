//! Themis policy checks and evaluation driver.
//!
//! This crate provides the three policy checks (project membership, label
//! exclusion, changelog presence) and the driver that runs whichever of them
//! are enabled and aggregates their outcomes into one report.
//!
//! ## Architectural Layer
//!
//! **Orchestration layer.** Checks sequence calls between the regex filter in
//! the [`policy`] crate and the [`policy::ProjectGateway`] port. They hold no
//! state between runs and never touch the network directly.
//!
//! ## Failure handling
//!
//! Gateway errors are logged and replaced by empty data, so a check whose
//! data cannot be fetched fails closed instead of aborting the run.

pub mod changelog;
pub mod driver;
pub mod labels;
pub mod membership;

pub use changelog::check_changelog_presence;
pub use driver::{evaluate, CompiledPolicy, EvaluationReport, PolicyConfig};
pub use labels::check_label_exclusion;
pub use membership::check_project_membership;

#[cfg(test)]
mod test_support;
