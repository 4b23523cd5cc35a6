//! Evaluation driver.
//!
//! The driver turns a [`PolicyConfig`] into a [`CompiledPolicy`] (compiling
//! every configured pattern up front), runs each enabled check concurrently,
//! and aggregates all outcomes into one [`EvaluationReport`].
//!
//! A run moves linearly through: configuration loaded, checks running,
//! report produced. Nothing loops back and nothing is fired and forgotten:
//! every check future is joined before the report is built.

use policy::{
    CheckName, ConfigurationError, EvaluationRunId, PolicyPattern, PolicyResult, ProjectGateway,
    ProjectScope, PullRequestContext, RepoRef, Timestamp,
};
use serde::Serialize;
use tracing::{error, info, instrument};

use crate::{check_changelog_presence, check_label_exclusion, check_project_membership};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Raw policy configuration as supplied by the host.
///
/// Each pattern is optional; an absent pattern disables its check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyConfig {
    pub project_pattern: Option<String>,
    pub label_pattern: Option<String>,
    pub changelog_pattern: Option<String>,
    pub org_level: bool,
}

impl PolicyConfig {
    /// Compiles every configured pattern.
    ///
    /// A pattern that fails to compile disables only its own check; the error
    /// is kept on the returned policy so it can be reported with the results.
    pub fn compile(&self) -> CompiledPolicy {
        let mut configuration_errors = Vec::new();
        let mut compile = |check: CheckName, pattern: &Option<String>| {
            let pattern = pattern.as_deref()?;
            match PolicyPattern::compile(check, pattern) {
                Ok(compiled) => Some(compiled),
                Err(e) => {
                    error!(check = %check, error = %e, "Invalid policy pattern; check disabled");
                    configuration_errors.push(e);
                    None
                }
            }
        };

        let membership = compile(CheckName::Membership, &self.project_pattern);
        let label_exclusion = compile(CheckName::LabelExclusion, &self.label_pattern);
        let changelog_presence = compile(CheckName::ChangelogPresence, &self.changelog_pattern);

        CompiledPolicy {
            membership,
            label_exclusion,
            changelog_presence,
            scope: ProjectScope::from_org_level(self.org_level),
            configuration_errors,
        }
    }
}

/// Validated policy ready to run.
#[derive(Debug, Clone)]
pub struct CompiledPolicy {
    membership: Option<PolicyPattern>,
    label_exclusion: Option<PolicyPattern>,
    changelog_presence: Option<PolicyPattern>,
    scope: ProjectScope,
    configuration_errors: Vec<ConfigurationError>,
}

impl CompiledPolicy {
    /// The checks that will run, in reporting order.
    pub fn enabled_checks(&self) -> Vec<CheckName> {
        [
            (CheckName::Membership, self.membership.is_some()),
            (CheckName::LabelExclusion, self.label_exclusion.is_some()),
            (CheckName::ChangelogPresence, self.changelog_presence.is_some()),
        ]
        .into_iter()
        .filter_map(|(check, enabled)| enabled.then_some(check))
        .collect()
    }

    /// Patterns that failed to compile.
    pub fn configuration_errors(&self) -> &[ConfigurationError] {
        &self.configuration_errors
    }

    pub fn scope(&self) -> ProjectScope {
        self.scope
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Aggregated outcome of one evaluation run.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub run_id: EvaluationRunId,
    pub started_at: Timestamp,
    pub finished_at: Timestamp,
    /// One entry per enabled check, in [`CheckName`] order.
    pub results: Vec<PolicyResult>,
    /// Patterns that could not be compiled; each disabled its check.
    pub configuration_errors: Vec<ConfigurationError>,
}

impl EvaluationReport {
    /// `true` when every enabled check passed and every pattern compiled.
    pub fn passed(&self) -> bool {
        self.configuration_errors.is_empty() && self.results.iter().all(|r| r.passed)
    }

    /// The results of checks that did not pass.
    pub fn failures(&self) -> impl Iterator<Item = &PolicyResult> {
        self.results.iter().filter(|r| !r.passed)
    }

    /// One human-readable line per problem, configuration errors first.
    pub fn failure_messages(&self) -> Vec<String> {
        self.configuration_errors
            .iter()
            .map(ToString::to_string)
            .chain(self.failures().map(ToString::to_string))
            .collect()
    }

    /// Composite failure message, or `None` when the run passed.
    pub fn failure_summary(&self) -> Option<String> {
        let messages = self.failure_messages();
        if messages.is_empty() {
            return None;
        }
        Some(format!(
            "{} policy check(s) failed: {}",
            messages.len(),
            messages.join("; ")
        ))
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Runs every enabled check concurrently and aggregates the outcomes.
#[instrument(
    name = "evaluate",
    skip_all,
    fields(run_id = %run_id, repo = %repo, issue = %pr.issue_number)
)]
pub async fn evaluate<G>(
    gateway: &G,
    policy: &CompiledPolicy,
    repo: &RepoRef,
    pr: &PullRequestContext,
    run_id: EvaluationRunId,
) -> EvaluationReport
where
    G: ProjectGateway + ?Sized,
{
    let started_at = Timestamp::now();
    info!(checks = ?policy.enabled_checks(), "Running policy checks");

    let membership = async {
        match &policy.membership {
            Some(pattern) => {
                Some(check_project_membership(gateway, pattern, policy.scope, repo, pr).await)
            }
            None => None,
        }
    };
    let labels = async {
        match &policy.label_exclusion {
            Some(pattern) => Some(check_label_exclusion(gateway, pattern, repo, pr).await),
            None => None,
        }
    };
    let changelog = async {
        match &policy.changelog_presence {
            Some(pattern) => {
                Some(check_changelog_presence(gateway, pattern, repo, &pr.commit_sha).await)
            }
            None => None,
        }
    };

    let (membership, labels, changelog) = futures::join!(membership, labels, changelog);
    let results: Vec<PolicyResult> = [membership, labels, changelog]
        .into_iter()
        .flatten()
        .collect();

    for result in &results {
        if result.passed {
            info!(check = %result.check, "Check passed");
        } else {
            error!(check = %result.check, reason = ?result.reason, "Check failed");
        }
    }

    EvaluationReport {
        run_id,
        started_at,
        finished_at: Timestamp::now(),
        results,
        configuration_errors: policy.configuration_errors.clone(),
    }
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
