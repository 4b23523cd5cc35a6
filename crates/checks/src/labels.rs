//! Label-exclusion check.
//!
//! Fails when any label on the pull request matches the forbidden pattern.
//! Every offending label is reported, not just the first.

use policy::{
    CheckName, PolicyPattern, PolicyResult, ProjectGateway, PullRequestContext, RepoRef,
};
use tracing::{debug, instrument, warn};

#[instrument(
    name = "check.labels",
    skip_all,
    fields(pattern = %pattern.as_str(), issue = %pr.issue_number)
)]
pub async fn check_label_exclusion<G>(
    gateway: &G,
    pattern: &PolicyPattern,
    repo: &RepoRef,
    pr: &PullRequestContext,
) -> PolicyResult
where
    G: ProjectGateway + ?Sized,
{
    let labels = match gateway.list_labels(repo, pr.issue_number).await {
        Ok(labels) => labels,
        Err(e) => {
            warn!(
                error = %e,
                transport = e.is_transport(),
                "Failed to list labels; continuing with none"
            );
            Vec::new()
        }
    };
    debug!(
        labels = ?labels.iter().map(|l| l.name.as_str()).collect::<Vec<_>>(),
        "Fetched labels"
    );

    let forbidden = pattern.select(labels.iter().map(|l| l.name.as_str()));
    if forbidden.is_empty() {
        return PolicyResult::pass(CheckName::LabelExclusion);
    }

    let quoted: Vec<String> = forbidden.iter().map(|name| format!("'{name}'")).collect();
    PolicyResult::fail(
        CheckName::LabelExclusion,
        format!("forbidden label(s) present: {}", quoted.join(", ")),
    )
}

#[cfg(test)]
#[path = "labels_tests.rs"]
mod tests;
