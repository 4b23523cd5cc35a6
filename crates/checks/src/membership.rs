//! Project-membership check.
//!
//! Passes when the pull request is linked from an item on at least one project
//! board whose title matches the configured pattern. Project titles are
//! filtered before any item traversal, so non-matching boards cost nothing
//! beyond the listing call.

use futures::future::join_all;
use policy::{
    CheckName, IssueNumber, PolicyPattern, PolicyResult, ProjectGateway, ProjectScope,
    ProjectSummary, PullRequestContext, RepoRef,
};
use tracing::{debug, info, instrument, warn};

/// Evaluates the membership policy for `pr`.
///
/// Gateway failures never abort the check. A failed project listing behaves
/// like an empty listing; a failed traversal of one project contributes no
/// issue numbers while the remaining projects are still evaluated.
#[instrument(
    name = "check.membership",
    skip_all,
    fields(pattern = %pattern.as_str(), scope = %scope, issue = %pr.issue_number)
)]
pub async fn check_project_membership<G>(
    gateway: &G,
    pattern: &PolicyPattern,
    scope: ProjectScope,
    repo: &RepoRef,
    pr: &PullRequestContext,
) -> PolicyResult
where
    G: ProjectGateway + ?Sized,
{
    let projects = match gateway.list_projects(repo, scope).await {
        Ok(projects) => projects,
        Err(e) => {
            warn!(
                error = %e,
                transport = e.is_transport(),
                "Failed to list projects; continuing with none"
            );
            Vec::new()
        }
    };
    debug!(count = projects.len(), "Fetched candidate projects");

    let matching: Vec<&ProjectSummary> = projects
        .iter()
        .filter(|project| pattern.matches(&project.title))
        .collect();
    if matching.is_empty() {
        info!("No project title matches the pattern");
        return PolicyResult::fail(
            CheckName::Membership,
            format!("no matching project for pattern '{}'", pattern.as_str()),
        );
    }
    debug!(
        projects = ?matching.iter().map(|p| p.title.as_str()).collect::<Vec<_>>(),
        "Matching projects"
    );

    let linked = collect_linked_issue_numbers(gateway, &matching).await;
    debug!(count = linked.len(), "Collected linked issue numbers");

    if linked.is_empty() {
        return PolicyResult::fail(
            CheckName::Membership,
            "no cards found on any matching project",
        );
    }

    if linked.contains(&pr.issue_number) {
        PolicyResult::pass(CheckName::Membership)
    } else {
        PolicyResult::fail(
            CheckName::Membership,
            format!(
                "PR {} must be in a valid sprint project (one whose title matches '{}')",
                pr.issue_number,
                pattern.as_str()
            ),
        )
    }
}

/// Traverses every project concurrently and concatenates the results.
///
/// All traversals are awaited before returning. Duplicates are kept.
async fn collect_linked_issue_numbers<G>(
    gateway: &G,
    projects: &[&ProjectSummary],
) -> Vec<IssueNumber>
where
    G: ProjectGateway + ?Sized,
{
    let traversals = projects.iter().map(|project| async move {
        match gateway.list_linked_issue_numbers(&project.id).await {
            Ok(numbers) => numbers,
            Err(e) => {
                warn!(
                    project = %project.title,
                    error = %e,
                    "Failed to traverse project items; skipping project"
                );
                Vec::new()
            }
        }
    });

    join_all(traversals).await.into_iter().flatten().collect()
}

#[cfg(test)]
#[path = "membership_tests.rs"]
mod tests;
