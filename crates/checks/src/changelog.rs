//! Changelog-presence check.

use policy::{CheckName, CommitSha, PolicyPattern, PolicyResult, ProjectGateway, RepoRef};
use tracing::{debug, instrument, warn};

/// Passes as soon as one file changed by `commit` matches `pattern`.
///
/// An empty file list (including one caused by a failed fetch) fails.
#[instrument(
    name = "check.changelog",
    skip_all,
    fields(pattern = %pattern.as_str(), commit = %commit)
)]
pub async fn check_changelog_presence<G>(
    gateway: &G,
    pattern: &PolicyPattern,
    repo: &RepoRef,
    commit: &CommitSha,
) -> PolicyResult
where
    G: ProjectGateway + ?Sized,
{
    let files = match gateway.list_changed_files(repo, commit).await {
        Ok(files) => files,
        Err(e) => {
            warn!(
                error = %e,
                transport = e.is_transport(),
                "Failed to list changed files; continuing with none"
            );
            Vec::new()
        }
    };
    debug!(count = files.len(), "Fetched changed files");

    match files.iter().find(|f| pattern.matches(&f.filename)) {
        Some(file) => {
            debug!(file = %file.filename, "Found changelog entry");
            PolicyResult::pass(CheckName::ChangelogPresence)
        }
        None => PolicyResult::fail(
            CheckName::ChangelogPresence,
            format!(
                "changelog not updated: no file in commit {} matches '{}'",
                commit,
                pattern.as_str()
            ),
        ),
    }
}

#[cfg(test)]
#[path = "changelog_tests.rs"]
mod tests;
