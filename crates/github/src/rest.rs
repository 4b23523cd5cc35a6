//! REST response shapes.
//!
//! The GraphQL schema does not expose the file list of an arbitrary commit, so
//! changed files come from `GET /repos/{owner}/{repo}/commits/{sha}`, which
//! paginates its `files` array with `page`/`per_page`.

use policy::{ChangedFile, CommitSha, GatewayError, RepoRef};
use serde::Deserialize;

/// Files requested per page of the commit endpoint.
pub(crate) const FILES_PER_PAGE: usize = 100;

/// GitHub truncates a commit's file list at 3000 entries.
pub(crate) const MAX_PAGES: u32 = 30;

#[derive(Debug, Deserialize)]
struct CommitFile {
    filename: String,
}

#[derive(Debug, Deserialize)]
struct CommitResponse {
    #[serde(default)]
    files: Vec<CommitFile>,
}

/// Builds the URL of one page of a commit's file list.
pub(crate) fn commit_url(api_url: &str, repo: &RepoRef, commit: &CommitSha, page: u32) -> String {
    format!(
        "{}/repos/{}/{}/commits/{}?per_page={}&page={}",
        api_url.trim_end_matches('/'),
        repo.owner(),
        repo.name(),
        commit,
        FILES_PER_PAGE,
        page
    )
}

/// Decodes the `files` member of a commit response.
pub(crate) fn decode_commit_files(
    operation: &str,
    body: &str,
) -> Result<Vec<ChangedFile>, GatewayError> {
    let response: CommitResponse = serde_json::from_str(body)
        .map_err(|e| GatewayError::schema(operation, format!("undecodable commit: {e}")))?;
    Ok(response
        .files
        .into_iter()
        .map(|f| ChangedFile::new(f.filename))
        .collect())
}

#[cfg(test)]
#[path = "rest_tests.rs"]
mod tests;
