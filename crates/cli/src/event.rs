//! GitHub Actions event payload.
//!
//! The runner writes the triggering webhook payload to `GITHUB_EVENT_PATH`.
//! Only the pull request number, its head commit, and the repository's issues
//! URL template are read from it.

use std::path::Path;

use policy::{CommitSha, IssueNumber, ThemisError};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct EventPayload {
    number: Option<u64>,
    pull_request: Option<PullRequestPayload>,
    repository: Option<RepositoryPayload>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    number: Option<u64>,
    head: Option<HeadPayload>,
}

#[derive(Debug, Deserialize)]
struct HeadPayload {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct RepositoryPayload {
    issues_url: Option<String>,
}

/// The parts of the event payload the evaluation needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventContext {
    pub issue_number: Option<IssueNumber>,
    pub head_sha: Option<CommitSha>,
    pub issues_url: Option<String>,
}

/// Reads and decodes the payload at `path`.
pub fn load(path: &Path) -> Result<EventContext, ThemisError> {
    let body = std::fs::read_to_string(path).map_err(|e| ThemisError::EventPayload {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse(&path.display().to_string(), &body)
}

/// Decodes a payload body; `source` names it in errors.
pub fn parse(source: &str, body: &str) -> Result<EventContext, ThemisError> {
    let payload: EventPayload =
        serde_json::from_str(body).map_err(|e| ThemisError::EventPayload {
            path: source.to_string(),
            message: e.to_string(),
        })?;

    let (pr_number, head_sha) = match payload.pull_request {
        Some(pr) => (pr.number, pr.head.and_then(|h| CommitSha::new(h.sha))),
        None => (None, None),
    };

    Ok(EventContext {
        issue_number: pr_number.or(payload.number).map(IssueNumber::new),
        head_sha,
        issues_url: payload.repository.and_then(|r| r.issues_url),
    })
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
