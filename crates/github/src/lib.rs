//! Themis GitHub infrastructure adapter.
//!
//! Implements the [`policy::ProjectGateway`] trait against GitHub: project
//! boards, their items, and issue labels through the GraphQL API; commit file
//! lists through the REST API.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain policy rules.
//! All GitHub API details (authentication, pagination, nested traversal,
//! response decoding) are handled here; the [`policy`] and `checks` crates
//! never see them.
//!
//! ## Error mapping
//!
//! | Condition | Error |
//! |-----------|-------|
//! | Request could not be sent, non-success status | [`GatewayError::Transport`] |
//! | HTTP 401 / 403 | [`GatewayError::Authentication`] |
//! | Undecodable body, GraphQL `errors` array, missing data | [`GatewayError::Schema`] |

use async_trait::async_trait;
use policy::{
    ChangedFile, CommitSha, GatewayError, IssueNumber, Label, ProjectGateway, ProjectId,
    ProjectScope, ProjectSummary, RepoRef,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, instrument, warn};

mod graphql;
pub mod legacy;
mod rest;

use graphql::{
    IssueLabelsData, OrganizationProjectsData, ProjectItemsData, RepositoryProjectsData,
    ISSUE_LABELS_QUERY, ORGANIZATION_PROJECTS_QUERY, PROJECT_ITEMS_QUERY,
    REPOSITORY_PROJECTS_QUERY,
};

/// Default REST endpoint for github.com.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default GraphQL endpoint for github.com.
pub const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";

const USER_AGENT: &str = concat!("themis/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Connection settings for [`GitHubGateway`].
#[derive(Clone)]
pub struct GatewayConfig {
    /// REST base URL (no trailing `/repos`).
    pub api_url: String,
    /// GraphQL endpoint URL.
    pub graphql_url: String,
    /// Bearer token attached to every request.
    pub token: String,
    /// Repository under evaluation. Project items that belong to any other
    /// repository are never treated as linked.
    pub repository: RepoRef,
    /// Repository `issues_url` template, enabling the legacy content-URL
    /// decoder for project items that lack a number.
    pub issues_url_template: Option<String>,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_url", &self.api_url)
            .field("graphql_url", &self.graphql_url)
            .field("token", &"<redacted>")
            .field("repository", &self.repository)
            .field("issues_url_template", &self.issues_url_template)
            .finish()
    }
}

/// Errors raised while constructing a [`GitHubGateway`].
#[derive(Debug, Error)]
pub enum GatewaySetupError {
    /// The token contains characters that cannot appear in an HTTP header.
    #[error("GitHub token is not a valid header value")]
    InvalidToken,

    /// The HTTP client could not be built (e.g. TLS backend failure).
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

// ---------------------------------------------------------------------------
// Gateway
// ---------------------------------------------------------------------------

/// GitHub-backed [`ProjectGateway`].
#[derive(Debug, Clone)]
pub struct GitHubGateway {
    http: Client,
    config: GatewayConfig,
}

impl GitHubGateway {
    /// Builds a gateway whose HTTP client carries the bearer token and the
    /// GitHub API headers on every request.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewaySetupError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| GatewaySetupError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(API_VERSION),
        );

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self { http, config })
    }

    /// Posts one GraphQL document and decodes its `data` member.
    async fn graphql<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: Value,
    ) -> Result<T, GatewayError> {
        let request = self
            .http
            .post(&self.config.graphql_url)
            .json(&json!({ "query": query, "variables": variables }));
        let body = self.send(operation, request).await?;
        graphql::decode_response(operation, &body)
    }

    /// Sends a request and returns the body of a successful response.
    async fn send(
        &self,
        operation: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<String, GatewayError> {
        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::transport(operation, e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(GatewayError::Authentication {
                operation: operation.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::transport(operation, e.to_string()))?;

        if !status.is_success() {
            return Err(GatewayError::transport(
                operation,
                format!("HTTP {status}: {}", truncate(&body, 200)),
            ));
        }
        Ok(body)
    }
}

#[async_trait]
impl ProjectGateway for GitHubGateway {
    #[instrument(skip_all, fields(repo = %repo, scope = %scope))]
    async fn list_projects(
        &self,
        repo: &RepoRef,
        scope: ProjectScope,
    ) -> Result<Vec<ProjectSummary>, GatewayError> {
        const OP: &str = "list_projects";
        let mut projects = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = match scope {
                ProjectScope::Repository => self
                    .graphql::<RepositoryProjectsData>(
                        OP,
                        REPOSITORY_PROJECTS_QUERY,
                        json!({ "owner": repo.owner(), "name": repo.name(), "cursor": cursor }),
                    )
                    .await?
                    .into_page(OP)?,
                ProjectScope::Organization => self
                    .graphql::<OrganizationProjectsData>(
                        OP,
                        ORGANIZATION_PROJECTS_QUERY,
                        json!({ "owner": repo.owner(), "cursor": cursor }),
                    )
                    .await?
                    .into_page(OP)?,
            };
            projects.extend(page.items);
            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        debug!(count = projects.len(), "Listed projects");
        Ok(projects)
    }

    #[instrument(skip_all, fields(project = %project))]
    async fn list_linked_issue_numbers(
        &self,
        project: &ProjectId,
    ) -> Result<Vec<IssueNumber>, GatewayError> {
        const OP: &str = "list_linked_issue_numbers";
        let template = self.config.issues_url_template.as_deref();
        let mut numbers = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = self
                .graphql::<ProjectItemsData>(
                    OP,
                    PROJECT_ITEMS_QUERY,
                    json!({ "project": project.as_str(), "cursor": cursor }),
                )
                .await?
                .into_page(OP, project, &self.config.repository, template)?;
            numbers.extend(
                page.items
                    .into_iter()
                    .filter_map(|card| card.linked_issue_number),
            );
            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        debug!(count = numbers.len(), "Listed linked issue numbers");
        Ok(numbers)
    }

    #[instrument(skip_all, fields(repo = %repo, issue = %issue))]
    async fn list_labels(
        &self,
        repo: &RepoRef,
        issue: IssueNumber,
    ) -> Result<Vec<Label>, GatewayError> {
        const OP: &str = "list_labels";
        let mut labels = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = self
                .graphql::<IssueLabelsData>(
                    OP,
                    ISSUE_LABELS_QUERY,
                    json!({
                        "owner": repo.owner(),
                        "name": repo.name(),
                        "number": issue.as_u64(),
                        "cursor": cursor,
                    }),
                )
                .await?
                .into_page(OP, issue)?;
            labels.extend(page.items);
            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        debug!(count = labels.len(), "Listed labels");
        Ok(labels)
    }

    #[instrument(skip_all, fields(repo = %repo, commit = %commit))]
    async fn list_changed_files(
        &self,
        repo: &RepoRef,
        commit: &CommitSha,
    ) -> Result<Vec<ChangedFile>, GatewayError> {
        const OP: &str = "list_changed_files";
        let mut files = Vec::new();

        for page in 1..=rest::MAX_PAGES {
            let url = rest::commit_url(&self.config.api_url, repo, commit, page);
            let body = self.send(OP, self.http.get(&url)).await?;
            let batch = rest::decode_commit_files(OP, &body)?;
            let last = batch.len() < rest::FILES_PER_PAGE;
            files.extend(batch);
            if last {
                break;
            }
            if page == rest::MAX_PAGES {
                warn!(
                    count = files.len(),
                    "Commit file list truncated at the API limit"
                );
            }
        }

        debug!(count = files.len(), "Listed changed files");
        Ok(files)
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
