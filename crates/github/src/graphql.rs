//! GraphQL documents and response shapes for the project traversal.
//!
//! Every connection is requested 100 nodes at a time; the gateway follows
//! `pageInfo.endCursor` until `hasNextPage` is false. Decoding is kept free of
//! I/O so it can be exercised against literal payloads.

use policy::{CardRef, GatewayError, IssueNumber, Label, ProjectId, ProjectSummary, RepoRef};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::legacy;

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

pub(crate) const REPOSITORY_PROJECTS_QUERY: &str = r#"
query($owner: String!, $name: String!, $cursor: String) {
  repository(owner: $owner, name: $name) {
    projectsV2(first: 100, after: $cursor) {
      nodes { id title }
      pageInfo { hasNextPage endCursor }
    }
  }
}"#;

pub(crate) const ORGANIZATION_PROJECTS_QUERY: &str = r#"
query($owner: String!, $cursor: String) {
  organization(login: $owner) {
    projectsV2(first: 100, after: $cursor) {
      nodes { id title }
      pageInfo { hasNextPage endCursor }
    }
  }
}"#;

pub(crate) const PROJECT_ITEMS_QUERY: &str = r#"
query($project: ID!, $cursor: String) {
  node(id: $project) {
    ... on ProjectV2 {
      items(first: 100, after: $cursor) {
        nodes {
          content {
            __typename
            ... on Issue { number url repository { nameWithOwner } }
            ... on PullRequest { number url repository { nameWithOwner } }
          }
        }
        pageInfo { hasNextPage endCursor }
      }
    }
  }
}"#;

pub(crate) const ISSUE_LABELS_QUERY: &str = r#"
query($owner: String!, $name: String!, $number: Int!, $cursor: String) {
  repository(owner: $owner, name: $name) {
    issueOrPullRequest(number: $number) {
      ... on Issue {
        labels(first: 100, after: $cursor) {
          nodes { name }
          pageInfo { hasNextPage endCursor }
        }
      }
      ... on PullRequest {
        labels(first: 100, after: $cursor) {
          nodes { name }
          pageInfo { hasNextPage endCursor }
        }
      }
    }
  }
}"#;

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// Decodes a GraphQL response body into its `data` member.
///
/// A payload carrying an `errors` array is rejected even when partial data is
/// present.
pub(crate) fn decode_response<T: DeserializeOwned>(
    operation: &str,
    body: &str,
) -> Result<T, GatewayError> {
    let response: GraphQlResponse<T> = serde_json::from_str(body)
        .map_err(|e| GatewayError::schema(operation, format!("undecodable payload: {e}")))?;

    if !response.errors.is_empty() {
        let messages: Vec<&str> = response.errors.iter().map(|e| e.message.as_str()).collect();
        return Err(GatewayError::schema(operation, messages.join("; ")));
    }

    response
        .data
        .ok_or_else(|| GatewayError::schema(operation, "response carried no data"))
}

// ---------------------------------------------------------------------------
// Connections
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

impl PageInfo {
    /// The cursor for the next page, or `None` when this was the last page.
    pub(crate) fn next_cursor(self) -> Option<String> {
        if self.has_next_page {
            self.end_cursor
        } else {
            None
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Connection<N> {
    #[serde(default = "Vec::new")]
    nodes: Vec<Option<N>>,
    page_info: PageInfo,
}

/// One decoded page: the items it held and the cursor of the following page.
pub(crate) struct Page<T> {
    pub(crate) items: Vec<T>,
    pub(crate) next_cursor: Option<String>,
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ProjectNode {
    id: String,
    title: String,
}

#[derive(Debug, Deserialize)]
struct ProjectsOwner {
    #[serde(rename = "projectsV2")]
    projects: Connection<ProjectNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RepositoryProjectsData {
    repository: Option<ProjectsOwner>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrganizationProjectsData {
    organization: Option<ProjectsOwner>,
}

impl RepositoryProjectsData {
    pub(crate) fn into_page(self, operation: &str) -> Result<Page<ProjectSummary>, GatewayError> {
        let owner = self
            .repository
            .ok_or_else(|| GatewayError::schema(operation, "repository not found"))?;
        Ok(project_page(owner.projects))
    }
}

impl OrganizationProjectsData {
    pub(crate) fn into_page(self, operation: &str) -> Result<Page<ProjectSummary>, GatewayError> {
        let owner = self
            .organization
            .ok_or_else(|| GatewayError::schema(operation, "organization not found"))?;
        Ok(project_page(owner.projects))
    }
}

fn project_page(connection: Connection<ProjectNode>) -> Page<ProjectSummary> {
    let items = connection
        .nodes
        .into_iter()
        .flatten()
        .filter_map(|node| {
            ProjectId::new(node.id).map(|id| ProjectSummary {
                id,
                title: node.title,
            })
        })
        .collect();
    Page {
        items,
        next_cursor: connection.page_info.next_cursor(),
    }
}

// ---------------------------------------------------------------------------
// Project items
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ItemContent {
    #[serde(rename = "__typename")]
    typename: String,
    number: Option<u64>,
    url: Option<String>,
    repository: Option<ContentRepository>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContentRepository {
    name_with_owner: String,
}

#[derive(Debug, Deserialize)]
struct ItemNode {
    content: Option<ItemContent>,
}

#[derive(Debug, Deserialize)]
struct ProjectItemsNode {
    items: Option<Connection<ItemNode>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProjectItemsData {
    node: Option<ProjectItemsNode>,
}

impl ProjectItemsData {
    /// Decodes one page of project items into cards.
    ///
    /// Only content from `repo` counts as linked; organization boards also
    /// hold issues of sibling repositories whose numbers would collide.
    /// `issues_url_template` enables the legacy content-URL decoder for items
    /// that carry a URL but no number or repository.
    pub(crate) fn into_page(
        self,
        operation: &str,
        project: &ProjectId,
        repo: &RepoRef,
        issues_url_template: Option<&str>,
    ) -> Result<Page<CardRef>, GatewayError> {
        let connection = self
            .node
            .and_then(|node| node.items)
            .ok_or_else(|| {
                GatewayError::schema(operation, format!("{project} is not a project"))
            })?;

        let items = connection
            .nodes
            .into_iter()
            .flatten()
            .map(|item| CardRef {
                project_id: project.clone(),
                linked_issue_number: item
                    .content
                    .and_then(|content| linked_number(content, repo, issues_url_template)),
            })
            .collect();

        Ok(Page {
            items,
            next_cursor: connection.page_info.next_cursor(),
        })
    }
}

fn linked_number(
    content: ItemContent,
    repo: &RepoRef,
    issues_url_template: Option<&str>,
) -> Option<IssueNumber> {
    if content.typename != "Issue" && content.typename != "PullRequest" {
        return None;
    }
    if let Some(owner) = &content.repository {
        if !owner.name_with_owner.eq_ignore_ascii_case(&repo.to_string()) {
            tracing::debug!(
                item_repository = %owner.name_with_owner,
                number = ?content.number,
                "Skipping project item from another repository"
            );
            return None;
        }
        if let Some(number) = content.number {
            return Some(IssueNumber::new(number));
        }
    }
    let (url, template) = (content.url?, issues_url_template?);
    match legacy::issue_number_from_content_url(&url, template) {
        Ok(number) => Some(number),
        Err(e) => {
            tracing::debug!(
                url = %url,
                error = %e,
                "Could not derive issue number from content URL"
            );
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct LabelNode {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Labelled {
    labels: Option<Connection<LabelNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LabelsRepository {
    issue_or_pull_request: Option<Labelled>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IssueLabelsData {
    repository: Option<LabelsRepository>,
}

impl IssueLabelsData {
    pub(crate) fn into_page(
        self,
        operation: &str,
        issue: IssueNumber,
    ) -> Result<Page<Label>, GatewayError> {
        let connection = self
            .repository
            .and_then(|repo| repo.issue_or_pull_request)
            .and_then(|labelled| labelled.labels)
            .ok_or_else(|| GatewayError::schema(operation, format!("issue {issue} not found")))?;

        let items = connection
            .nodes
            .into_iter()
            .flatten()
            .map(|node| Label::new(node.name))
            .collect();

        Ok(Page {
            items,
            next_cursor: connection.page_info.next_cursor(),
        })
    }
}

#[cfg(test)]
#[path = "graphql_tests.rs"]
mod tests;
