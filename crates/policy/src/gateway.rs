//! Port trait for the remote project-tracking API.
//!
//! Infrastructure crates implement [`ProjectGateway`]; the checks only ever see
//! this trait. Pagination and nested traversal (projects, then items, then the
//! content linked from each item) are the implementation's concern: every
//! method returns a flattened result.

use async_trait::async_trait;

use crate::{
    ChangedFile, CommitSha, GatewayError, IssueNumber, Label, ProjectId, ProjectScope,
    ProjectSummary, RepoRef,
};

/// Read-only access to the project boards, labels, and commits of a repository.
#[async_trait]
pub trait ProjectGateway: Send + Sync {
    /// Lists every project visible at `scope` for `repo`.
    ///
    /// [`ProjectScope::Organization`] lists the projects of `repo.owner()`
    /// rather than those attached to the repository.
    async fn list_projects(
        &self,
        repo: &RepoRef,
        scope: ProjectScope,
    ) -> Result<Vec<ProjectSummary>, GatewayError>;

    /// Lists the issue or pull-request number linked from each item of a
    /// project.
    ///
    /// Unlinked items are skipped. Order is not significant and duplicates are
    /// preserved.
    async fn list_linked_issue_numbers(
        &self,
        project: &ProjectId,
    ) -> Result<Vec<IssueNumber>, GatewayError>;

    /// Lists the labels attached to an issue or pull request, in backend order.
    async fn list_labels(
        &self,
        repo: &RepoRef,
        issue: IssueNumber,
    ) -> Result<Vec<Label>, GatewayError>;

    /// Lists the files touched by a commit, in backend order.
    async fn list_changed_files(
        &self,
        repo: &RepoRef,
        commit: &CommitSha,
    ) -> Result<Vec<ChangedFile>, GatewayError>;
}
