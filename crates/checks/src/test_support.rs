//! In-memory [`ProjectGateway`] used by the check tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use policy::{
    ChangedFile, CommitSha, GatewayError, IssueNumber, Label, ProjectGateway, ProjectId,
    ProjectScope, ProjectSummary, PullRequestContext, RepoRef,
};

/// Canned gateway responses plus a log of every call made.
pub struct FakeGateway {
    pub projects: Vec<ProjectSummary>,
    pub projects_error: Option<GatewayError>,
    pub items: HashMap<ProjectId, Result<Vec<IssueNumber>, GatewayError>>,
    pub labels: Result<Vec<Label>, GatewayError>,
    pub files: Result<Vec<ChangedFile>, GatewayError>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self {
            projects: Vec::new(),
            projects_error: None,
            items: HashMap::new(),
            labels: Ok(Vec::new()),
            files: Ok(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_project(mut self, id: &str, title: &str, linked: &[u64]) -> Self {
        let id = ProjectId::new(id).unwrap();
        self.projects.push(ProjectSummary {
            id: id.clone(),
            title: title.to_string(),
        });
        self.items.insert(
            id,
            Ok(linked.iter().copied().map(IssueNumber::new).collect()),
        );
        self
    }

    pub fn with_failing_project(mut self, id: &str, title: &str) -> Self {
        let id = ProjectId::new(id).unwrap();
        self.projects.push(ProjectSummary {
            id: id.clone(),
            title: title.to_string(),
        });
        self.items.insert(
            id,
            Err(GatewayError::transport("list_linked_issue_numbers", "connection reset")),
        );
        self
    }

    pub fn with_labels(mut self, names: &[&str]) -> Self {
        self.labels = Ok(names.iter().map(|n| Label::new(*n)).collect());
        self
    }

    pub fn with_files(mut self, names: &[&str]) -> Self {
        self.files = Ok(names.iter().map(|n| ChangedFile::new(*n)).collect());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ProjectGateway for FakeGateway {
    async fn list_projects(
        &self,
        repo: &RepoRef,
        scope: ProjectScope,
    ) -> Result<Vec<ProjectSummary>, GatewayError> {
        self.record(format!("list_projects {repo} {scope}"));
        match &self.projects_error {
            Some(e) => Err(e.clone()),
            None => Ok(self.projects.clone()),
        }
    }

    async fn list_linked_issue_numbers(
        &self,
        project: &ProjectId,
    ) -> Result<Vec<IssueNumber>, GatewayError> {
        self.record(format!("list_linked_issue_numbers {project}"));
        self.items
            .get(project)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn list_labels(
        &self,
        _repo: &RepoRef,
        issue: IssueNumber,
    ) -> Result<Vec<Label>, GatewayError> {
        self.record(format!("list_labels {issue}"));
        self.labels.clone()
    }

    async fn list_changed_files(
        &self,
        _repo: &RepoRef,
        commit: &CommitSha,
    ) -> Result<Vec<ChangedFile>, GatewayError> {
        self.record(format!("list_changed_files {commit}"));
        self.files.clone()
    }
}

pub fn repo() -> RepoRef {
    RepoRef::new("octo-org", "widgets").unwrap()
}

pub fn pr(number: u64) -> PullRequestContext {
    PullRequestContext {
        issue_number: IssueNumber::new(number),
        commit_sha: CommitSha::new("0123456789abcdef0123456789abcdef01234567").unwrap(),
        issues_base_url: None,
    }
}
