//! Command-line and environment configuration.
//!
//! Every setting is a long flag with an environment fallback. Policy settings
//! additionally accept the GitHub Actions input form (`INPUT_PROJECT-REGEX`
//! for `project-regex`). Empty values count as unset, since Actions passes
//! empty strings for inputs the workflow omits.

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use checks::PolicyConfig;
use clap::{Parser, ValueEnum};
use github::{DEFAULT_API_URL, DEFAULT_GRAPHQL_URL};
use policy::{CommitSha, IssueNumber, RepoRef};

const REDACTED: &str = "<redacted>";

/// Output format of the log stream on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    name = "themis",
    version,
    about = "Fails a pull request check when project, label, or changelog policy is violated."
)]
pub struct Cli {
    /// Pattern for project titles; enables the project-membership check.
    #[arg(long, env = "PROJECT_REGEX")]
    pub project_regex: Option<String>,

    /// Pattern for forbidden labels; enables the label-exclusion check.
    #[arg(long, env = "LABEL_REGEX")]
    pub label_regex: Option<String>,

    /// Pattern for changelog filenames; enables the changelog-presence check.
    #[arg(long, env = "CHANGELOG_REGEX")]
    pub changelog_regex: Option<String>,

    /// `"true"` enables verbose tracing of fetched and filtered data.
    #[arg(long, env = "DEBUG_MODE")]
    pub debug_mode: Option<String>,

    /// `"true"` searches organization projects instead of repository projects.
    #[arg(long, env = "ORG_LEVEL")]
    pub org_level: Option<String>,

    /// Bearer token for the GitHub API.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    #[arg(long, env = "GITHUB_GRAPHQL_URL", default_value = DEFAULT_GRAPHQL_URL)]
    pub graphql_url: String,

    /// Repository slug in `owner/name` form.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// Commit to inspect when the event payload carries no head SHA.
    #[arg(long, env = "GITHUB_SHA")]
    pub sha: Option<String>,

    /// Path of the JSON event payload written by the runner.
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,

    /// Pull request number; overrides the event payload.
    #[arg(long, env = "THEMIS_ISSUE_NUMBER")]
    pub issue_number: Option<String>,

    #[arg(long, env = "THEMIS_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl std::fmt::Debug for Cli {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cli")
            .field("project_regex", &self.project_regex)
            .field("label_regex", &self.label_regex)
            .field("changelog_regex", &self.changelog_regex)
            .field("debug_mode", &self.debug_mode)
            .field("org_level", &self.org_level)
            .field("token", &self.token.as_ref().map(|_| REDACTED))
            .field("api_url", &self.api_url)
            .field("graphql_url", &self.graphql_url)
            .field("repository", &self.repository)
            .field("sha", &self.sha)
            .field("event_path", &self.event_path)
            .field("issue_number", &self.issue_number)
            .field("log_format", &self.log_format)
            .finish()
    }
}

/// Fully resolved run settings.
#[derive(Clone)]
pub struct Settings {
    pub policy: PolicyConfig,
    pub debug: bool,
    pub token: String,
    pub api_url: String,
    pub graphql_url: String,
    pub repo: RepoRef,
    pub sha: Option<CommitSha>,
    pub event_path: Option<PathBuf>,
    pub issue_number: Option<IssueNumber>,
    pub log_format: LogFormat,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("policy", &self.policy)
            .field("debug", &self.debug)
            .field("token", &REDACTED)
            .field("api_url", &self.api_url)
            .field("graphql_url", &self.graphql_url)
            .field("repo", &self.repo)
            .field("sha", &self.sha)
            .field("event_path", &self.event_path)
            .field("issue_number", &self.issue_number)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl Cli {
    /// Resolves flags against the Actions input variables found via `lookup`.
    pub fn resolve<F>(self, lookup: F) -> anyhow::Result<Settings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let input = |value: Option<String>, name: &str| {
            non_empty(value).or_else(|| non_empty(lookup(&action_input_var(name))))
        };

        let policy = PolicyConfig {
            project_pattern: input(self.project_regex, "project-regex"),
            label_pattern: input(self.label_regex, "label-regex"),
            changelog_pattern: input(self.changelog_regex, "changelog-regex"),
            org_level: is_true(input(self.org_level, "org-level")),
        };
        let debug = is_true(input(self.debug_mode, "debug-mode"));

        let token = input(self.token, "github-token")
            .ok_or_else(|| anyhow!("a GitHub token is required (GITHUB_TOKEN or --token)"))?;

        let slug = non_empty(self.repository).ok_or_else(|| {
            anyhow!("a repository is required (GITHUB_REPOSITORY or --repository)")
        })?;
        let repo = RepoRef::parse_slug(&slug)
            .ok_or_else(|| anyhow!("repository '{slug}' is not in owner/name form"))?;

        let issue_number = non_empty(self.issue_number)
            .map(|raw| {
                raw.parse::<u64>()
                    .map(IssueNumber::new)
                    .with_context(|| format!("issue number '{raw}' is not an integer"))
            })
            .transpose()?;

        Ok(Settings {
            policy,
            debug,
            token,
            api_url: self.api_url,
            graphql_url: self.graphql_url,
            repo,
            sha: non_empty(self.sha).and_then(CommitSha::new),
            event_path: self.event_path.filter(|p| !p.as_os_str().is_empty()),
            issue_number,
            log_format: self.log_format,
        })
    }
}

/// The variable name the Actions runner uses for an input.
fn action_input_var(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Only the literal `"true"` enables a switch.
fn is_true(value: Option<String>) -> bool {
    value.as_deref() == Some("true")
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
