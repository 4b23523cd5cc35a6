use checks::PolicyConfig;
use policy::{CommitSha, IssueNumber, RepoRef};

use super::*;
use crate::config::LogFormat;

fn settings() -> Settings {
    Settings {
        policy: PolicyConfig::default(),
        debug: false,
        token: "ghp_test".to_string(),
        api_url: github::DEFAULT_API_URL.to_string(),
        graphql_url: github::DEFAULT_GRAPHQL_URL.to_string(),
        repo: RepoRef::new("octo-org", "widgets").unwrap(),
        sha: CommitSha::new("merge-sha"),
        event_path: None,
        issue_number: None,
        log_format: LogFormat::Text,
    }
}

fn write_event(name: &str, body: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("themis-{}-{name}.json", std::process::id()));
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn test_context_from_explicit_settings() {
    let mut settings = settings();
    settings.issue_number = Some(IssueNumber::new(5));

    let pr = pull_request_context(&settings).unwrap();

    assert_eq!(pr.issue_number, IssueNumber::new(5));
    assert_eq!(pr.commit_sha.as_str(), "merge-sha");
    assert!(pr.issues_base_url.is_none());
}

#[test]
fn test_missing_issue_number_is_a_context_error() {
    let err = pull_request_context(&settings()).unwrap_err();

    assert!(matches!(err, ThemisError::MissingContext { .. }));
}

#[test]
fn test_event_payload_supplies_number_head_sha_and_template() {
    let path = write_event(
        "payload",
        r#"{
            "pull_request": { "number": 17, "head": { "sha": "head-sha" } },
            "repository": { "issues_url": "https://api.github.com/repos/octo-org/widgets/issues{/number}" }
        }"#,
    );
    let mut settings = settings();
    settings.event_path = Some(path.clone());

    let pr = pull_request_context(&settings).unwrap();
    std::fs::remove_file(path).ok();

    assert_eq!(pr.issue_number, IssueNumber::new(17));
    assert_eq!(pr.commit_sha.as_str(), "head-sha");
    assert!(pr.issues_base_url.unwrap().ends_with("issues{/number}"));
}

#[test]
fn test_explicit_issue_number_overrides_payload() {
    let path = write_event("override", r#"{ "number": 17 }"#);
    let mut settings = settings();
    settings.event_path = Some(path.clone());
    settings.issue_number = Some(IssueNumber::new(99));

    let pr = pull_request_context(&settings).unwrap();
    std::fs::remove_file(path).ok();

    assert_eq!(pr.issue_number, IssueNumber::new(99));
    assert_eq!(pr.commit_sha.as_str(), "merge-sha");
}
