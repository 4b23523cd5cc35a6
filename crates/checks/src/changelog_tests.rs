use super::*;
use crate::test_support::{pr, repo, FakeGateway};
use policy::GatewayError;

fn changelog_pattern() -> PolicyPattern {
    PolicyPattern::compile(CheckName::ChangelogPresence, r"CHANGELOG\.md").unwrap()
}

#[tokio::test]
async fn test_changelog_in_commit_passes() {
    let gateway = FakeGateway::new().with_files(&["src/a.js", "CHANGELOG.md"]);

    let result =
        check_changelog_presence(&gateway, &changelog_pattern(), &repo(), &pr(1).commit_sha)
            .await;

    assert_eq!(result, PolicyResult::pass(CheckName::ChangelogPresence));
}

#[tokio::test]
async fn test_missing_changelog_fails() {
    let gateway = FakeGateway::new().with_files(&["src/a.js"]);

    let result =
        check_changelog_presence(&gateway, &changelog_pattern(), &repo(), &pr(1).commit_sha)
            .await;

    assert!(!result.passed);
    assert!(result.reason.unwrap().starts_with("changelog not updated"));
}

#[tokio::test]
async fn test_empty_commit_fails() {
    let gateway = FakeGateway::new().with_files(&[]);

    let result =
        check_changelog_presence(&gateway, &changelog_pattern(), &repo(), &pr(1).commit_sha)
            .await;

    assert!(!result.passed);
}

#[tokio::test]
async fn test_file_fetch_failure_fails_closed() {
    let mut gateway = FakeGateway::new();
    gateway.files = Err(GatewayError::transport("list_changed_files", "timed out"));

    let result =
        check_changelog_presence(&gateway, &changelog_pattern(), &repo(), &pr(1).commit_sha)
            .await;

    assert!(!result.passed);
}
