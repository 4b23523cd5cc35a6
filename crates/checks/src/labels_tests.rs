use super::*;
use crate::test_support::{pr, repo, FakeGateway};
use policy::GatewayError;

fn wip_pattern() -> PolicyPattern {
    PolicyPattern::compile(CheckName::LabelExclusion, "^wip$").unwrap()
}

#[tokio::test]
async fn test_forbidden_label_fails_and_is_named() {
    let gateway = FakeGateway::new().with_labels(&["bug", "wip"]);

    let result = check_label_exclusion(&gateway, &wip_pattern(), &repo(), &pr(7)).await;

    assert!(!result.passed);
    assert!(result.reason.unwrap().contains("'wip'"));
}

#[tokio::test]
async fn test_no_labels_passes() {
    let gateway = FakeGateway::new().with_labels(&[]);

    let result = check_label_exclusion(&gateway, &wip_pattern(), &repo(), &pr(7)).await;

    assert_eq!(result, PolicyResult::pass(CheckName::LabelExclusion));
}

#[tokio::test]
async fn test_every_forbidden_label_is_reported() {
    let gateway = FakeGateway::new().with_labels(&["do-not-merge", "bug", "wip"]);
    let pattern =
        PolicyPattern::compile(CheckName::LabelExclusion, "^(wip|do-not-merge)$").unwrap();

    let result = check_label_exclusion(&gateway, &pattern, &repo(), &pr(7)).await;

    assert_eq!(
        result.reason.as_deref(),
        Some("forbidden label(s) present: 'do-not-merge', 'wip'")
    );
}

#[tokio::test]
async fn test_labels_are_fetched_for_the_pull_request_number() {
    let gateway = FakeGateway::new().with_labels(&["bug"]);

    let result = check_label_exclusion(&gateway, &wip_pattern(), &repo(), &pr(7)).await;

    assert!(result.passed);
    assert_eq!(gateway.calls(), vec!["list_labels #7".to_string()]);
}

#[tokio::test]
async fn test_label_fetch_failure_is_treated_as_no_labels() {
    let mut gateway = FakeGateway::new();
    gateway.labels = Err(GatewayError::schema("list_labels", "errors array present"));

    let result = check_label_exclusion(&gateway, &wip_pattern(), &repo(), &pr(7)).await;

    assert!(result.passed);
}
