use super::*;
use crate::test_support::{pr, repo, FakeGateway};

fn config(project: Option<&str>, label: Option<&str>, changelog: Option<&str>) -> PolicyConfig {
    PolicyConfig {
        project_pattern: project.map(str::to_string),
        label_pattern: label.map(str::to_string),
        changelog_pattern: changelog.map(str::to_string),
        org_level: false,
    }
}

#[test]
fn test_absent_patterns_disable_their_checks() {
    let policy = config(None, Some("^wip$"), None).compile();

    assert_eq!(policy.enabled_checks(), vec![CheckName::LabelExclusion]);
    assert!(policy.configuration_errors().is_empty());
}

#[test]
fn test_org_level_selects_organization_scope() {
    let policy = PolicyConfig {
        org_level: true,
        ..PolicyConfig::default()
    }
    .compile();

    assert_eq!(policy.scope(), ProjectScope::Organization);
    assert!(policy.enabled_checks().is_empty());
}

#[test]
fn test_invalid_pattern_disables_only_its_check() {
    let policy = config(Some("Sprint"), Some("[unbalanced"), Some("CHANGELOG")).compile();

    assert_eq!(
        policy.enabled_checks(),
        vec![CheckName::Membership, CheckName::ChangelogPresence]
    );
    assert_eq!(policy.configuration_errors().len(), 1);
    assert_eq!(
        policy.configuration_errors()[0].check,
        CheckName::LabelExclusion
    );
}

#[tokio::test]
async fn test_invalid_pattern_is_reported_before_any_network_call() {
    let gateway = FakeGateway::new().with_labels(&["wip"]);
    let policy = config(None, Some("[unbalanced"), None).compile();

    let report = evaluate(&gateway, &policy, &repo(), &pr(1), EvaluationRunId::new_random()).await;

    assert!(!report.passed());
    assert!(report.results.is_empty());
    assert_eq!(gateway.count_calls("list_labels"), 0);
    assert!(report
        .failure_summary()
        .unwrap()
        .contains("Invalid label-exclusion pattern"));
}

#[tokio::test]
async fn test_no_enabled_checks_passes() {
    let gateway = FakeGateway::new();
    let policy = PolicyConfig::default().compile();

    let report = evaluate(&gateway, &policy, &repo(), &pr(1), EvaluationRunId::new_random()).await;

    assert!(report.passed());
    assert!(report.failure_summary().is_none());
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_all_checks_pass() {
    let gateway = FakeGateway::new()
        .with_project("P1", "Sprint 4", &[8])
        .with_labels(&["enhancement"])
        .with_files(&["src/lib.rs", "CHANGELOG.md"]);
    let policy = config(Some("^Sprint"), Some("^wip$"), Some(r"CHANGELOG\.md")).compile();

    let report = evaluate(&gateway, &policy, &repo(), &pr(8), EvaluationRunId::new_random()).await;

    assert!(report.passed());
    assert_eq!(report.results.len(), 3);
    assert!(report.started_at <= report.finished_at);
}

#[tokio::test]
async fn test_every_failing_check_is_aggregated() {
    let gateway = FakeGateway::new()
        .with_project("P1", "Sprint 4", &[9])
        .with_labels(&["wip"])
        .with_files(&["src/lib.rs"]);
    let policy = config(Some("^Sprint"), Some("^wip$"), Some(r"CHANGELOG\.md")).compile();

    let report = evaluate(&gateway, &policy, &repo(), &pr(8), EvaluationRunId::new_random()).await;

    assert!(!report.passed());
    let failed: Vec<CheckName> = report.failures().map(|r| r.check).collect();
    assert_eq!(
        failed,
        vec![
            CheckName::Membership,
            CheckName::LabelExclusion,
            CheckName::ChangelogPresence
        ]
    );
    let summary = report.failure_summary().unwrap();
    assert!(summary.starts_with("3 policy check(s) failed"));
    assert!(summary.contains("must be in a valid sprint project"));
    assert!(summary.contains("'wip'"));
    assert!(summary.contains("changelog not updated"));
}

#[tokio::test]
async fn test_configuration_and_policy_failures_are_reported_together() {
    let gateway = FakeGateway::new().with_files(&["src/lib.rs"]);
    let policy = config(Some("(Sprint"), None, Some(r"CHANGELOG\.md")).compile();

    let report = evaluate(&gateway, &policy, &repo(), &pr(8), EvaluationRunId::new_random()).await;

    let messages = report.failure_messages();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].starts_with("Invalid project-membership pattern"));
    assert!(messages[1].starts_with("changelog-presence: changelog not updated"));
    assert_eq!(gateway.count_calls("list_projects"), 0);
}
