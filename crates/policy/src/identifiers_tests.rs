use super::*;

#[test]
fn test_string_id_rejects_empty_value() {
    assert!(CommitSha::new("").is_none());
    assert_eq!(CommitSha::new("abc123").unwrap().as_str(), "abc123");
}

#[test]
fn test_issue_number_display_uses_hash_prefix() {
    assert_eq!(IssueNumber::new(17).to_string(), "#17");
}

#[test]
fn test_repo_ref_parse_slug() {
    let repo = RepoRef::parse_slug("octo-org/widgets").unwrap();
    assert_eq!(repo.owner(), "octo-org");
    assert_eq!(repo.name(), "widgets");
    assert_eq!(repo.to_string(), "octo-org/widgets");
}

#[test]
fn test_repo_ref_parse_slug_rejects_malformed_input() {
    assert!(RepoRef::parse_slug("widgets").is_none());
    assert!(RepoRef::parse_slug("/widgets").is_none());
    assert!(RepoRef::parse_slug("octo-org/").is_none());
    assert!(RepoRef::parse_slug("a/b/c").is_none());
}

#[test]
fn test_run_ids_are_unique() {
    assert_ne!(EvaluationRunId::new_random(), EvaluationRunId::new_random());
}
