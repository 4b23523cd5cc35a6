use super::*;

#[test]
fn test_commit_url_includes_paging() {
    let repo = RepoRef::new("octo-org", "widgets").unwrap();
    let sha = CommitSha::new("abc123").unwrap();

    assert_eq!(
        commit_url("https://api.github.com/", &repo, &sha, 2),
        "https://api.github.com/repos/octo-org/widgets/commits/abc123?per_page=100&page=2"
    );
}

#[test]
fn test_decode_commit_files_in_backend_order() {
    let body = r#"{
        "sha": "abc123",
        "files": [
            { "filename": "src/a.js", "status": "modified" },
            { "filename": "CHANGELOG.md", "status": "modified" }
        ]
    }"#;

    let files = decode_commit_files("list_changed_files", body).unwrap();

    assert_eq!(
        files,
        vec![ChangedFile::new("src/a.js"), ChangedFile::new("CHANGELOG.md")]
    );
}

#[test]
fn test_commit_without_files_member_decodes_empty() {
    let files = decode_commit_files("list_changed_files", r#"{ "sha": "abc123" }"#).unwrap();

    assert!(files.is_empty());
}

#[test]
fn test_malformed_commit_is_a_schema_error() {
    let err = decode_commit_files("list_changed_files", r#"{ "files": 3 }"#).unwrap_err();

    assert!(matches!(err, GatewayError::Schema { .. }));
}
