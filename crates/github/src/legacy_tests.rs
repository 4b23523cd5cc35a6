use super::*;

const TEMPLATE: &str = "https://api.github.com/repos/octo-org/widgets/issues{/number}";

#[test]
fn test_number_is_taken_from_issue_content_url() {
    let number = issue_number_from_content_url(
        "https://api.github.com/repos/octo-org/widgets/issues/17",
        TEMPLATE,
    )
    .unwrap();

    assert_eq!(number, IssueNumber::new(17));
}

#[test]
fn test_template_without_suffix_is_accepted() {
    let number = issue_number_from_content_url(
        "https://api.github.com/repos/octo-org/widgets/issues/4/",
        "https://api.github.com/repos/octo-org/widgets/issues",
    )
    .unwrap();

    assert_eq!(number, IssueNumber::new(4));
}

#[test]
fn test_url_from_another_repository_is_rejected() {
    let err = issue_number_from_content_url(
        "https://api.github.com/repos/octo-org/gadgets/issues/17",
        TEMPLATE,
    )
    .unwrap_err();

    assert!(matches!(err, ContentUrlError::ForeignUrl { .. }));
}

#[test]
fn test_non_numeric_segment_is_rejected() {
    for url in [
        "https://api.github.com/repos/octo-org/widgets/issues/17/comments",
        "https://api.github.com/repos/octo-org/widgets/issues/abc",
        "https://api.github.com/repos/octo-org/widgets/issues/0",
    ] {
        let err = issue_number_from_content_url(url, TEMPLATE).unwrap_err();
        assert!(matches!(err, ContentUrlError::NotANumber { .. }), "{url}");
    }
}
