use super::*;

#[test]
fn test_default_directives_parse() {
    for debug in [true, false] {
        assert!(EnvFilter::try_new(default_directives(debug)).is_ok());
    }
}

#[test]
fn test_debug_mode_raises_workspace_crates_only() {
    let directives = default_directives(true);

    assert!(directives.starts_with("info,"));
    assert!(directives.contains("checks=debug"));
    assert_eq!(default_directives(false), "info");
}
