mod common;
use crate::common::init_tracing;

use raptor_dev::config::IgnoreSet;
use raptor_dev::watch::filter::base_name;
use raptor_dev::watch::{should_ignore, PathFilter};

fn pats(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn glob_matches_base_name_only() {
    init_tracing();
    let patterns = pats(&["*.log", "bin"]);

    assert!(should_ignore("server.log", &patterns));
    assert!(should_ignore("logs/deep/server.log", &patterns));
    assert!(should_ignore("bin", &patterns));
    assert!(should_ignore("cmd/bin", &patterns));

    // "bin" as a middle component is not the base name.
    assert!(!should_ignore("bin/app", &patterns));
    assert!(!should_ignore("main.go", &patterns));
}

#[test]
fn glob_does_not_cross_segments() {
    init_tracing();
    let patterns = pats(&["internal*"]);

    assert!(should_ignore("internal", &patterns));
    assert!(should_ignore("pkg/internal_gen", &patterns));
    assert!(!should_ignore("internal/gen", &patterns));
}

#[test]
fn path_literal_requires_exact_match() {
    init_tracing();
    let patterns = pats(&["app/assets", "web/*.css"]);

    assert!(should_ignore("app/assets", &patterns));
    assert!(!should_ignore("assets", &patterns));
    assert!(!should_ignore("app/assets/img", &patterns));
    assert!(!should_ignore("other/app/assets", &patterns));

    // Contains a separator, so no glob semantics.
    assert!(!should_ignore("web/site.css", &patterns));
    assert!(should_ignore("web/*.css", &patterns));
}

#[test]
fn malformed_glob_never_matches() {
    init_tracing();
    let patterns = pats(&["[bin", "tmp"]);

    assert!(!should_ignore("[bin", &patterns));
    assert!(!should_ignore("bin", &patterns));
    assert!(should_ignore("tmp", &patterns));

    let filter = PathFilter::from_patterns(&patterns);
    assert!(!filter.is_ignored("[bin"));
    assert!(filter.is_ignored("tmp"));
}

#[test]
fn empty_pattern_list_ignores_nothing() {
    init_tracing();
    assert!(!should_ignore("bin", &[]));
    assert!(!PathFilter::allow_all().is_ignored("bin"));
}

#[test]
fn default_filter_covers_default_directories() {
    init_tracing();
    let filter = PathFilter::new(&IgnoreSet::default());

    for dir in ["bin", ".git", "tmp", "vendor"] {
        assert!(filter.is_ignored(dir), "{dir} should be ignored");
    }
    assert!(!filter.is_ignored("app"));
    assert!(!filter.is_ignored("main.go"));
}

#[test]
fn is_ignored_or_within_checks_ancestors() {
    init_tracing();
    let filter = PathFilter::from_patterns(&["bin", "app/assets", "*.tmp"]);

    assert!(filter.is_ignored_or_within("bin/tmp.log"));
    assert!(filter.is_ignored_or_within("bin"));
    assert!(filter.is_ignored_or_within("app/assets/logo.png"));
    assert!(filter.is_ignored_or_within("app/models/user.go.tmp"));

    assert!(!filter.is_ignored_or_within("app/models/user.go"));
    assert!(!filter.is_ignored_or_within("binary/main.go"));
    assert!(!filter.is_ignored_or_within(""));
}

#[test]
fn base_name_of_relative_paths() {
    assert_eq!(base_name("a/b/c.go"), "c.go");
    assert_eq!(base_name("main.go"), "main.go");
    assert_eq!(base_name(""), "");
}
