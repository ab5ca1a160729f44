use proptest::prelude::*;
use raptor_dev::watch::{should_ignore, PathFilter};

fn segment() -> impl Strategy<Value = String> {
    "[a-z_.]{1,6}"
}

fn rel_path() -> impl Strategy<Value = String> {
    proptest::collection::vec(segment(), 1..4).prop_map(|segs| segs.join("/"))
}

fn pattern() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z*?.\\[\\]]{1,6}",
        proptest::collection::vec(segment(), 2..3).prop_map(|segs| segs.join("/")),
    ]
}

proptest! {
    #[test]
    fn should_ignore_is_deterministic(
        path in rel_path(),
        patterns in proptest::collection::vec(pattern(), 0..5),
    ) {
        let first = should_ignore(&path, &patterns);
        let second = should_ignore(&path, &patterns);
        prop_assert_eq!(first, second);

        // The precompiled filter agrees with the free function.
        let filter = PathFilter::from_patterns(&patterns);
        prop_assert_eq!(filter.is_ignored(&path), first);
    }

    #[test]
    fn literal_patterns_only_match_themselves(
        path in rel_path(),
        literal in proptest::collection::vec(segment(), 2..4).prop_map(|s| s.join("/")),
    ) {
        let patterns = vec![literal.clone()];
        prop_assert_eq!(should_ignore(&path, &patterns), path == literal);
    }

    #[test]
    fn base_name_glob_ignores_prefix_components(
        dirs in proptest::collection::vec(segment(), 0..3),
        name in segment(),
    ) {
        let mut parts = dirs.clone();
        parts.push(name.clone());
        let path = parts.join("/");

        // An exact-name glob matches iff the base name is that name.
        let patterns = vec![name.clone()];
        prop_assert!(should_ignore(&path, &patterns));

        let other = format!("{name}x");
        prop_assert!(!should_ignore(&path, &[other]));
    }
}
