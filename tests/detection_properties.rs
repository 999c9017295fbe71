//! Property-based tests for the detection engine
//!
//! - Detection is deterministic
//! - Normalized paths have exactly one leading slash and no trailing slash
//! - Every Flask verb in a `methods` list yields one record
//! - Arbitrary text never panics the engine

use proptest::prelude::*;
use routemap::{normalize_route_path, DetectorRegistry};

/// Path segments made of characters that need no escaping in a literal
fn segment() -> impl Strategy<Value = String> {
    "[a-z0-9_<>:-]{1,8}"
}

fn route_literal() -> impl Strategy<Value = String> {
    (
        prop::bool::ANY,
        prop::collection::vec(segment(), 0..4),
        prop::bool::ANY,
    )
        .prop_map(|(leading, segments, trailing)| {
            let mut path = segments.join("/");
            if leading {
                path.insert(0, '/');
            }
            if trailing {
                path.push('/');
            }
            path
        })
}

fn verbs() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(
        prop::sample::select(vec!["GET", "POST", "PUT", "DELETE", "PATCH"]),
        1..5,
    )
}

proptest! {
    #[test]
    fn prop_normalized_paths_have_one_leading_slash(raw in route_literal()) {
        let path = normalize_route_path(&raw);
        prop_assert!(path.starts_with('/'));
        prop_assert!(!path.starts_with("//"));
        prop_assert!(path == "/" || !path.ends_with('/'));
        prop_assert_eq!(normalize_route_path(&path), path.clone());
    }

    #[test]
    fn prop_django_table_is_deterministic(paths in prop::collection::vec(route_literal(), 0..6)) {
        let elements: Vec<String> = paths.iter().map(|p| format!("path('{p}', view)")).collect();
        let code = format!("urlpatterns = [{}]\n", elements.join(", "));

        let registry = DetectorRegistry::new();
        let first = registry.detect_all("urls.py", &code);
        prop_assert_eq!(first.len(), paths.len());
        prop_assert_eq!(registry.detect_all("urls.py", &code), first.clone());

        for (record, raw) in first.iter().zip(&paths) {
            prop_assert_eq!(record.path(), normalize_route_path(raw));
            prop_assert_eq!(record.method(), "get");
        }
    }

    #[test]
    fn prop_flask_emits_one_record_per_verb(raw in route_literal(), methods in verbs()) {
        prop_assume!(!raw.is_empty());
        let quoted: Vec<String> = methods.iter().map(|m| format!("'{m}'")).collect();
        let code = format!(
            "@app.route('{raw}', methods=[{}])\ndef view():\n    pass\n",
            quoted.join(", ")
        );

        let records = DetectorRegistry::new().detect_all("views.py", &code);
        let found: Vec<String> = records.iter().map(|r| r.method().to_string()).collect();
        let expected: Vec<String> = methods.iter().map(|m| m.to_lowercase()).collect();
        prop_assert_eq!(found, expected);
        prop_assert!(records.iter().all(|r| r.citations() == records[0].citations()));
    }

    #[test]
    fn prop_arbitrary_text_never_panics(code in "\\PC{0,200}") {
        let registry = DetectorRegistry::new();
        let _ = registry.detect_all("fuzz.py", &code);
        let _ = registry.detect_file("fuzz.ts", &code);
    }
}
