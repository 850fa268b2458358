#![allow(clippy::unwrap_used, clippy::expect_used)]

use docwatch_core::{diff_documents, ArrayIdentityMap, Delta, Difference, Path};
use serde_json::json;

fn path(s: &str) -> Path {
    Path::parse(s).unwrap()
}

fn site_ids() -> ArrayIdentityMap {
    let mut ids = ArrayIdentityMap::new();
    ids.insert(path("sites"), vec![path("_id")]);
    ids
}

#[test]
fn test_combined_changes_emit_canonical_order() {
    let pre = json!({
        "login": "jdoe",
        "nick": "jd",
        "personalInfo": {"company": "Red Hat"},
        "sites": [
            {"_id": "a", "siteType": "shipping"},
            {"_id": "b", "siteType": "billing"}
        ]
    });
    let post = json!({
        "login": "jdoe2",
        "personalInfo": {"company": "Red Hat"},
        "sites": [
            {"_id": "b", "siteType": "office"},
            {"_id": "a", "siteType": "shipping"}
        ],
        "title": "dev"
    });

    let diff = diff_documents(&pre, &post, &site_ids());
    assert_eq!(
        diff.deltas(),
        &[
            Delta::Modification {
                path: path("login"),
                pre: json!("jdoe"),
                post: json!("jdoe2"),
            },
            Delta::Removal {
                path: path("nick"),
                removed: json!("jd"),
            },
            Delta::Move {
                from: path("sites.1"),
                to: path("sites.0"),
                moved: json!({"_id": "b", "siteType": "office"}),
            },
            Delta::Modification {
                path: path("sites.0.siteType"),
                pre: json!("billing"),
                post: json!("office"),
            },
            Delta::Move {
                from: path("sites.0"),
                to: path("sites.1"),
                moved: json!({"_id": "a", "siteType": "shipping"}),
            },
            Delta::Addition {
                path: path("title"),
                added: json!("dev"),
            },
        ]
    );
    assert_eq!(diff.num_changed_fields(), 4);
}

#[test]
fn test_repeated_comparison_is_deterministic() {
    let pre = json!({"sites": [
        {"_id": "a", "n": 1},
        {"_id": "b", "n": 2},
        {"_id": "c", "n": 3}
    ]});
    let post = json!({"sites": [
        {"_id": "c", "n": 3},
        {"_id": "a", "n": 9}
    ]});

    let first = diff_documents(&pre, &post, &site_ids());
    let second = diff_documents(&pre, &post, &site_ids());
    assert_eq!(first, second);
}

#[test]
fn test_positional_array_growth() {
    let pre = json!({"tags": ["a", "b"]});
    let post = json!({"tags": ["a", "c", "d"]});
    let diff = diff_documents(&pre, &post, &ArrayIdentityMap::new());

    assert_eq!(
        diff.deltas(),
        &[
            Delta::Modification {
                path: path("tags.1"),
                pre: json!("b"),
                post: json!("c"),
            },
            Delta::Addition {
                path: path("tags.2"),
                added: json!("d"),
            },
        ]
    );
}

#[test]
fn test_elements_missing_identity_values_never_match() {
    // The second pre element carries no _id, so it cannot pair with
    // anything and falls through to a removal
    let pre = json!({"sites": [
        {"_id": "a", "siteType": "shipping"},
        {"siteType": "billing"}
    ]});
    let post = json!({"sites": [
        {"_id": "a", "siteType": "shipping"}
    ]});
    let diff = diff_documents(&pre, &post, &site_ids());

    assert_eq!(
        diff.deltas(),
        &[Delta::Removal {
            path: path("sites.1"),
            removed: json!({"siteType": "billing"}),
        }]
    );
}

#[test]
fn test_wildcard_identity_key_covers_nested_arrays() {
    let mut ids = ArrayIdentityMap::new();
    ids.insert(path("accounts.*.sites"), vec![path("_id")]);
    let pre = json!({"accounts": [
        {"name": "acme", "sites": [{"_id": "a", "n": 1}, {"_id": "b", "n": 2}]}
    ]});
    let post = json!({"accounts": [
        {"name": "acme", "sites": [{"_id": "b", "n": 2}, {"_id": "a", "n": 1}]}
    ]});
    let diff = diff_documents(&pre, &post, &ids);

    assert_eq!(diff.num_changed_fields(), 0);
    assert_eq!(diff.deltas().iter().filter(|d| d.is_move()).count(), 2);
}

#[test]
fn test_null_is_distinct_from_absent() {
    let diff = diff_documents(&json!({"nick": null}), &json!({}), &ArrayIdentityMap::new());
    assert!(matches!(
        diff.deltas(),
        [Delta::Removal { path: p, removed }] if *p == path("nick") && removed.is_null()
    ));

    let diff = diff_documents(
        &json!({"nick": null}),
        &json!({"nick": "jd"}),
        &ArrayIdentityMap::new(),
    );
    assert_eq!(diff.num_changed_fields(), 1);
}

#[test]
fn test_difference_serde_round_trip() {
    let pre = json!({"login": "jdoe", "sites": [{"_id": "a"}, {"_id": "b"}]});
    let post = json!({"login": "jdoe2", "sites": [{"_id": "b"}, {"_id": "a"}]});
    let diff = diff_documents(&pre, &post, &site_ids());

    let encoded = serde_json::to_value(&diff).unwrap();
    let kinds: Vec<_> = encoded["deltas"]
        .as_array()
        .unwrap()
        .iter()
        .map(|delta| delta["kind"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(kinds, vec!["modification", "move", "move"]);

    let back: Difference = serde_json::from_value(encoded).unwrap();
    assert_eq!(back, diff);
}
