//! Document comparison engine.
//!
//! The entry point is [`diff_documents`], which walks two document trees in
//! lockstep and emits a [`Difference`]. Objects compare field-by-field,
//! arrays either positionally or by declared element identity, and
//! everything else by equality.

use crate::diff::model::{Delta, Difference};
use crate::identity::ArrayIdentityMap;
use crate::path::{resolve, Path};
use serde_json::Value;

/// Compare two document versions.
///
/// Traversal is depth-first with object fields visited in key order and
/// array elements in index order, so identical inputs produce identical
/// delta sequences. Arrays covered by `ids` match elements on their
/// declared identity paths; matched elements whose index changed yield a
/// [`Delta::Move`] before any content deltas for that element. Arrays
/// without declared identity compare position by position.
pub fn diff_documents(pre: &Value, post: &Value, ids: &ArrayIdentityMap) -> Difference {
    if pre == post {
        return Difference::default();
    }
    let mut deltas = Vec::new();
    walk(&Path::root(), pre, post, ids, &mut deltas);
    Difference::new(deltas)
}

fn walk(path: &Path, pre: &Value, post: &Value, ids: &ArrayIdentityMap, out: &mut Vec<Delta>) {
    match (pre, post) {
        (Value::Object(pre_fields), Value::Object(post_fields)) => {
            // serde_json maps iterate in key order, keeping the merged
            // field walk deterministic
            for (name, pre_child) in pre_fields {
                let child_path = path.child_field(name);
                match post_fields.get(name) {
                    Some(post_child) => walk(&child_path, pre_child, post_child, ids, out),
                    None => out.push(Delta::Removal {
                        path: child_path,
                        removed: pre_child.clone(),
                    }),
                }
            }
            for (name, post_child) in post_fields {
                if !pre_fields.contains_key(name) {
                    out.push(Delta::Addition {
                        path: path.child_field(name),
                        added: post_child.clone(),
                    });
                }
            }
        }
        (Value::Array(pre_items), Value::Array(post_items)) => {
            match ids.identity_for(path) {
                Some(id_paths) if !id_paths.is_empty() => {
                    walk_array_by_identity(path, pre_items, post_items, id_paths, ids, out)
                }
                _ => walk_array_positional(path, pre_items, post_items, ids, out),
            }
        }
        (pre_value, post_value) => {
            if pre_value != post_value {
                out.push(Delta::Modification {
                    path: path.clone(),
                    pre: pre_value.clone(),
                    post: post_value.clone(),
                });
            }
        }
    }
}

fn walk_array_positional(
    path: &Path,
    pre_items: &[Value],
    post_items: &[Value],
    ids: &ArrayIdentityMap,
    out: &mut Vec<Delta>,
) {
    let common = pre_items.len().min(post_items.len());
    for index in 0..common {
        walk(
            &path.child_index(index),
            &pre_items[index],
            &post_items[index],
            ids,
            out,
        );
    }
    for (index, item) in post_items.iter().enumerate().skip(common) {
        out.push(Delta::Addition {
            path: path.child_index(index),
            added: item.clone(),
        });
    }
    for (index, item) in pre_items.iter().enumerate().skip(common) {
        out.push(Delta::Removal {
            path: path.child_index(index),
            removed: item.clone(),
        });
    }
}

/// The identity values of one array element, in declared id-path order
///
/// `None` marks an element missing one of its identity fields; such an
/// element never matches anything and falls through to addition/removal.
fn identity_values<'a>(element: &'a Value, id_paths: &[Path]) -> Option<Vec<&'a Value>> {
    id_paths.iter().map(|p| resolve(element, p)).collect()
}

fn walk_array_by_identity(
    path: &Path,
    pre_items: &[Value],
    post_items: &[Value],
    id_paths: &[Path],
    ids: &ArrayIdentityMap,
    out: &mut Vec<Delta>,
) {
    let pre_ids: Vec<Option<Vec<&Value>>> = pre_items
        .iter()
        .map(|item| identity_values(item, id_paths))
        .collect();
    let mut matched_pre = vec![false; pre_items.len()];

    for (post_index, post_item) in post_items.iter().enumerate() {
        let post_path = path.child_index(post_index);
        let post_id = identity_values(post_item, id_paths);
        let matched = post_id.as_ref().and_then(|post_id| {
            pre_ids.iter().enumerate().find_map(|(pre_index, pre_id)| {
                (!matched_pre[pre_index] && pre_id.as_ref() == Some(post_id)).then_some(pre_index)
            })
        });
        match matched {
            Some(pre_index) => {
                matched_pre[pre_index] = true;
                if pre_index != post_index {
                    out.push(Delta::Move {
                        from: path.child_index(pre_index),
                        to: post_path.clone(),
                        moved: post_item.clone(),
                    });
                }
                walk(&post_path, &pre_items[pre_index], post_item, ids, out);
            }
            None => out.push(Delta::Addition {
                path: post_path,
                added: post_item.clone(),
            }),
        }
    }

    for (pre_index, item) in pre_items.iter().enumerate() {
        if !matched_pre[pre_index] {
            out.push(Delta::Removal {
                path: path.child_index(pre_index),
                removed: item.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn test_equal_documents_are_same() {
        let doc = json!({"login": "jdoe", "sites": [{"_id": "a"}]});
        let diff = diff_documents(&doc, &doc.clone(), &site_ids());
        assert!(diff.same());
        assert_eq!(diff.num_changed_fields(), 0);
    }

    #[test]
    fn test_scalar_modification() {
        let pre = json!({"personalInfo": {"company": "X"}});
        let post = json!({"personalInfo": {"company": "Y"}});
        let diff = diff_documents(&pre, &post, &ArrayIdentityMap::new());
        assert_eq!(
            diff.deltas(),
            &[Delta::Modification {
                path: path("personalInfo.company"),
                pre: json!("X"),
                post: json!("Y"),
            }]
        );
    }

    #[test]
    fn test_field_addition_and_removal() {
        let pre = json!({"login": "jdoe", "nick": "jd"});
        let post = json!({"login": "jdoe", "title": "dev"});
        let diff = diff_documents(&pre, &post, &ArrayIdentityMap::new());
        assert_eq!(
            diff.deltas(),
            &[
                Delta::Removal {
                    path: path("nick"),
                    removed: json!("jd"),
                },
                Delta::Addition {
                    path: path("title"),
                    added: json!("dev"),
                },
            ]
        );
    }

    #[test]
    fn test_type_change_is_modification() {
        let pre = json!({"value": 1});
        let post = json!({"value": "1"});
        let diff = diff_documents(&pre, &post, &ArrayIdentityMap::new());
        assert_eq!(diff.num_changed_fields(), 1);
        assert!(matches!(diff.deltas()[0], Delta::Modification { .. }));
    }

    #[test]
    fn test_positional_array_compare() {
        let pre = json!({"tags": ["a", "b", "c"]});
        let post = json!({"tags": ["a", "x"]});
        let diff = diff_documents(&pre, &post, &ArrayIdentityMap::new());
        assert_eq!(
            diff.deltas(),
            &[
                Delta::Modification {
                    path: path("tags.1"),
                    pre: json!("b"),
                    post: json!("x"),
                },
                Delta::Removal {
                    path: path("tags.2"),
                    removed: json!("c"),
                },
            ]
        );
    }

    #[test]
    fn test_identity_match_survives_reorder() {
        let pre = json!({"sites": [
            {"_id": "a", "siteType": "shipping"},
            {"_id": "b", "siteType": "billing"}
        ]});
        let post = json!({"sites": [
            {"_id": "b", "siteType": "billing"},
            {"_id": "a", "siteType": "shipping"}
        ]});
        let diff = diff_documents(&pre, &post, &site_ids());
        assert_eq!(
            diff.deltas(),
            &[
                Delta::Move {
                    from: path("sites.1"),
                    to: path("sites.0"),
                    moved: json!({"_id": "b", "siteType": "billing"}),
                },
                Delta::Move {
                    from: path("sites.0"),
                    to: path("sites.1"),
                    moved: json!({"_id": "a", "siteType": "shipping"}),
                },
            ]
        );
        // Pure reorders change no fields
        assert_eq!(diff.num_changed_fields(), 0);
        assert!(!diff.same());
    }

    #[test]
    fn test_identity_match_with_content_change() {
        let pre = json!({"sites": [
            {"_id": "a", "siteType": "shipping"},
            {"_id": "b", "siteType": "billing"}
        ]});
        let post = json!({"sites": [
            {"_id": "b", "siteType": "primary"},
            {"_id": "a", "siteType": "shipping"}
        ]});
        let diff = diff_documents(&pre, &post, &site_ids());
        // Content deltas land at the element's post-document path
        assert_eq!(
            diff.deltas(),
            &[
                Delta::Move {
                    from: path("sites.1"),
                    to: path("sites.0"),
                    moved: json!({"_id": "b", "siteType": "primary"}),
                },
                Delta::Modification {
                    path: path("sites.0.siteType"),
                    pre: json!("billing"),
                    post: json!("primary"),
                },
                Delta::Move {
                    from: path("sites.0"),
                    to: path("sites.1"),
                    moved: json!({"_id": "a", "siteType": "shipping"}),
                },
            ]
        );
        assert_eq!(diff.num_changed_fields(), 1);
    }

    #[test]
    fn test_identity_addition_and_removal() {
        let pre = json!({"sites": [
            {"_id": "a", "siteType": "shipping"},
            {"_id": "b", "siteType": "billing"}
        ]});
        let post = json!({"sites": [
            {"_id": "a", "siteType": "shipping"},
            {"_id": "c", "siteType": "office"}
        ]});
        let diff = diff_documents(&pre, &post, &site_ids());
        assert_eq!(
            diff.deltas(),
            &[
                Delta::Addition {
                    path: path("sites.1"),
                    added: json!({"_id": "c", "siteType": "office"}),
                },
                Delta::Removal {
                    path: path("sites.1"),
                    removed: json!({"_id": "b", "siteType": "billing"}),
                },
            ]
        );
    }

    #[test]
    fn test_element_without_identity_never_matches() {
        let pre = json!({"sites": [{"siteType": "shipping"}]});
        let post = json!({"sites": [{"siteType": "shipping"}]});
        // Equal documents short-circuit before matching matters
        assert!(diff_documents(&pre, &post, &site_ids()).same());

        let post_changed = json!({"sites": [{"siteType": "billing"}]});
        let diff = diff_documents(&pre, &post_changed, &site_ids());
        assert_eq!(
            diff.deltas(),
            &[
                Delta::Addition {
                    path: path("sites.0"),
                    added: json!({"siteType": "billing"}),
                },
                Delta::Removal {
                    path: path("sites.0"),
                    removed: json!({"siteType": "shipping"}),
                },
            ]
        );
    }

    #[test]
    fn test_nested_array_identity_via_wildcard_key() {
        let mut ids = ArrayIdentityMap::new();
        ids.insert(path("addresses"), vec![path("_id")]);
        ids.insert(path("addresses.*.phones"), vec![path("number")]);

        let pre = json!({"addresses": [
            {"_id": "h", "phones": [{"number": "1"}, {"number": "2"}]}
        ]});
        let post = json!({"addresses": [
            {"_id": "h", "phones": [{"number": "2"}, {"number": "1"}]}
        ]});
        let diff = diff_documents(&pre, &post, &ids);
        assert_eq!(diff.num_changed_fields(), 0);
        assert_eq!(
            diff.deltas()
                .iter()
                .filter(|delta| delta.is_move())
                .count(),
            2
        );
    }

    #[test]
    fn test_duplicate_identities_match_greedily() {
        let pre = json!({"sites": [
            {"_id": "a", "n": 1},
            {"_id": "a", "n": 2}
        ]});
        let post = json!({"sites": [
            {"_id": "a", "n": 2},
            {"_id": "a", "n": 1}
        ]});
        let diff = diff_documents(&pre, &post, &site_ids());
        // First post element grabs the first unmatched pre element
        assert_eq!(diff.num_changed_fields(), 2);
    }

    #[test]
    fn test_null_versus_value() {
        let pre = json!({"middleName": null});
        let post = json!({"middleName": "Q"});
        let diff = diff_documents(&pre, &post, &ArrayIdentityMap::new());
        assert_eq!(
            diff.deltas(),
            &[Delta::Modification {
                path: path("middleName"),
                pre: json!(null),
                post: json!("Q"),
            }]
        );
    }
}
