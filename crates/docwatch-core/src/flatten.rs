//! Flattening of document subtrees into path/value pairs.
//!
//! Notification payloads carry leaf values only. Flattening walks a
//! subtree depth-first and emits one [`PathAndValue`] per leaf: objects
//! contribute their fields in key order, arrays their elements in index
//! order, and empty containers contribute nothing.

use crate::notification::PathAndValue;
use crate::path::{Path, PathSegment};
use serde_json::Value;

/// Flatten a subtree rooted at `prefix` into leaf path/value pairs
pub fn flatten(prefix: &Path, node: &Value) -> Vec<PathAndValue> {
    let mut out = Vec::new();
    flatten_into(prefix, node, &mut out);
    out
}

/// Flatten into an existing collection, skipping paths already present
///
/// Deduplication keys on the path string, so a pair contributed earlier
/// (typically an identity field) wins over a later duplicate.
pub fn flatten_into(prefix: &Path, node: &Value, out: &mut Vec<PathAndValue>) {
    match node {
        Value::Object(fields) => {
            for (name, child) in fields {
                flatten_into(&prefix.child_field(name), child, out);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(&prefix.child(PathSegment::Index(index)), child, out);
            }
        }
        leaf => {
            let path = prefix.to_string();
            if !out.iter().any(|pair| pair.path == path) {
                out.push(PathAndValue {
                    path,
                    value: leaf_text(leaf),
                });
            }
        }
    }
}

/// Render a leaf as payload text
///
/// Strings carry their content without quoting; null carries no value at
/// all, which is how consumers distinguish "field is null" from an empty
/// string.
fn leaf_text(leaf: &Value) -> Option<String> {
    match leaf {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(s: &str) -> Path {
        Path::parse(s).unwrap()
    }

    fn pair(path: &str, value: &str) -> PathAndValue {
        PathAndValue {
            path: path.to_string(),
            value: Some(value.to_string()),
        }
    }

    #[test]
    fn test_scalar_leaves() {
        let node = json!({"company": "Initrode", "staff": 42, "active": true});
        let pairs = flatten(&path("personalInfo"), &node);
        assert_eq!(
            pairs,
            vec![
                pair("personalInfo.active", "true"),
                pair("personalInfo.company", "Initrode"),
                pair("personalInfo.staff", "42"),
            ]
        );
    }

    #[test]
    fn test_string_values_unquoted() {
        let pairs = flatten(&path("login"), &json!("jdoe"));
        assert_eq!(pairs, vec![pair("login", "jdoe")]);
    }

    #[test]
    fn test_null_has_no_value() {
        let pairs = flatten(&path("middleName"), &json!(null));
        assert_eq!(
            pairs,
            vec![PathAndValue {
                path: "middleName".to_string(),
                value: None,
            }]
        );
    }

    #[test]
    fn test_arrays_flatten_in_index_order() {
        let node = json!([{"siteType": "shipping"}, {"siteType": "billing"}]);
        let pairs = flatten(&path("sites"), &node);
        assert_eq!(
            pairs,
            vec![
                pair("sites.0.siteType", "shipping"),
                pair("sites.1.siteType", "billing"),
            ]
        );
    }

    #[test]
    fn test_empty_containers_contribute_nothing() {
        assert!(flatten(&path("sites"), &json!([])).is_empty());
        assert!(flatten(&path("personalInfo"), &json!({})).is_empty());
        let node = json!({"inner": {}, "kept": 1});
        assert_eq!(flatten(&path("outer"), &node), vec![pair("outer.kept", "1")]);
    }

    #[test]
    fn test_flatten_into_dedups_on_path() {
        let mut out = vec![pair("sites.0._id", "a")];
        flatten_into(
            &path("sites.0"),
            &json!({"_id": "a", "siteType": "shipping"}),
            &mut out,
        );
        assert_eq!(
            out,
            vec![pair("sites.0._id", "a"), pair("sites.0.siteType", "shipping")]
        );
    }

    #[test]
    fn test_object_keys_sorted() {
        let node = json!({"zeta": 1, "alpha": 2});
        let pairs = flatten(&path("x"), &node);
        assert_eq!(pairs, vec![pair("x.alpha", "2"), pair("x.zeta", "1")]);
    }
}
