//! Applies a projection to a document, producing the projected subtree.
//!
//! Projection walks the document top-down. An included child is copied
//! (scalars) or recursed into (containers). A container that is not itself
//! included is still descended into when some rule could include a path
//! beneath it, and is kept only if the descent produced anything. Arrays
//! are compacted: excluded elements are dropped, not replaced by holes.

use crate::path::{Path, PathSegment};
use crate::projection::Projection;
use serde_json::{Map, Value};

/// Project a document down to the paths a projection includes
///
/// Non-container roots are returned unchanged; a projection only
/// discriminates between fields, and a bare scalar has none.
pub fn project(doc: &Value, projection: &Projection) -> Value {
    match doc {
        Value::Object(_) | Value::Array(_) => {
            project_node(doc, &Path::root(), projection).unwrap_or_else(empty_like(doc))
        }
        other => other.clone(),
    }
}

fn empty_like(doc: &Value) -> impl Fn() -> Value + '_ {
    move || match doc {
        Value::Array(_) => Value::Array(Vec::new()),
        _ => Value::Object(Map::new()),
    }
}

/// Project one container node, returning `None` when nothing beneath the
/// node survives the projection.
fn project_node(node: &Value, path: &Path, projection: &Projection) -> Option<Value> {
    match node {
        Value::Object(fields) => {
            let mut out = Map::new();
            for (name, child) in fields {
                let child_path = path.child_field(name);
                if let Some(value) = project_child(child, &child_path, projection) {
                    out.insert(name.clone(), value);
                }
            }
            if out.is_empty() {
                None
            } else {
                Some(Value::Object(out))
            }
        }
        Value::Array(items) => {
            let mut out = Vec::new();
            for (index, child) in items.iter().enumerate() {
                let child_path = path.child(PathSegment::Index(index));
                if let Some(value) = project_child(child, &child_path, projection) {
                    out.push(value);
                }
            }
            if out.is_empty() {
                None
            } else {
                Some(Value::Array(out))
            }
        }
        // Leaves are handled by project_child; a leaf root never recurses here
        leaf => Some(leaf.clone()),
    }
}

fn project_child(child: &Value, child_path: &Path, projection: &Projection) -> Option<Value> {
    let included = projection.is_included(child_path);
    match child {
        Value::Object(_) | Value::Array(_) => {
            if included {
                // An included container keeps its (possibly empty) shell
                Some(project_included_container(child, child_path, projection))
            } else if projection.may_include_descendants(child_path) {
                project_node(child, child_path, projection)
            } else {
                None
            }
        }
        leaf => {
            if included {
                Some(leaf.clone())
            } else {
                None
            }
        }
    }
}

/// Recurse into a container that is itself included. Children excluded by
/// an explicit rule still drop out; everything undecided stays.
fn project_included_container(node: &Value, path: &Path, projection: &Projection) -> Value {
    match node {
        Value::Object(fields) => {
            let mut out = Map::new();
            for (name, child) in fields {
                let child_path = path.child_field(name);
                if let Some(value) = project_included_child(child, &child_path, projection) {
                    out.insert(name.clone(), value);
                }
            }
            Value::Object(out)
        }
        Value::Array(items) => {
            let mut out = Vec::new();
            for (index, child) in items.iter().enumerate() {
                let child_path = path.child(PathSegment::Index(index));
                if let Some(value) = project_included_child(child, &child_path, projection) {
                    out.push(value);
                }
            }
            Value::Array(out)
        }
        leaf => leaf.clone(),
    }
}

fn project_included_child(
    child: &Value,
    child_path: &Path,
    projection: &Projection,
) -> Option<Value> {
    if projection.is_included(child_path) {
        match child {
            Value::Object(_) | Value::Array(_) => {
                Some(project_included_container(child, child_path, projection))
            }
            leaf => Some(leaf.clone()),
        }
    } else {
        // Inside an included subtree only an explicit exclusion or a
        // non-recursive ancestor cuts a child off; either way, see if
        // anything deeper is still reachable.
        project_child(child, child_path, projection)
    }
}
