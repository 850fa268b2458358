//! Comparison and payload assembly for one document write.
//!
//! The pipeline projects both document versions through the watch
//! projection, diffs the projected views, decides whether the change is
//! worth notifying about, and assembles the [`NotificationEntity`]
//! payload from the include projection plus the deltas.

use crate::config::NotificationHookConfiguration;
use crate::diff::{diff_documents, Delta, Difference};
use crate::errors::{DocWatchError, Result};
use crate::flatten::flatten_into;
use crate::identity::{augment, ArrayIdentityMap};
use crate::metadata::EntityMetadata;
use crate::notification::{NotificationEntity, NotificationStatus, Operation, PathAndValue};
use crate::path::{resolve, Path};
use crate::projection::Projection;
use crate::projector::project;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Compare the watched views of two document versions
///
/// An absent pre document compares as an empty object, so an insert shows
/// up as additions of every watched field present in the new document.
pub fn compare_documents(
    pre: Option<&Value>,
    post: &Value,
    watch: &Projection,
    ids: &ArrayIdentityMap,
) -> Difference {
    let post_view = project(post, watch);
    let pre_view = match pre {
        Some(doc) => project(doc, watch),
        None => Value::Object(serde_json::Map::new()),
    };
    diff_documents(&pre_view, &post_view, ids)
}

/// The fire decision
///
/// Content changes always notify. A diff consisting purely of array
/// element moves notifies only when ordering is significant.
pub fn should_notify(diff: &Difference, array_ordering_significant: bool) -> bool {
    !diff.same() && (diff.num_changed_fields() > 0 || array_ordering_significant)
}

/// Assemble the notification payload for a change that fires
///
/// Entity data carries the identity fields of the new document followed by
/// the flattened include-projected view; what changed is reported through
/// the path collections, not by copying changed values into entity data.
/// Two delta kinds add to entity data anyway: significantly relocated
/// elements (their content at the new index) and, on updates only, newly
/// added subtrees. An insert never copies added content since the whole
/// document is new and identity plus include already describe it.
///
/// # Errors
///
/// Returns `DocWatchError::InvalidDocument` if an identity field named by
/// the metadata is absent from the new document.
#[allow(clippy::too_many_arguments)]
pub fn build_entity(
    metadata: &EntityMetadata,
    diff: &Difference,
    post: &Value,
    include: &Projection,
    array_ordering_significant: bool,
    is_insert: bool,
    who: &str,
    when: DateTime<Utc>,
) -> Result<NotificationEntity> {
    let mut entity_data: Vec<PathAndValue> = Vec::new();
    let mut removed_entity_data: Vec<PathAndValue> = Vec::new();
    let mut updated_paths: Vec<String> = Vec::new();
    let mut removed_paths: Vec<String> = Vec::new();

    for identity_path in &metadata.identity_paths {
        let value = resolve(post, identity_path).ok_or_else(|| DocWatchError::InvalidDocument {
            message: format!("identity field '{}' missing from document", identity_path),
        })?;
        entity_data.push(PathAndValue::new(
            identity_path.to_string(),
            leaf_text(value),
        ));
    }

    let include_view = project(post, include);
    flatten_into(&Path::root(), &include_view, &mut entity_data);

    for delta in diff.deltas() {
        match delta {
            Delta::Move { to, moved, .. } => {
                if array_ordering_significant {
                    updated_paths.push(to.to_string());
                    flatten_into(to, moved, &mut entity_data);
                }
            }
            Delta::Removal { path, removed } => {
                if is_container(removed) {
                    removed_paths.push(path.to_string());
                    flatten_into(path, removed, &mut removed_entity_data);
                } else {
                    removed_entity_data.push(PathAndValue::new(path.to_string(), leaf_text(removed)));
                }
            }
            Delta::Addition { path, added } => {
                updated_paths.push(path.to_string());
                if !is_insert {
                    if is_container(added) {
                        flatten_into(path, added, &mut entity_data);
                    } else {
                        entity_data.push(PathAndValue::new(path.to_string(), leaf_text(added)));
                    }
                }
            }
            Delta::Modification { path, pre, .. } => {
                updated_paths.push(path.to_string());
                if is_container(pre) {
                    flatten_into(path, pre, &mut removed_entity_data);
                } else {
                    removed_entity_data.push(PathAndValue::new(path.to_string(), leaf_text(pre)));
                }
            }
        }
    }

    Ok(NotificationEntity {
        id: None,
        entity_name: metadata.entity_name.clone(),
        entity_version: metadata.entity_version.clone(),
        status: NotificationStatus::Unprocessed,
        operation: if is_insert {
            Operation::Insert
        } else {
            Operation::Update
        },
        client_request_principal: who.to_string(),
        client_request_date: when,
        processing_date: None,
        processed_date: None,
        entity_data,
        updated_paths,
        removed_entity_data,
        removed_paths,
    })
}

/// Compare, decide, and assemble in one call
///
/// Returns `Ok(None)` when the write does not change any watched field.
/// Identity fields of watched arrays are folded into the watch projection
/// before comparison so reorders of identified elements diff as moves.
pub fn build_if_changed(
    metadata: &EntityMetadata,
    config: &NotificationHookConfiguration,
    pre: Option<&Value>,
    post: &Value,
    who: &str,
    when: DateTime<Utc>,
) -> Result<Option<NotificationEntity>> {
    let watch = augment(&config.watch_projection, &metadata.array_identities);
    let diff = compare_documents(pre, post, &watch, &metadata.array_identities);
    if !should_notify(&diff, config.array_ordering_significant) {
        return Ok(None);
    }
    build_entity(
        metadata,
        &diff,
        post,
        &config.include_projection,
        config.array_ordering_significant,
        pre.is_none(),
        who,
        when,
    )
    .map(Some)
}

fn is_container(value: &Value) -> bool {
    value.is_object() || value.is_array()
}

fn leaf_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}
