//! Notification entity model and processing lifecycle.
//!
//! A [`NotificationEntity`] is the assembled payload describing what
//! changed in a watched document. Field names serialize in camelCase to
//! match the stored document shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One flattened leaf of a document subtree
///
/// `value` is `None` when the leaf was JSON null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathAndValue {
    pub path: String,
    pub value: Option<String>,
}

impl PathAndValue {
    pub fn new(path: impl Into<String>, value: Option<String>) -> Self {
        Self {
            path: path.into(),
            value,
        }
    }
}

/// The write that triggered a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// No earlier version of the document existed
    Insert,
    /// An earlier version was replaced
    Update,
}

/// Processing state of a notification
///
/// Valid transitions move strictly forward: unprocessed to processing,
/// processing to processed or failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Unprocessed,
    Processing,
    Processed,
    Failed,
}

impl NotificationStatus {
    /// True if moving from this status to `next` is a legal transition
    pub fn can_transition_to(self, next: NotificationStatus) -> bool {
        matches!(
            (self, next),
            (NotificationStatus::Unprocessed, NotificationStatus::Processing)
                | (NotificationStatus::Processing, NotificationStatus::Processed)
                | (NotificationStatus::Processing, NotificationStatus::Failed)
        )
    }
}

/// The assembled change notification for one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEntity {
    /// Storage identifier, absent until the entity is persisted
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none", default)]
    pub id: Option<String>,
    /// Name of the watched entity type
    pub entity_name: String,
    /// Schema version of the watched entity type
    pub entity_version: String,
    pub status: NotificationStatus,
    pub operation: Operation,
    /// Principal that performed the triggering write
    pub client_request_principal: String,
    /// When the triggering write happened
    pub client_request_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub processing_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub processed_date: Option<DateTime<Utc>>,
    /// Identity fields plus the include-projected view of the new document
    pub entity_data: Vec<PathAndValue>,
    /// Paths that were added, modified, or significantly relocated
    pub updated_paths: Vec<String>,
    /// Earlier values of modified paths and content of removed subtrees
    pub removed_entity_data: Vec<PathAndValue>,
    /// Paths of removed subtrees
    pub removed_paths: Vec<String>,
}

impl NotificationEntity {
    /// True if the payload carries a value for the exact path
    pub fn has_entity_data_for(&self, path: &str) -> bool {
        self.entity_data.iter().any(|pair| pair.path == path)
    }

    /// The payload value at the exact path, if carried
    pub fn entity_data_for(&self, path: &str) -> Option<&PathAndValue> {
        self.entity_data.iter().find(|pair| pair.path == path)
    }
}
