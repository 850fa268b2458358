//! Entity metadata consumed by the notification pipeline.

use crate::identity::ArrayIdentityMap;
use crate::path::Path;
use serde::{Deserialize, Serialize};

/// Static description of a watched entity type
///
/// `identity_paths` name the fields that identify a document (always
/// carried in payloads); `array_identities` declare how array elements
/// are matched across versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMetadata {
    pub entity_name: String,
    pub entity_version: String,
    #[serde(default)]
    pub identity_paths: Vec<Path>,
    #[serde(default)]
    pub array_identities: ArrayIdentityMap,
}

impl EntityMetadata {
    pub fn new(entity_name: impl Into<String>, entity_version: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            entity_version: entity_version.into(),
            identity_paths: Vec::new(),
            array_identities: ArrayIdentityMap::new(),
        }
    }

    pub fn with_identity_paths(mut self, paths: Vec<Path>) -> Self {
        self.identity_paths = paths;
        self
    }

    pub fn with_array_identities(mut self, ids: ArrayIdentityMap) -> Self {
        self.array_identities = ids;
        self
    }
}
