//! Array element identity metadata and projection augmentation.
//!
//! Entity metadata names, per array field, the paths (relative to an
//! element) that identify an element across document versions. The diff
//! engine uses these to match elements by identity instead of position,
//! and projections are augmented so the identifying fields always survive
//! into the notification payload.

use crate::path::{Path, PathSegment};
use crate::projection::{FieldProjection, Projection};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identity paths for array fields, keyed by array path pattern
///
/// Keys may contain wildcards (`addresses.*.phones`), so nested arrays can
/// share one declaration. Values are element-relative paths; a compound
/// identity lists several.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArrayIdentityMap {
    map: BTreeMap<Path, Vec<Path>>,
}

impl ArrayIdentityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the identity paths for an array field pattern
    pub fn insert(&mut self, array: Path, id_paths: Vec<Path>) {
        self.map.insert(array, id_paths);
    }

    /// The identity paths declared for exactly this key
    pub fn get(&self, array: &Path) -> Option<&[Path]> {
        self.map.get(array).map(Vec::as_slice)
    }

    /// The identity paths applying to a concrete array path
    ///
    /// Wildcard keys match, so `addresses.*.phones` covers
    /// `addresses.2.phones`.
    pub fn identity_for(&self, array: &Path) -> Option<&[Path]> {
        self.map
            .iter()
            .find(|(key, _)| key.matches(array))
            .map(|(_, paths)| paths.as_slice())
    }

    /// Declared entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &[Path])> {
        self.map.iter().map(|(key, paths)| (key, paths.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Extend a projection so declared array identity fields are included
///
/// For every array the projection touches, each identity field that the
/// projection does not already include gains a recursive include rule at
/// `array.*.id_path`. Arrays the projection never reaches are left alone,
/// so augmentation cannot widen the set of arrays a payload covers, only
/// deepen the elements it already carries.
pub fn augment(projection: &Projection, ids: &ArrayIdentityMap) -> Projection {
    let mut additions = Vec::new();
    for (array, id_paths) in ids.iter() {
        if !projection.touches(array) {
            continue;
        }
        for id_path in id_paths {
            let full = array.child(PathSegment::Any).join(id_path);
            if !projection.is_included(&full) {
                additions.push(Projection::Field(FieldProjection::new(full, true, true)));
            }
        }
    }
    if additions.is_empty() {
        projection.clone()
    } else {
        projection.add(Projection::List(additions))
    }
}
