//! Document comparison output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! Delta ordering follows the canonical depth-first traversal of the
//! engine, so identical inputs serialize identically.

use crate::path::Path;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One elementary difference between two document versions.
///
/// Paths address the document in which the payload lives: additions and
/// modifications carry post-document paths, removals carry pre-document
/// paths, and moves carry both sides of the relocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Delta {
    /// A node present only in the post document
    Addition {
        /// Path of the node in the post document
        path: Path,
        /// The added content
        added: Value,
    },
    /// A node present only in the pre document
    Removal {
        /// Path of the node in the pre document
        path: Path,
        /// The removed content
        removed: Value,
    },
    /// A node present in both documents with different content
    Modification {
        /// Path of the node in the post document
        path: Path,
        /// Content in the pre document
        pre: Value,
        /// Content in the post document
        post: Value,
    },
    /// An array element whose identity matched at a different index
    Move {
        /// Element path in the pre document
        from: Path,
        /// Element path in the post document
        to: Path,
        /// The element content as found in the post document
        moved: Value,
    },
}

impl Delta {
    /// The path where this delta lands in the newer document
    ///
    /// For removals this is the pre-document path, the only address the
    /// vanished node has.
    pub fn path(&self) -> &Path {
        match self {
            Delta::Addition { path, .. } => path,
            Delta::Removal { path, .. } => path,
            Delta::Modification { path, .. } => path,
            Delta::Move { to, .. } => to,
        }
    }

    pub fn is_move(&self) -> bool {
        matches!(self, Delta::Move { .. })
    }
}

/// The full comparison result between two document versions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Difference {
    deltas: Vec<Delta>,
}

impl Difference {
    pub fn new(deltas: Vec<Delta>) -> Self {
        Self { deltas }
    }

    /// True when the documents are equal up to array element moves
    ///
    /// A pure reorder of identity-matched elements yields moves only, and
    /// `same` stays false; callers that treat ordering as insignificant
    /// must check [`Difference::num_changed_fields`] instead.
    pub fn same(&self) -> bool {
        self.deltas.is_empty()
    }

    /// Number of deltas that change content, moves excluded
    pub fn num_changed_fields(&self) -> usize {
        self.deltas.iter().filter(|d| !d.is_move()).count()
    }

    /// All deltas in canonical order
    pub fn deltas(&self) -> &[Delta] {
        &self.deltas
    }

    pub fn into_deltas(self) -> Vec<Delta> {
        self.deltas
    }
}
