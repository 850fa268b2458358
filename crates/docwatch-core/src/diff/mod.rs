//! Document diff engine.
//!
//! Compares two versions of a document and produces a structured,
//! deterministic sequence of deltas for downstream notification assembly.
//!
//! ## Entry point
//!
//! ```ignore
//! use docwatch_core::diff::diff_documents;
//!
//! let diff = diff_documents(&pre, &post, &metadata.array_identities);
//! if diff.num_changed_fields() > 0 { /* notify */ }
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce identical delta sequences;
//!   object fields walk in key order, array elements in index order.
//! - **Identity matching**: arrays with declared element identity match
//!   elements across reorders, reporting relocations as moves rather than
//!   remove/add pairs.
//! - **Move neutrality**: moves never count toward changed fields, so a
//!   pure reorder fires a notification only when the caller opts in to
//!   ordering significance.

pub mod engine;
pub mod model;

pub use engine::diff_documents;
pub use model::{Delta, Difference};
