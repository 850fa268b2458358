//! DocWatch Core - Document change-notification engine
//!
//! This crate watches before/after images of JSON documents and turns
//! watched changes into notification entities, including:
//! - Dot-notation paths with array wildcards and document resolution
//! - Field projections with include/exclude rules and recursion
//! - A structural diff engine with identity-based array matching
//! - Payload assembly from diffs, projections, and entity metadata
//! - The notification hook that drives batches of write events through
//!   comparison and hands results to an injected submitter
//!
//! Configuration and metadata are plain serde models so they can be
//! stored alongside the watched entities.

pub mod assemble;
pub mod config;
pub mod diff;
pub mod errors;
pub mod flatten;
pub mod hook;
pub mod identity;
pub mod logging_facility;
pub mod metadata;
pub mod notification;
pub mod path;
pub mod projection;
pub mod projector;

// Re-export commonly used types
pub use assemble::{build_if_changed, compare_documents, should_notify};
pub use config::{HookConfiguration, NotificationHookConfiguration};
pub use diff::{diff_documents, Delta, Difference};
pub use errors::{DocWatchError, DwError, DwErrorKind, Result};
pub use flatten::flatten;
pub use hook::{
    CrudOperation, HookDoc, NotificationHook, NotificationSubmitter, SubmissionReport,
};
pub use identity::{augment, ArrayIdentityMap};
pub use metadata::EntityMetadata;
pub use notification::{NotificationEntity, NotificationStatus, Operation, PathAndValue};
pub use path::{resolve, Path, PathSegment};
pub use projection::{FieldProjection, Inclusion, Projection};
pub use projector::project;
