//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_RUN_ID: &str = "run_id";
pub const FIELD_TRACE_ID: &str = "trace_id";

// Entity identifiers
pub const FIELD_HOOK: &str = "hook";
pub const FIELD_ENTITY_NAME: &str = "entity_name";
pub const FIELD_ENTITY_VERSION: &str = "entity_version";
pub const FIELD_DOC_INDEX: &str = "doc_index";

// Diff and payload sizes
pub const FIELD_DELTA_COUNT: &str = "delta_count";
pub const FIELD_CHANGED_FIELDS: &str = "changed_fields";
pub const FIELD_PAYLOAD_LEN: &str = "payload_len";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
