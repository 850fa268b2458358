use crate::notification::NotificationEntity;
use docwatch_core_types::{RunId, TraceId};
use thiserror::Error;

/// Result type alias using DocWatchError
pub type Result<T> = std::result::Result<T, DocWatchError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// in the docwatch engine. Each kind maps to a stable error code that can be
/// used for programmatic error handling, testing, and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DwErrorKind {
    // Configuration
    /// Hook invoked with a configuration object of the wrong kind (fatal)
    InvalidConfiguration,

    // Path / Projection
    InvalidPath,
    InvalidProjection,

    // Comparison
    /// A document could not be parsed or projected into comparable form
    InvalidDocument,
    /// Projection or diff failed while comparing one document pair
    ComparisonFailed,

    // Submission
    /// The downstream store rejected the assembled notification
    SubmissionRejected,

    // Integration
    Serialization,

    // Internal
    Internal,
}

impl DwErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            DwErrorKind::InvalidConfiguration => "ERR_INVALID_CONFIGURATION",
            DwErrorKind::InvalidPath => "ERR_INVALID_PATH",
            DwErrorKind::InvalidProjection => "ERR_INVALID_PROJECTION",
            DwErrorKind::InvalidDocument => "ERR_INVALID_DOCUMENT",
            DwErrorKind::ComparisonFailed => "ERR_COMPARISON_FAILED",
            DwErrorKind::SubmissionRejected => "ERR_SUBMISSION_REJECTED",
            DwErrorKind::Serialization => "ERR_SERIALIZATION",
            DwErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// This error type provides a structured representation of errors with
/// classification fields for programmatic handling and rich context for
/// debugging.
#[derive(Debug, Clone)]
pub struct DwError {
    kind: DwErrorKind,
    op: Option<String>,
    entity_name: Option<String>,
    path: Option<String>,
    doc_index: Option<usize>,
    run_id: Option<RunId>,
    trace_id: Option<TraceId>,
    message: String,
    source: Option<Box<DwError>>,
    errors: Option<Vec<String>>,
    data_errors: Option<Vec<String>>,
}

impl DwError {
    /// Create a new error with the specified kind
    pub fn new(kind: DwErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_name: None,
            path: None,
            doc_index: None,
            run_id: None,
            trace_id: None,
            message: String::new(),
            source: None,
            errors: None,
            data_errors: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity name context
    pub fn with_entity_name(mut self, name: impl Into<String>) -> Self {
        self.entity_name = Some(name.into());
        self
    }

    /// Add document path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add batch position context
    pub fn with_doc_index(mut self, doc_index: usize) -> Self {
        self.doc_index = Some(doc_index);
        self
    }

    /// Add run ID context
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Add trace ID context
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: DwError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Add submitter-reported validation errors (used for SubmissionRejected)
    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Add submitter-reported data errors (used for SubmissionRejected)
    pub fn with_data_errors(mut self, data_errors: Vec<String>) -> Self {
        self.data_errors = Some(data_errors);
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> DwErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity name context, if any
    pub fn entity_name(&self) -> Option<&str> {
        self.entity_name.as_deref()
    }

    /// Get the document path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the batch position context, if any
    pub fn doc_index(&self) -> Option<usize> {
        self.doc_index
    }

    /// Get the run ID context, if any
    pub fn run_id(&self) -> Option<&RunId> {
        self.run_id.as_ref()
    }

    /// Get the trace ID context, if any
    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&DwError> {
        self.source.as_deref()
    }

    /// Get submitter-reported errors, if any (populated on SubmissionRejected)
    pub fn errors(&self) -> Option<&[String]> {
        self.errors.as_deref()
    }

    /// Get submitter-reported data errors, if any (populated on SubmissionRejected)
    pub fn data_errors(&self) -> Option<&[String]> {
        self.data_errors.as_deref()
    }
}

impl std::fmt::Display for DwError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_name) = &self.entity_name {
            write!(f, " (entity_name: {})", entity_name)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(doc_index) = self.doc_index {
            write!(f, " (doc_index: {})", doc_index)?;
        }
        Ok(())
    }
}

impl std::error::Error for DwError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

// ========== End Error Facility ==========

/// Comprehensive error taxonomy for docwatch operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocWatchError {
    // ===== Configuration Errors =====
    /// Hook was handed a configuration of the wrong kind
    #[error("Hook '{hook}' received configuration of wrong kind: {found}")]
    WrongConfigurationKind { hook: String, found: String },

    // ===== Path / Projection Errors =====
    /// A field path could not be parsed from its string form
    #[error("Invalid path '{path}': {reason}")]
    PathParse { path: String, reason: String },

    /// A projection rule set failed validation
    #[error("Invalid projection: {reason}")]
    InvalidProjection { reason: String },

    // ===== Comparison Errors =====
    /// A document could not be parsed into a JSON tree
    #[error("Invalid document: {message}")]
    InvalidDocument { message: String },

    /// Projection or diff failed while comparing one document pair
    #[error("Comparison failed at '{path}': {message}")]
    ComparisonFailed { path: String, message: String },

    // ===== Submission Errors =====
    /// The downstream store rejected the notification; carries the attempted
    /// entity and the full error lists so the caller can decide on retry
    #[error("Notification submission rejected for entity '{entity_name}' ({error_count} errors, {data_error_count} data errors)",
        entity_name = .entity.entity_name,
        error_count = .errors.len(),
        data_error_count = .data_errors.len())]
    SubmissionRejected {
        entity: Box<NotificationEntity>,
        errors: Vec<String>,
        data_errors: Vec<String>,
    },

    // ===== Generic Errors =====
    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Conversion from DocWatchError to DwError
///
/// This maps the ergonomic internal enum onto the canonical structured error
/// facility at reporting boundaries (logging, host-facing surfaces).
impl From<DocWatchError> for DwError {
    fn from(err: DocWatchError) -> Self {
        match err {
            DocWatchError::WrongConfigurationKind { hook, found } => {
                DwError::new(DwErrorKind::InvalidConfiguration)
                    .with_op("process_hook")
                    .with_message(format!(
                        "Hook '{}' received configuration of wrong kind: {}",
                        hook, found
                    ))
            }

            DocWatchError::PathParse { path, reason } => DwError::new(DwErrorKind::InvalidPath)
                .with_path(path)
                .with_message(format!("Invalid path: {}", reason)),

            DocWatchError::InvalidProjection { reason } => {
                DwError::new(DwErrorKind::InvalidProjection)
                    .with_message(format!("Invalid projection: {}", reason))
            }

            DocWatchError::InvalidDocument { message } => {
                DwError::new(DwErrorKind::InvalidDocument).with_message(message)
            }

            DocWatchError::ComparisonFailed { path, message } => {
                DwError::new(DwErrorKind::ComparisonFailed)
                    .with_path(path)
                    .with_message(message)
            }

            DocWatchError::SubmissionRejected {
                entity,
                errors,
                data_errors,
            } => DwError::new(DwErrorKind::SubmissionRejected)
                .with_op("submit")
                .with_entity_name(entity.entity_name.clone())
                .with_errors(errors)
                .with_data_errors(data_errors)
                .with_message("Notification submission rejected"),

            DocWatchError::Serialization { message } => {
                DwError::new(DwErrorKind::Serialization).with_message(message)
            }

            DocWatchError::Internal { message } => {
                DwError::new(DwErrorKind::Internal).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to DocWatchError
impl From<serde_json::Error> for DocWatchError {
    fn from(err: serde_json::Error) -> Self {
        DocWatchError::Serialization {
            message: err.to_string(),
        }
    }
}
