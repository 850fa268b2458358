//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operations.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use docwatch_core::log_op_start;
/// log_op_start!("process_hook");
/// log_op_start!("process_hook", entity_name = "user");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = docwatch_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = docwatch_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use docwatch_core::log_op_end;
/// log_op_end!("process_hook", duration_ms = 42);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = docwatch_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = docwatch_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// # Example
///
/// ```ignore
/// # use docwatch_core::{log_op_error, errors::DocWatchError};
/// let err = DocWatchError::InvalidDocument { message: "truncated".to_string() };
/// log_op_error!("compare_docs", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        use $crate::errors::DwError;
        let dw_err: DwError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = docwatch_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?dw_err.kind(),
            err.code = dw_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        use $crate::errors::DwError;
        let dw_err: DwError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = docwatch_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?dw_err.kind(),
            err.code = dw_err.code(),
            $($field)*
        );
    }};
}
