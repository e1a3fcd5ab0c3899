//! Operation logging macros
//!
//! One operation (`compute_diff`, `load_snapshot`, ...) emits a `start`
//! event, then either `end` with its duration or `end_error` with the
//! `ExError` code. Callers must depend on `apidiff-core-types`, which
//! supplies the event names.

/// Log the start of an operation
///
/// Extra fields follow `tracing` syntax and should use the keys of
/// `apidiff_core_types::schema` where one fits.
///
/// ```
/// # use apidiff_core::log_op_start;
/// log_op_start!("compute_diff", old_api = "lib-1.0", new_api = "lib-2.0");
/// log_op_start!("load_snapshot", api_name = "lib-1.0");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = apidiff_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = apidiff_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use apidiff_core::log_op_end;
/// log_op_end!("compute_diff", duration_ms = 42, record_count = 12, warning_count = 0);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = apidiff_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = apidiff_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// Anything convertible into `ExError` is accepted; the event carries its
/// kind and stable `ERR_*` code.
///
/// ```
/// # use apidiff_core::{log_op_error, errors::ApiDiffError};
/// let err = ApiDiffError::DuplicateIdentifier {
///     identifier: "com.example.Widget#resize(int)".to_string(),
/// };
/// log_op_error!("build_model", err, duration_ms = 3, api_name = "lib-1.0");
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        use $crate::errors::ExError;
        let ex_err: ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = apidiff_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            identifier = ex_err.identifier(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        use $crate::errors::ExError;
        let ex_err: ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = apidiff_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            identifier = ex_err.identifier(),
            $($field)*
        );
    }};
}
