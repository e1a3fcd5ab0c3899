//! Error handling for apidiff-snapshot
//!
//! Wraps apidiff-core ExError with snapshot-specific helpers

use apidiff_core::errors::{ApiDiffError, ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a snapshot document error
pub fn invalid_snapshot(reason: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidSnapshot)
        .with_op("snapshot_parse")
        .with_message(reason.to_string())
}

/// Create an unsupported schema version error
pub fn unsupported_schema_version(found: &str) -> ExError {
    ExError::new(ExErrorKind::UnsupportedSchemaVersion)
        .with_op("snapshot_parse")
        .with_message(format!(
            "Unsupported schema_version: {}. Expected 1",
            found
        ))
}

/// Wrap a builder rejection with the snapshot it came from
pub fn malformed_model(api_name: &str, err: ApiDiffError) -> ExError {
    ExError::from(err)
        .with_op("build_model")
        .with_api_name(api_name)
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
