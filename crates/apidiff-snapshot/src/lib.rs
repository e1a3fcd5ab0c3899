//! apidiff Snapshot - serialized API snapshots
//!
//! Provides:
//! - Snapshot document format v1 (JSON or YAML)
//! - Parser with schema-version validation
//! - Canonical SHA-256 digest of a document
//! - Loader building an `ApiModel` through the validating builder

pub mod digest;
pub mod errors;
pub mod format_v1;
pub mod loader;
pub mod parser;

// Re-export key types
pub use digest::compute_snapshot_digest;
pub use errors::Result;
pub use format_v1::SnapshotV1;
pub use loader::{build_model, load_snapshot, LoadedSnapshot};
pub use parser::{parse_snapshot_file, parse_snapshot_str, SnapshotFormat};
