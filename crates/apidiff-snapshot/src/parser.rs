//! Snapshot parser with validation
//!
//! Parses JSON or YAML, checks the schema version before the typed decode
//! so that documents from a future format get a precise error, then decodes
//! strictly.

#![allow(clippy::result_large_err)]

use crate::errors::{invalid_snapshot, io_error, unsupported_schema_version, Result};
use crate::format_v1::{SnapshotV1, SCHEMA_VERSION};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Serialization of a snapshot document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    /// Pick the format from a file extension (`.json`, `.yaml`, `.yml`)
    ///
    /// # Errors
    ///
    /// `InvalidSnapshot` for any other or a missing extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => Ok(SnapshotFormat::Json),
            Some("yaml") | Some("yml") => Ok(SnapshotFormat::Yaml),
            _ => Err(invalid_snapshot(&format!(
                "Cannot infer snapshot format of {}: expected .json, .yaml or .yml",
                path.display()
            ))),
        }
    }
}

/// Parse a snapshot file from a path
///
/// # Errors
///
/// `Io` if the file cannot be read, otherwise as [`parse_snapshot_str`].
pub fn parse_snapshot_file(path: &Path) -> Result<SnapshotV1> {
    let format = SnapshotFormat::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|e| io_error("snapshot_read", e))?;
    parse_snapshot_str(&content, format)
}

/// Parse a snapshot from a string
///
/// # Errors
///
/// - `InvalidSnapshot` for malformed JSON/YAML, unknown keys, wrong types
///   or an empty `api_name`
/// - `UnsupportedSchemaVersion` when `schema_version` is not 1
pub fn parse_snapshot_str(content: &str, format: SnapshotFormat) -> Result<SnapshotV1> {
    let raw: Value = match format {
        SnapshotFormat::Json => serde_json::from_str(content)
            .map_err(|e| invalid_snapshot(&format!("JSON parse error: {}", e)))?,
        SnapshotFormat::Yaml => serde_yaml::from_str(content)
            .map_err(|e| invalid_snapshot(&format!("YAML parse error: {}", e)))?,
    };

    check_schema_version(&raw)?;

    let snapshot: SnapshotV1 = serde_json::from_value(raw)
        .map_err(|e| invalid_snapshot(&format!("Invalid snapshot document: {}", e)))?;

    validate_snapshot(&snapshot)?;

    Ok(snapshot)
}

fn check_schema_version(raw: &Value) -> Result<()> {
    let obj = raw
        .as_object()
        .ok_or_else(|| invalid_snapshot("Snapshot root must be a mapping"))?;

    match obj.get("schema_version") {
        None => Err(invalid_snapshot("Missing required field `schema_version`")),
        Some(v) => match v.as_u64() {
            Some(n) if n == u64::from(SCHEMA_VERSION) => Ok(()),
            Some(n) => Err(unsupported_schema_version(&n.to_string())),
            None => Err(invalid_snapshot(&format!(
                "`schema_version` must be an unsigned integer, got: {}",
                v
            ))),
        },
    }
}

/// Document-level checks; declaration-level checks belong to the model builder
fn validate_snapshot(snapshot: &SnapshotV1) -> Result<()> {
    if snapshot.api_name.trim().is_empty() {
        return Err(invalid_snapshot("`api_name` must not be empty"));
    }
    Ok(())
}
