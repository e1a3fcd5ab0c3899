//! Optional TOML configuration file
//!
//! ```toml
//! [report]
//! stats = true
//! doc_changes = true
//!
//! [diff]
//! parallel = true
//! ```
//!
//! Every key defaults to `false`. Flags given on the command line can only
//! switch options on.

use apidiff_core::errors::{ExError, ExErrorKind};
use apidiff_core::ReportOptions;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub report: ReportOptions,
    pub diff: DiffSection,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiffSection {
    pub parallel: bool,
}

/// Read a config file
pub fn load_config(path: &Path) -> Result<ConfigFile, ExError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ExError::new(ExErrorKind::Io)
            .with_op("load_config")
            .with_message(format!("{}: {}", path.display(), e))
    })?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<ConfigFile, ExError> {
    toml::from_str(content).map_err(|e| {
        ExError::new(ExErrorKind::InvalidConfig)
            .with_op("load_config")
            .with_message(e.to_string())
    })
}
