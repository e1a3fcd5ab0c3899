//! Validate command
//!
//! Usage: apidiff validate <PATH>...

use apidiff_snapshot::load_snapshot;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Snapshot files (JSON or YAML)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

/// Execute validate command
///
/// Stops at the first snapshot that fails to load.
pub fn execute(args: ValidateArgs) -> Result<(), Box<dyn std::error::Error>> {
    for path in &args.paths {
        let loaded = load_snapshot(path, None)?;
        println!(
            "✓ {} ({}): {} packages, {} types, {} members (digest: {})",
            path.display(),
            loaded.api_name,
            loaded.model.package_count(),
            loaded.model.type_count(),
            loaded.model.member_count(),
            loaded.digest
        );
    }
    Ok(())
}
