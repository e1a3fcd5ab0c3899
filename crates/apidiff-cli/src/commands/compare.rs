//! Compare command
//!
//! Usage: apidiff compare --old <PATH> --new <PATH> [--stats] [--output <PATH>]

use crate::config::load_config;
use apidiff_core::diff::{ChangeRecord, DiffWarning, StatisticsSummary, DIFF_SCHEMA_VERSION};
use apidiff_core::{compute_diff_with, DiffConfig, ExError, ExErrorKind, ReportOptions, ReportView};
use apidiff_snapshot::{load_snapshot, LoadedSnapshot};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Old snapshot (JSON or YAML)
    #[arg(long)]
    pub old: PathBuf,

    /// Display name for the old snapshot (defaults to its api_name)
    #[arg(long)]
    pub old_name: Option<String>,

    /// New snapshot (JSON or YAML)
    #[arg(long)]
    pub new: PathBuf,

    /// Display name for the new snapshot (defaults to its api_name)
    #[arg(long)]
    pub new_name: Option<String>,

    /// Write the report here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// TOML file with `[report]` and `[diff]` tables
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Include the statistics summary
    #[arg(long)]
    pub stats: bool,

    /// Show documentation differences
    #[arg(long)]
    pub doc_changes: bool,

    /// Only show incompatible changes
    #[arg(long = "incompatible")]
    pub incompatible_only: bool,

    /// Show native/synchronized modifier differences
    #[arg(long)]
    pub show_all_changes: bool,

    /// Also list unchanged declarations
    #[arg(long)]
    pub verbose: bool,

    /// Diff packages in parallel
    #[arg(long)]
    pub parallel: bool,
}

impl CompareArgs {
    fn report_options(&self) -> ReportOptions {
        ReportOptions {
            verbose: self.verbose,
            stats: self.stats,
            doc_changes: self.doc_changes,
            incompatible_only: self.incompatible_only,
            show_all_changes: self.show_all_changes,
        }
    }
}

#[derive(Debug, Serialize)]
struct SnapshotIdentity<'a> {
    api_name: &'a str,
    digest: &'a str,
}

/// JSON document written by `compare`
#[derive(Debug, Serialize)]
struct ComparisonReport<'a> {
    schema_version: u32,
    old: SnapshotIdentity<'a>,
    new: SnapshotIdentity<'a>,
    options: ReportOptions,
    has_changes: bool,
    records: Vec<ChangeRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    statistics: Option<&'a StatisticsSummary>,
    warnings: &'a [DiffWarning],
}

/// Execute compare command
pub fn execute(args: CompareArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (options, diff_config) = match &args.config {
        Some(path) => {
            let file = load_config(path)?;
            (
                file.report.union(args.report_options()),
                DiffConfig {
                    parallel: file.diff.parallel || args.parallel,
                },
            )
        }
        None => (
            args.report_options(),
            DiffConfig {
                parallel: args.parallel,
            },
        ),
    };

    // Pool threads do not inherit the run span
    let span = tracing::Span::current();
    let (old, new) = rayon::join(
        || span.in_scope(|| load_snapshot(&args.old, args.old_name.as_deref())),
        || span.in_scope(|| load_snapshot(&args.new, args.new_name.as_deref())),
    );
    let old: LoadedSnapshot = old?;
    let new: LoadedSnapshot = new?;

    let result = compute_diff_with(&old.model, &new.model, diff_config);
    let view = ReportView::new(&options);

    let report = ComparisonReport {
        schema_version: DIFF_SCHEMA_VERSION,
        old: SnapshotIdentity {
            api_name: &old.api_name,
            digest: &old.digest,
        },
        new: SnapshotIdentity {
            api_name: &new.api_name,
            digest: &new.digest,
        },
        options,
        has_changes: result.has_changes(),
        records: view.project_result(&result),
        statistics: view.shows_statistics().then_some(&result.statistics),
        warnings: &result.warnings,
    };

    let json = render_report(&report)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", json)).map_err(|e| {
                ExError::new(ExErrorKind::Io)
                    .with_op("write_report")
                    .with_message(format!("{}: {}", path.display(), e))
            })?;
            eprintln!("✓ Report written to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn render_report(report: &ComparisonReport<'_>) -> Result<String, ExError> {
    serde_json::to_string_pretty(report).map_err(|e| {
        ExError::new(ExErrorKind::Serialization)
            .with_op("render_report")
            .with_message(e.to_string())
    })
}
