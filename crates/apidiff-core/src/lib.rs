//! apidiff Core - API comparison engine
//!
//! This crate compares two snapshots of a library's public API surface:
//! - Immutable arena model of one snapshot, built through a validating builder
//! - Exact-identifier matching of packages, types and members
//! - Classification into typed change records with container propagation
//! - Per-scope change statistics
//! - Renderer-facing report options
//!
//! ```
//! use apidiff_core::diff::compute_diff;
//! use apidiff_core::model::{ApiModelBuilder, TypeDecl};
//!
//! let mut old = ApiModelBuilder::new("1.0");
//! let pkg = old.add_package("p", None).unwrap();
//! old.add_type(&pkg, TypeDecl::class("T")).unwrap();
//!
//! let mut new = ApiModelBuilder::new("2.0");
//! let pkg = new.add_package("p", None).unwrap();
//! new.add_type(&pkg, TypeDecl::class("T").deprecated(true)).unwrap();
//!
//! let result = compute_diff(&old.build(), &new.build());
//! assert_eq!(result.statistics.totals.deprecated, 1);
//! ```

pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod matcher;
pub mod model;
pub mod report;

// Re-export commonly used types
pub use diff::{compute_diff, compute_diff_with, DiffConfig, DiffResult, Differ};
pub use errors::{ApiDiffError, ExError, ExErrorKind, Result};
pub use matcher::{match_models, CorrespondenceTable, Presence};
pub use model::{ApiModel, ApiModelBuilder, Identifier};
pub use report::{ReportOptions, ReportView};
