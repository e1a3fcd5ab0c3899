//! API diff engine.
//!
//! Walks a [`CorrespondenceTable`](crate::matcher::CorrespondenceTable) and
//! classifies every identifier into a [`ChangeRecord`].
//!
//! ## Entry point
//!
//! ```ignore
//! use apidiff_core::diff::compute_diff;
//!
//! let result = compute_diff(&old_model, &new_model);
//! for record in result.records() {
//!     println!("{} {:?}", record.identifier, record.kind);
//! }
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce byte-identical serialized output,
//!   in parallel and sequential mode alike.
//! - **Completeness**: one record per identifier of either snapshot, including
//!   `Unchanged` ones and the children of added/removed containers.
//! - **Infallibility**: unresolved type references become warnings; a
//!   well-formed model never makes the walk fail.

pub mod engine;
pub mod model;
pub mod stats;

pub use engine::{compute_diff, compute_diff_with, DiffConfig, Differ};
pub use model::{
    ChangeKind, ChangeRecord, Declaration, DeprecationChange, DiffResult, DiffWarning, Scope,
    SubDifference, DIFF_SCHEMA_VERSION,
};
pub use stats::{KindCounts, StatisticsAccumulator, StatisticsSummary};
