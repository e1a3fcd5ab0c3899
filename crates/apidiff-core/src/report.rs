//! Renderer-facing report options.
//!
//! The differ always computes the full classification. [`ReportOptions`]
//! only decides what a renderer shows, through [`ReportView`].

use serde::{Deserialize, Serialize};

use crate::diff::{ChangeKind, ChangeRecord, DiffResult, SubDifference};

/// Flags of the invocation surface
///
/// Also the shape of the `[report]` table of a config file, so every field
/// defaults to `false` and unknown keys are rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportOptions {
    /// Also show `Unchanged` records
    pub verbose: bool,
    /// Include the statistics summary
    pub stats: bool,
    /// Show documentation differences
    pub doc_changes: bool,
    /// Hide deprecation transitions and documentation differences
    pub incompatible_only: bool,
    /// Show `native` / `synchronized` modifier differences
    pub show_all_changes: bool,
}

impl ReportOptions {
    /// Options switched on in either `self` or `other`
    pub fn union(self, other: ReportOptions) -> ReportOptions {
        ReportOptions {
            verbose: self.verbose || other.verbose,
            stats: self.stats || other.stats,
            doc_changes: self.doc_changes || other.doc_changes,
            incompatible_only: self.incompatible_only || other.incompatible_only,
            show_all_changes: self.show_all_changes || other.show_all_changes,
        }
    }
}

/// Answers "should the renderer show this" for a set of options
#[derive(Debug, Clone, Copy)]
pub struct ReportView<'a> {
    options: &'a ReportOptions,
}

impl<'a> ReportView<'a> {
    pub fn new(options: &'a ReportOptions) -> Self {
        Self { options }
    }

    pub fn shows_statistics(&self) -> bool {
        self.options.stats
    }

    pub fn shows_sub_difference(&self, sub: &SubDifference) -> bool {
        match sub {
            SubDifference::Documentation { .. } => {
                self.options.doc_changes && !self.options.incompatible_only
            }
            SubDifference::Modifier { modifier, .. } if modifier.is_implementation_detail() => {
                self.options.show_all_changes
            }
            _ => true,
        }
    }

    /// Filtered copy of a record tree
    ///
    /// Returns `None` when nothing of `record` is left to show. A `Changed`
    /// record survives if one of its sub-differences or children does.
    pub fn project(&self, record: &ChangeRecord) -> Option<ChangeRecord> {
        let children: Vec<ChangeRecord> = record
            .children
            .iter()
            .filter_map(|child| self.project(child))
            .collect();
        let sub_differences: Vec<SubDifference> = record
            .sub_differences
            .iter()
            .filter(|sub| self.shows_sub_difference(sub))
            .cloned()
            .collect();

        let visible = match record.kind {
            ChangeKind::Added | ChangeKind::Removed => true,
            ChangeKind::Deprecated | ChangeKind::Undeprecated => {
                !self.options.incompatible_only || !children.is_empty()
            }
            ChangeKind::Changed => {
                self.options.verbose || !sub_differences.is_empty() || !children.is_empty()
            }
            ChangeKind::Unchanged => self.options.verbose,
        };
        if !visible {
            return None;
        }

        let deprecation = if self.options.incompatible_only {
            None
        } else {
            record.deprecation
        };
        Some(ChangeRecord {
            deprecation,
            sub_differences,
            children,
            ..record.clone()
        })
    }

    /// Projected package records of a result
    pub fn project_result(&self, result: &DiffResult) -> Vec<ChangeRecord> {
        result
            .packages
            .iter()
            .filter_map(|pkg| self.project(pkg))
            .collect()
    }
}
