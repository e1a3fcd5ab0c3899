//! Change statistics per scope.
//!
//! Counting is purely additive. Each parallel branch of the walk owns its own
//! [`StatisticsAccumulator`]; branches are merged once, in package order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::model::{ChangeKind, ChangeRecord};
use crate::model::Identifier;

/// Count of records per change kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindCounts {
    pub added: usize,
    pub removed: usize,
    pub changed: usize,
    pub deprecated: usize,
    pub undeprecated: usize,
    pub unchanged: usize,
}

impl KindCounts {
    pub fn record(&mut self, kind: ChangeKind) {
        match kind {
            ChangeKind::Added => self.added += 1,
            ChangeKind::Removed => self.removed += 1,
            ChangeKind::Changed => self.changed += 1,
            ChangeKind::Deprecated => self.deprecated += 1,
            ChangeKind::Undeprecated => self.undeprecated += 1,
            ChangeKind::Unchanged => self.unchanged += 1,
        }
    }

    pub fn get(&self, kind: ChangeKind) -> usize {
        match kind {
            ChangeKind::Added => self.added,
            ChangeKind::Removed => self.removed,
            ChangeKind::Changed => self.changed,
            ChangeKind::Deprecated => self.deprecated,
            ChangeKind::Undeprecated => self.undeprecated,
            ChangeKind::Unchanged => self.unchanged,
        }
    }

    pub fn merge(&mut self, other: &KindCounts) {
        self.added += other.added;
        self.removed += other.removed;
        self.changed += other.changed;
        self.deprecated += other.deprecated;
        self.undeprecated += other.undeprecated;
        self.unchanged += other.unchanged;
    }

    /// Number of records counted
    pub fn total(&self) -> usize {
        ChangeKind::ALL.iter().map(|k| self.get(*k)).sum()
    }

    /// Records present on both sides that differ in any way
    pub fn changed_like(&self) -> usize {
        self.changed + self.deprecated + self.undeprecated
    }

    /// Records that are not `Unchanged`
    pub fn non_unchanged(&self) -> usize {
        self.total() - self.unchanged
    }

    /// Declarations in the old snapshot
    pub fn old_count(&self) -> usize {
        self.removed + self.changed_like() + self.unchanged
    }

    /// Declarations in the new snapshot
    pub fn new_count(&self) -> usize {
        self.added + self.changed_like() + self.unchanged
    }

    /// Percentage difference between the two sides of this scope
    ///
    /// `100 * (added + removed + 2 * changed_like) / (old_count + new_count)`,
    /// zero for an empty scope. Ranges from 0 (identical) to 100 (nothing
    /// in common).
    pub fn percentage_changed(&self) -> f64 {
        let denominator = self.old_count() + self.new_count();
        if denominator == 0 {
            return 0.0;
        }
        let numerator = self.added + self.removed + 2 * self.changed_like();
        100.0 * numerator as f64 / denominator as f64
    }
}

/// Final statistics of one diff run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSummary {
    /// Every record at every level
    pub totals: KindCounts,
    /// Package records
    pub root: KindCounts,
    /// Type records, per package
    pub packages: BTreeMap<Identifier, KindCounts>,
    /// Member records, per type, grouped by the package the type sits in
    ///
    /// A type identifier can occur under two packages when the snapshots
    /// nest it differently (package `a.b` class `C` vs package `a` class
    /// `b.C`), so type counts are keyed by package first.
    pub types: BTreeMap<Identifier, BTreeMap<Identifier, KindCounts>>,
    /// `percentage_changed` of `totals`
    pub overall_percentage_changed: f64,
}

impl StatisticsSummary {
    /// Counts over the type records of `package`
    pub fn package_scope(&self, package: &Identifier) -> Option<&KindCounts> {
        self.packages.get(package)
    }

    /// Counts over the member records of type `ty` under `package`
    pub fn type_scope(&self, package: &Identifier, ty: &Identifier) -> Option<&KindCounts> {
        self.types.get(package).and_then(|types| types.get(ty))
    }
}

/// Running tallies fed by the differ
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatisticsAccumulator {
    totals: KindCounts,
    root: KindCounts,
    packages: BTreeMap<Identifier, KindCounts>,
    types: BTreeMap<Identifier, BTreeMap<Identifier, KindCounts>>,
}

impl StatisticsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a package record
    pub fn record_package(&mut self, record: &ChangeRecord) {
        self.root.record(record.kind);
        self.totals.record(record.kind);
        self.packages.entry(record.identifier.clone()).or_default();
    }

    /// Count a type record of `package`
    pub fn record_type(&mut self, package: &Identifier, record: &ChangeRecord) {
        self.packages
            .entry(package.clone())
            .or_default()
            .record(record.kind);
        self.totals.record(record.kind);
        self.types
            .entry(package.clone())
            .or_default()
            .entry(record.identifier.clone())
            .or_default();
    }

    /// Count a member record of type `owner` under `package`
    pub fn record_member(&mut self, package: &Identifier, owner: &Identifier, record: &ChangeRecord) {
        self.types
            .entry(package.clone())
            .or_default()
            .entry(owner.clone())
            .or_default()
            .record(record.kind);
        self.totals.record(record.kind);
    }

    /// Fold another branch's tallies into this one
    pub fn merge(&mut self, other: StatisticsAccumulator) {
        self.totals.merge(&other.totals);
        self.root.merge(&other.root);
        for (id, counts) in other.packages {
            self.packages.entry(id).or_default().merge(&counts);
        }
        for (package, types) in other.types {
            let scope = self.types.entry(package).or_default();
            for (id, counts) in types {
                scope.entry(id).or_default().merge(&counts);
            }
        }
    }

    pub fn finish(self) -> StatisticsSummary {
        StatisticsSummary {
            overall_percentage_changed: self.totals.percentage_changed(),
            totals: self.totals,
            root: self.root,
            packages: self.packages,
            types: self.types,
        }
    }
}
