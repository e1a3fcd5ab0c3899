//! API diff computation engine.
//!
//! [`Differ::run`] walks a correspondence table top-down (packages, types,
//! members) and classifies each identifier:
//!
//! 1. absent in new: `Removed`
//! 2. absent in old: `Added`
//! 3. tracked fields differ: `Changed`, one [`SubDifference`] per field
//! 4. only the deprecation flag differs: `Deprecated` / `Undeprecated`
//! 5. otherwise `Unchanged`
//!
//! A package or type classified `Unchanged` is upgraded to `Changed` when any
//! descendant changed, with `nested_changes` set and no sub-differences.

use std::collections::BTreeSet;
use std::time::Instant;

use rayon::prelude::*;

use super::model::{
    ChangeKind, ChangeRecord, Declaration, DeprecationChange, DiffResult, DiffWarning, Scope,
    SubDifference, DIFF_SCHEMA_VERSION,
};
use super::stats::StatisticsAccumulator;
use crate::matcher::{match_models, CorrespondenceTable, MemberMatch, PackageMatch, TypeMatch};
use crate::model::{ApiModel, Identifier, MemberNode, ModifierFlag, Modifiers, TypeNode};
use crate::{log_op_end, log_op_start};

/// Knobs of one diff run; none of them change the result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffConfig {
    /// Diff top-level packages on the rayon pool
    pub parallel: bool,
}

impl DiffConfig {
    pub fn parallel() -> Self {
        Self { parallel: true }
    }
}

/// Compare two snapshots with the default (sequential) configuration
pub fn compute_diff(old: &ApiModel, new: &ApiModel) -> DiffResult {
    compute_diff_with(old, new, DiffConfig::default())
}

/// Match and diff two snapshots
pub fn compute_diff_with(old: &ApiModel, new: &ApiModel, config: DiffConfig) -> DiffResult {
    let start = Instant::now();
    log_op_start!(
        "compute_diff",
        old_api = old.name(),
        new_api = new.name(),
        old_type_count = old.type_count(),
        new_type_count = new.type_count()
    );

    let table = match_models(old, new);
    tracing::debug!(entry_count = table.len(), "matched snapshots");
    let result = Differ::new(old, new).with_config(config).run(&table);

    log_op_end!(
        "compute_diff",
        duration_ms = start.elapsed().as_millis() as u64,
        record_count = result.statistics.totals.total(),
        changed_count = result.statistics.totals.non_unchanged(),
        warning_count = result.warnings.len()
    );
    result
}

/// Classifies every identifier of a correspondence table
pub struct Differ<'a> {
    old: &'a ApiModel,
    new: &'a ApiModel,
    config: DiffConfig,
}

/// Output of one package subtree
struct Branch {
    record: ChangeRecord,
    stats: StatisticsAccumulator,
    warnings: Vec<DiffWarning>,
}

impl<'a> Differ<'a> {
    pub fn new(old: &'a ApiModel, new: &'a ApiModel) -> Self {
        Self {
            old,
            new,
            config: DiffConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DiffConfig) -> Self {
        self.config = config;
        self
    }

    /// Walk `table` and produce the full result
    ///
    /// `table` must come from [`match_models`] over the same two models.
    pub fn run(&self, table: &CorrespondenceTable) -> DiffResult {
        let branches: Vec<Branch> = if self.config.parallel {
            table
                .packages
                .par_iter()
                .map(|pm| self.diff_package(pm))
                .collect()
        } else {
            table.packages.iter().map(|pm| self.diff_package(pm)).collect()
        };

        let mut stats = StatisticsAccumulator::new();
        let mut warnings = Vec::new();
        let mut packages = Vec::with_capacity(branches.len());
        for branch in branches {
            stats.merge(branch.stats);
            warnings.extend(branch.warnings);
            packages.push(branch.record);
        }

        DiffResult {
            diff_schema_version: DIFF_SCHEMA_VERSION,
            old_api: self.old.name().to_string(),
            new_api: self.new.name().to_string(),
            packages,
            statistics: stats.finish(),
            warnings,
        }
    }

    fn diff_package(&self, pm: &PackageMatch) -> Branch {
        let mut stats = StatisticsAccumulator::new();
        let mut warnings = Vec::new();

        let mut children = Vec::with_capacity(pm.types.len());
        for tm in &pm.types {
            let record = self.diff_type(&pm.identifier, tm, &mut stats, &mut warnings);
            stats.record_type(&pm.identifier, &record);
            children.push(record);
        }

        let old = pm
            .presence
            .in_old()
            .then(|| self.old.package(&pm.identifier))
            .flatten();
        let new = pm
            .presence
            .in_new()
            .then(|| self.new.package(&pm.identifier))
            .flatten();
        let sub_differences = match (old, new) {
            (Some(o), Some(n)) => compare_doc(&o.doc, &n.doc).into_iter().collect(),
            _ => Vec::new(),
        };

        let record = classify(
            pm.identifier.clone(),
            Scope::Package,
            old.cloned().map(Declaration::Package),
            new.cloned().map(Declaration::Package),
            sub_differences,
            None,
            children,
        );
        stats.record_package(&record);

        Branch {
            record,
            stats,
            warnings,
        }
    }

    fn diff_type(
        &self,
        package: &Identifier,
        tm: &TypeMatch,
        stats: &mut StatisticsAccumulator,
        warnings: &mut Vec<DiffWarning>,
    ) -> ChangeRecord {
        let mut children = Vec::with_capacity(tm.members.len());
        for mm in &tm.members {
            let record = self.diff_member(mm);
            stats.record_member(package, &tm.identifier, &record);
            children.push(record);
        }

        // Presence is package-scoped; the models alone cannot tell
        let old = tm
            .presence
            .in_old()
            .then(|| self.old.type_node(&tm.identifier))
            .flatten();
        let new = tm
            .presence
            .in_new()
            .then(|| self.new.type_node(&tm.identifier))
            .flatten();
        let (sub_differences, deprecation) = match (old, new) {
            (Some(o), Some(n)) => (
                self.compare_types(o, n, warnings),
                DeprecationChange::between(o.deprecated, n.deprecated),
            ),
            _ => (Vec::new(), None),
        };

        classify(
            tm.identifier.clone(),
            Scope::Type,
            old.cloned().map(Declaration::Type),
            new.cloned().map(Declaration::Type),
            sub_differences,
            deprecation,
            children,
        )
    }

    fn diff_member(&self, mm: &MemberMatch) -> ChangeRecord {
        let old = mm
            .presence
            .in_old()
            .then(|| self.old.member(&mm.identifier))
            .flatten();
        let new = mm
            .presence
            .in_new()
            .then(|| self.new.member(&mm.identifier))
            .flatten();
        let (sub_differences, deprecation) = match (old, new) {
            (Some(o), Some(n)) => (
                compare_members(o, n),
                DeprecationChange::between(o.deprecated, n.deprecated),
            ),
            _ => (Vec::new(), None),
        };

        classify(
            mm.identifier.clone(),
            Scope::Member,
            old.cloned().map(Declaration::Member),
            new.cloned().map(Declaration::Member),
            sub_differences,
            deprecation,
            Vec::new(),
        )
    }

    fn compare_types(
        &self,
        old: &TypeNode,
        new: &TypeNode,
        warnings: &mut Vec<DiffWarning>,
    ) -> Vec<SubDifference> {
        let mut diffs = Vec::new();

        if old.kind != new.kind {
            diffs.push(SubDifference::Kind {
                old: old.kind,
                new: new.kind,
            });
        }
        compare_modifiers(&old.modifiers, &new.modifiers, &mut diffs);

        if old.superclass != new.superclass {
            for reference in old.superclass.iter().chain(new.superclass.iter()) {
                self.check_reference(&old.identifier, reference, warnings);
            }
            diffs.push(SubDifference::Superclass {
                old: old.superclass.clone(),
                new: new.superclass.clone(),
            });
        }

        let (added, removed) = set_delta(&old.interfaces, &new.interfaces);
        if !added.is_empty() || !removed.is_empty() {
            for reference in removed.iter().chain(added.iter()) {
                self.check_reference(&old.identifier, reference, warnings);
            }
            diffs.push(SubDifference::Interfaces { added, removed });
        }

        diffs.extend(compare_doc(&old.doc, &new.doc));
        diffs
    }

    /// Record a warning for a changed reference that resolves in neither snapshot
    fn check_reference(
        &self,
        subject: &Identifier,
        reference: &Identifier,
        warnings: &mut Vec<DiffWarning>,
    ) {
        let resolved = self
            .old
            .resolve_type(reference)
            .or_else(|_| self.new.resolve_type(reference));
        if let Err(err) = resolved {
            tracing::debug!(
                subject = subject.as_str(),
                reference = reference.as_str(),
                error = %err,
                "changed reference does not resolve"
            );
            warnings.push(DiffWarning::UnresolvedReference {
                subject: subject.clone(),
                reference: reference.clone(),
            });
        }
    }
}

fn classify(
    identifier: Identifier,
    scope: Scope,
    old: Option<Declaration>,
    new: Option<Declaration>,
    sub_differences: Vec<SubDifference>,
    deprecation: Option<DeprecationChange>,
    children: Vec<ChangeRecord>,
) -> ChangeRecord {
    let nested_changes = children.iter().any(ChangeRecord::has_changes);
    let kind = match (&old, &new) {
        (Some(_), None) => ChangeKind::Removed,
        (None, Some(_)) => ChangeKind::Added,
        _ => {
            if !sub_differences.is_empty() {
                ChangeKind::Changed
            } else if let Some(transition) = deprecation {
                transition.kind()
            } else if nested_changes {
                ChangeKind::Changed
            } else {
                ChangeKind::Unchanged
            }
        }
    };

    ChangeRecord {
        identifier,
        scope,
        kind,
        deprecation,
        sub_differences,
        old,
        new,
        nested_changes,
        children,
    }
}

fn compare_members(old: &MemberNode, new: &MemberNode) -> Vec<SubDifference> {
    let mut diffs = Vec::new();
    compare_modifiers(&old.modifiers, &new.modifiers, &mut diffs);

    if old.return_type != new.return_type {
        diffs.push(SubDifference::ReturnType {
            old: old.return_type.clone(),
            new: new.return_type.clone(),
        });
    }
    if old.field_type != new.field_type {
        diffs.push(SubDifference::FieldType {
            old: old.field_type.clone(),
            new: new.field_type.clone(),
        });
    }
    // a value appearing or disappearing is not reported
    if let (Some(o), Some(n)) = (&old.constant_value, &new.constant_value) {
        if o != n {
            diffs.push(SubDifference::ConstantValue {
                old: o.clone(),
                new: n.clone(),
            });
        }
    }

    let (added, removed) = set_delta(&old.exceptions, &new.exceptions);
    if !added.is_empty() || !removed.is_empty() {
        diffs.push(SubDifference::Exceptions { added, removed });
    }

    if old.inherited_from != new.inherited_from {
        diffs.push(SubDifference::InheritedFrom {
            old: old.inherited_from.clone(),
            new: new.inherited_from.clone(),
        });
    }

    diffs.extend(compare_doc(&old.doc, &new.doc));
    diffs
}

fn compare_modifiers(old: &Modifiers, new: &Modifiers, diffs: &mut Vec<SubDifference>) {
    if old.visibility != new.visibility {
        diffs.push(SubDifference::Visibility {
            old: old.visibility,
            new: new.visibility,
        });
    }
    for flag in ModifierFlag::ALL {
        let (o, n) = (old.get(flag), new.get(flag));
        if o != n {
            diffs.push(SubDifference::Modifier {
                modifier: flag,
                old: o,
                new: n,
            });
        }
    }
}

/// Missing and blank documentation are the same thing
fn normalized_doc(doc: &Option<String>) -> Option<&str> {
    doc.as_deref().filter(|d| !d.trim().is_empty())
}

fn compare_doc(old: &Option<String>, new: &Option<String>) -> Option<SubDifference> {
    if normalized_doc(old) == normalized_doc(new) {
        return None;
    }
    Some(SubDifference::Documentation {
        old: old.clone(),
        new: new.clone(),
    })
}

/// Compute a set-delta between two lists.
///
/// Returns `(added, removed)` sorted, where added = in new but not old.
fn set_delta<T: Ord + Clone>(old: &[T], new: &[T]) -> (Vec<T>, Vec<T>) {
    let old_set: BTreeSet<&T> = old.iter().collect();
    let new_set: BTreeSet<&T> = new.iter().collect();
    let added = new_set.difference(&old_set).map(|t| (*t).clone()).collect();
    let removed = old_set.difference(&new_set).map(|t| (*t).clone()).collect();
    (added, removed)
}
