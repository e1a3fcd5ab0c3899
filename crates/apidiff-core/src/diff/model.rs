//! API diff output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! Collections use `BTreeMap` and sorted `Vec` for deterministic serialization.

use serde::{Deserialize, Serialize};

use super::stats::StatisticsSummary;
use crate::model::{Identifier, MemberNode, ModifierFlag, PackageNode, TypeKind, TypeNode, Visibility};

/// Schema version of [`DiffResult`]
pub const DIFF_SCHEMA_VERSION: u32 = 1;

/// Classification of one identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    Added,
    Removed,
    Changed,
    Deprecated,
    Undeprecated,
    Unchanged,
}

impl ChangeKind {
    pub const ALL: [ChangeKind; 6] = [
        ChangeKind::Added,
        ChangeKind::Removed,
        ChangeKind::Changed,
        ChangeKind::Deprecated,
        ChangeKind::Undeprecated,
        ChangeKind::Unchanged,
    ];

    pub fn is_unchanged(&self) -> bool {
        matches!(self, ChangeKind::Unchanged)
    }

    /// The kind the same identifier gets when old and new are swapped
    pub fn reversed(&self) -> Self {
        match self {
            ChangeKind::Added => ChangeKind::Removed,
            ChangeKind::Removed => ChangeKind::Added,
            ChangeKind::Deprecated => ChangeKind::Undeprecated,
            ChangeKind::Undeprecated => ChangeKind::Deprecated,
            other => *other,
        }
    }
}

/// Level of the API tree a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Scope {
    Package,
    Type,
    Member,
}

/// Deprecation transition between old and new
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeprecationChange {
    /// Not deprecated in old, deprecated in new
    Deprecated,
    /// Deprecated in old, not deprecated in new
    Undeprecated,
}

impl DeprecationChange {
    pub fn between(old: bool, new: bool) -> Option<Self> {
        match (old, new) {
            (false, true) => Some(DeprecationChange::Deprecated),
            (true, false) => Some(DeprecationChange::Undeprecated),
            _ => None,
        }
    }

    pub fn kind(&self) -> ChangeKind {
        match self {
            DeprecationChange::Deprecated => ChangeKind::Deprecated,
            DeprecationChange::Undeprecated => ChangeKind::Undeprecated,
        }
    }
}

/// One differing tracked field of a declaration present in both snapshots
///
/// Set-valued fields (interfaces, exceptions) report the delta; every other
/// field reports both values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum SubDifference {
    Kind {
        old: TypeKind,
        new: TypeKind,
    },
    Visibility {
        old: Visibility,
        new: Visibility,
    },
    Modifier {
        modifier: ModifierFlag,
        old: bool,
        new: bool,
    },
    Superclass {
        old: Option<Identifier>,
        new: Option<Identifier>,
    },
    Interfaces {
        added: Vec<Identifier>,
        removed: Vec<Identifier>,
    },
    ReturnType {
        old: Option<String>,
        new: Option<String>,
    },
    FieldType {
        old: Option<String>,
        new: Option<String>,
    },
    ConstantValue {
        old: String,
        new: String,
    },
    Exceptions {
        added: Vec<String>,
        removed: Vec<String>,
    },
    InheritedFrom {
        old: Option<Identifier>,
        new: Option<Identifier>,
    },
    Documentation {
        old: Option<String>,
        new: Option<String>,
    },
}

impl SubDifference {
    /// The same difference seen from the other direction
    pub fn reversed(&self) -> Self {
        match self.clone() {
            SubDifference::Kind { old, new } => SubDifference::Kind { old: new, new: old },
            SubDifference::Visibility { old, new } => {
                SubDifference::Visibility { old: new, new: old }
            }
            SubDifference::Modifier { modifier, old, new } => SubDifference::Modifier {
                modifier,
                old: new,
                new: old,
            },
            SubDifference::Superclass { old, new } => {
                SubDifference::Superclass { old: new, new: old }
            }
            SubDifference::Interfaces { added, removed } => SubDifference::Interfaces {
                added: removed,
                removed: added,
            },
            SubDifference::ReturnType { old, new } => {
                SubDifference::ReturnType { old: new, new: old }
            }
            SubDifference::FieldType { old, new } => SubDifference::FieldType { old: new, new: old },
            SubDifference::ConstantValue { old, new } => {
                SubDifference::ConstantValue { old: new, new: old }
            }
            SubDifference::Exceptions { added, removed } => SubDifference::Exceptions {
                added: removed,
                removed: added,
            },
            SubDifference::InheritedFrom { old, new } => {
                SubDifference::InheritedFrom { old: new, new: old }
            }
            SubDifference::Documentation { old, new } => {
                SubDifference::Documentation { old: new, new: old }
            }
        }
    }
}

/// Snapshot of the declaration a record refers to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum Declaration {
    Package(PackageNode),
    Type(TypeNode),
    Member(MemberNode),
}

/// Classified outcome for one identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub identifier: Identifier,
    pub scope: Scope,
    pub kind: ChangeKind,

    /// Deprecation transition; also set on `Changed` records whose
    /// declaration changed in other ways at the same time
    pub deprecation: Option<DeprecationChange>,

    /// One entry per differing field; empty unless `kind` is `Changed`
    pub sub_differences: Vec<SubDifference>,

    /// Declaration in the old snapshot
    pub old: Option<Declaration>,

    /// Declaration in the new snapshot
    pub new: Option<Declaration>,

    /// True when any descendant record is not `Unchanged`
    pub nested_changes: bool,

    /// Type records of a package, member records of a type
    pub children: Vec<ChangeRecord>,
}

impl ChangeRecord {
    /// True when the record or any descendant is not `Unchanged`
    pub fn has_changes(&self) -> bool {
        !self.kind.is_unchanged() || self.nested_changes
    }

    /// True for a container marked `Changed` only because of its descendants
    pub fn is_container_only_change(&self) -> bool {
        self.kind == ChangeKind::Changed && self.sub_differences.is_empty() && self.nested_changes
    }
}

/// A non-fatal condition found while diffing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum DiffWarning {
    /// A changed superclass/interface reference resolves in neither snapshot
    UnresolvedReference {
        /// Type whose declaration carries the reference
        subject: Identifier,
        /// The dangling reference
        reference: Identifier,
    },
}

/// The complete result of comparing two snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffResult {
    /// Schema version of this structure (always 1)
    pub diff_schema_version: u32,
    /// Display name of the old snapshot
    pub old_api: String,
    /// Display name of the new snapshot
    pub new_api: String,
    /// Package records in name order, each holding its type and member records
    pub packages: Vec<ChangeRecord>,
    pub statistics: StatisticsSummary,
    pub warnings: Vec<DiffWarning>,
}

impl DiffResult {
    /// All records, depth first in walk order
    pub fn records(&self) -> Vec<&ChangeRecord> {
        fn visit<'a>(record: &'a ChangeRecord, out: &mut Vec<&'a ChangeRecord>) {
            out.push(record);
            for child in &record.children {
                visit(child, out);
            }
        }

        let mut out = Vec::new();
        for pkg in &self.packages {
            visit(pkg, &mut out);
        }
        out
    }

    /// Look up the record of one identifier
    pub fn find(&self, identifier: &str) -> Option<&ChangeRecord> {
        self.records()
            .into_iter()
            .find(|r| r.identifier.as_str() == identifier)
    }

    /// True if anything at all differs between the snapshots
    pub fn has_changes(&self) -> bool {
        self.packages.iter().any(ChangeRecord::has_changes)
    }
}
