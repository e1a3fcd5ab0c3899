//! Correspondence between the declarations of two snapshots.
//!
//! Matching is exact identifier equality at every scope. A renamed
//! declaration is one removal plus one addition, and overloads only match
//! when their full parameter-type signatures are equal.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::model::{ApiModel, Identifier, MemberKind, MemberNode, TypeNode};

/// Where an identifier occurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Presence {
    OldOnly,
    NewOnly,
    Both,
}

impl Presence {
    fn of(in_old: bool, in_new: bool) -> Option<Self> {
        match (in_old, in_new) {
            (true, true) => Some(Presence::Both),
            (true, false) => Some(Presence::OldOnly),
            (false, true) => Some(Presence::NewOnly),
            (false, false) => None,
        }
    }

    pub fn in_old(&self) -> bool {
        matches!(self, Presence::OldOnly | Presence::Both)
    }

    pub fn in_new(&self) -> bool {
        matches!(self, Presence::NewOnly | Presence::Both)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberMatch {
    pub identifier: Identifier,
    pub presence: Presence,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeMatch {
    pub identifier: Identifier,
    pub presence: Presence,
    /// Sorted by (kind, name, signature)
    pub members: Vec<MemberMatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageMatch {
    pub identifier: Identifier,
    pub presence: Presence,
    /// Sorted by type name
    pub types: Vec<TypeMatch>,
}

/// Every declaration of either snapshot with its presence
///
/// The tree is already in walk order: packages by name, types by name
/// within a package, members by (kind, name, signature) within a type.
///
/// Presence is scoped: a type counts as present on a side only when that
/// side declares it in the same package. An identifier the snapshots nest
/// differently (package `a.b` class `C` vs package `a` class `b.C`) occurs
/// twice, once `OldOnly` and once `NewOnly`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrespondenceTable {
    pub packages: Vec<PackageMatch>,
}

impl CorrespondenceTable {
    /// Presence of the first occurrence of `id` in walk order
    pub fn presence(&self, id: &Identifier) -> Option<Presence> {
        self.presences(id).into_iter().next()
    }

    /// Presence of every occurrence of `id`, in walk order
    pub fn presences(&self, id: &Identifier) -> Vec<Presence> {
        let mut found = Vec::new();
        for pm in &self.packages {
            if &pm.identifier == id {
                found.push(pm.presence);
            }
            for tm in &pm.types {
                if &tm.identifier == id {
                    found.push(tm.presence);
                }
                found.extend(
                    tm.members
                        .iter()
                        .filter(|mm| &mm.identifier == id)
                        .map(|mm| mm.presence),
                );
            }
        }
        found
    }

    /// Number of entries across all scopes
    pub fn len(&self) -> usize {
        self.packages
            .iter()
            .map(|pm| 1 + pm.types.iter().map(|tm| 1 + tm.members.len()).sum::<usize>())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Pair the declarations of `old` and `new`
///
/// Pure and infallible: an identifier missing on one side is a valid
/// outcome, not an error.
pub fn match_models(old: &ApiModel, new: &ApiModel) -> CorrespondenceTable {
    let package_ids: BTreeSet<&Identifier> = old
        .packages()
        .chain(new.packages())
        .map(|p| &p.identifier)
        .collect();

    let mut packages = Vec::with_capacity(package_ids.len());
    for pkg_id in package_ids {
        let old_pkg = old.package(pkg_id);
        let new_pkg = new.package(pkg_id);
        let Some(presence) = Presence::of(old_pkg.is_some(), new_pkg.is_some()) else {
            continue;
        };

        // Only the types each side declares in this package
        let old_types: BTreeMap<&Identifier, &TypeNode> = old_pkg
            .into_iter()
            .flat_map(|p| old.types_of(p))
            .map(|t| (&t.identifier, t))
            .collect();
        let new_types: BTreeMap<&Identifier, &TypeNode> = new_pkg
            .into_iter()
            .flat_map(|p| new.types_of(p))
            .map(|t| (&t.identifier, t))
            .collect();

        let mut sorted_types: Vec<&TypeNode> = old_types.values().copied().collect();
        sorted_types.extend(
            new_types
                .iter()
                .filter(|(id, _)| !old_types.contains_key(*id))
                .map(|(_, t)| *t),
        );
        sorted_types.sort_by(|a, b| a.name.cmp(&b.name));

        let types = sorted_types
            .into_iter()
            .map(|ty| {
                let old_ty = old_types.get(&ty.identifier).copied();
                let new_ty = new_types.get(&ty.identifier).copied();
                match_type(ty, old_ty, new_ty, old, new)
            })
            .collect();

        packages.push(PackageMatch {
            identifier: pkg_id.clone(),
            presence,
            types,
        });
    }

    CorrespondenceTable { packages }
}

/// Match the members of one type; `old_ty`/`new_ty` are the package-local
/// declarations, at least one of which is `ty`
fn match_type(
    ty: &TypeNode,
    old_ty: Option<&TypeNode>,
    new_ty: Option<&TypeNode>,
    old: &ApiModel,
    new: &ApiModel,
) -> TypeMatch {
    let presence = Presence::of(old_ty.is_some(), new_ty.is_some()).unwrap_or(Presence::Both);

    let old_members: BTreeSet<&Identifier> = old_ty
        .into_iter()
        .flat_map(|t| old.members_of(t))
        .map(|m| &m.identifier)
        .collect();
    let new_members: BTreeSet<&Identifier> = new_ty
        .into_iter()
        .flat_map(|t| new.members_of(t))
        .map(|m| &m.identifier)
        .collect();

    let mut member_nodes: BTreeMap<&Identifier, &MemberNode> = BTreeMap::new();
    for m in old_ty.into_iter().flat_map(|t| old.members_of(t)) {
        member_nodes.insert(&m.identifier, m);
    }
    for m in new_ty.into_iter().flat_map(|t| new.members_of(t)) {
        member_nodes.entry(&m.identifier).or_insert(m);
    }

    let mut keyed: Vec<((MemberKind, &str, String), &MemberNode)> = member_nodes
        .into_values()
        .map(|m| (m.sort_key(), m))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));

    let members = keyed
        .into_iter()
        .filter_map(|(_, m)| {
            let presence = Presence::of(
                old_members.contains(&m.identifier),
                new_members.contains(&m.identifier),
            )?;
            Some(MemberMatch {
                identifier: m.identifier.clone(),
                presence,
            })
        })
        .collect();

    TypeMatch {
        identifier: ty.identifier.clone(),
        presence,
        members,
    }
}
