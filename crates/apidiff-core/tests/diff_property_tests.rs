//! Property tests for the comparison laws: identity, symmetry, idempotence,
//! parallel/sequential equivalence and the statistics sum law.

mod common;

use std::collections::BTreeMap;

use apidiff_core::diff::{
    compute_diff, compute_diff_with, ChangeKind, ChangeRecord, DiffConfig, SubDifference,
};
use apidiff_core::model::{ApiModel, ApiModelBuilder, MemberDecl, ModifierFlag, Modifiers, TypeDecl};
use common::assert_sum_law;
use proptest::prelude::*;

// `a` + `b.X` and `a.b` + `X` share the identifier `a.b.X`
const PACKAGES: [&str; 3] = ["a", "a.b", "b"];
const TYPES: [&str; 3] = ["X", "Y", "b.X"];
const TYPE_REFS: [&str; 3] = ["ext.Base", "a.X", "b.Y"];
const VALUE_TYPES: [&str; 3] = ["int", "long", "java.lang.String"];

#[derive(Debug, Clone)]
struct MemberShape {
    present: bool,
    deprecated: bool,
    is_final: bool,
    variant: usize,
}

#[derive(Debug, Clone)]
struct TypeShape {
    present: bool,
    deprecated: bool,
    interface: bool,
    superclass: Option<usize>,
    interfaces: Vec<usize>,
    members: Vec<MemberShape>,
}

#[derive(Debug, Clone)]
struct PackageShape {
    present: bool,
    doc: Option<usize>,
    types: Vec<TypeShape>,
}

fn member_shape() -> impl Strategy<Value = MemberShape> {
    (any::<bool>(), any::<bool>(), any::<bool>(), 0usize..3).prop_map(
        |(present, deprecated, is_final, variant)| MemberShape {
            present,
            deprecated,
            is_final,
            variant,
        },
    )
}

fn type_shape() -> impl Strategy<Value = TypeShape> {
    (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        proptest::option::of(0usize..3),
        proptest::collection::vec(0usize..3, 0..3),
        proptest::collection::vec(member_shape(), 5),
    )
        .prop_map(
            |(present, deprecated, interface, superclass, interfaces, members)| TypeShape {
                present,
                deprecated,
                interface,
                superclass,
                interfaces,
                members,
            },
        )
}

fn package_shape() -> impl Strategy<Value = PackageShape> {
    (
        any::<bool>(),
        proptest::option::of(0usize..2),
        proptest::collection::vec(type_shape(), TYPES.len()),
    )
        .prop_map(|(present, doc, types)| PackageShape {
            present,
            doc,
            types,
        })
}

fn model_shape() -> impl Strategy<Value = Vec<PackageShape>> {
    proptest::collection::vec(package_shape(), PACKAGES.len())
}

fn member_decl(slot: usize, shape: &MemberShape) -> MemberDecl {
    let value_type = VALUE_TYPES[shape.variant];
    let decl = match slot {
        0 => MemberDecl::constructor(),
        1 => MemberDecl::constructor().with_param("v", "int"),
        2 => MemberDecl::method("get", value_type),
        3 => MemberDecl::method("get", "void").with_param("key", value_type),
        _ => MemberDecl::field("value", value_type),
    };
    let modifiers = Modifiers::public().with(ModifierFlag::Final, shape.is_final);
    decl.with_modifiers(modifiers)
        .deprecated(shape.deprecated)
        .with_doc(format!("doc {}", shape.variant % 2))
}

fn build(name: &str, shape: &[PackageShape]) -> ApiModel {
    let mut b = ApiModelBuilder::new(name);
    for (pkg_name, pkg) in PACKAGES.iter().zip(shape) {
        if !pkg.present {
            continue;
        }
        let pkg_id = b
            .add_package(pkg_name, pkg.doc.map(|d| format!("package doc {}", d)))
            .unwrap();
        for (type_name, ty) in TYPES.iter().zip(&pkg.types) {
            if !ty.present {
                continue;
            }
            let mut decl = if ty.interface {
                TypeDecl::interface(*type_name)
            } else {
                TypeDecl::class(*type_name)
            };
            decl = decl.deprecated(ty.deprecated);
            if let Some(s) = ty.superclass {
                decl = decl.with_superclass(TYPE_REFS[s]);
            }
            for i in &ty.interfaces {
                decl = decl.with_interface(TYPE_REFS[*i]);
            }
            // Within one snapshot the colliding pair is rejected; keep the first
            let Ok(type_id) = b.add_type(&pkg_id, decl) else {
                continue;
            };
            for (slot, member) in ty.members.iter().enumerate() {
                if member.present {
                    b.add_member(&type_id, member_decl(slot, member)).unwrap();
                }
            }
        }
    }
    b.build()
}

type RecordSummary = (ChangeKind, Vec<SubDifference>);

/// Records keyed by their path from the package down, since one identifier
/// may sit under two packages
fn summarize(old: &ApiModel, new: &ApiModel) -> BTreeMap<String, RecordSummary> {
    fn visit(record: &ChangeRecord, parent: &str, out: &mut BTreeMap<String, RecordSummary>) {
        let path = format!("{}/{}", parent, record.identifier);
        for child in &record.children {
            visit(child, &path, out);
        }
        let previous = out.insert(path, (record.kind, record.sub_differences.clone()));
        assert!(previous.is_none(), "record emitted twice in one scope");
    }

    let mut out = BTreeMap::new();
    for package in &compute_diff(old, new).packages {
        visit(package, "", &mut out);
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_identity_is_unchanged(shape in model_shape()) {
        let a = build("a", &shape);
        let result = compute_diff(&a, &a);

        prop_assert!(result.records().iter().all(|r| r.kind == ChangeKind::Unchanged));
        prop_assert_eq!(result.statistics.totals.non_unchanged(), 0);
        prop_assert!(result.warnings.is_empty());
    }

    #[test]
    fn prop_symmetry(old_shape in model_shape(), new_shape in model_shape()) {
        let a = build("a", &old_shape);
        let b = build("b", &new_shape);

        let forward = summarize(&a, &b);
        let backward = summarize(&b, &a);

        prop_assert_eq!(
            forward.keys().collect::<Vec<_>>(),
            backward.keys().collect::<Vec<_>>()
        );
        for (id, (kind, subs)) in &forward {
            let (back_kind, back_subs) = &backward[id];
            prop_assert_eq!(kind.reversed(), *back_kind, "identifier {}", id);
            let reversed: Vec<SubDifference> = subs.iter().map(SubDifference::reversed).collect();
            prop_assert_eq!(&reversed, back_subs, "identifier {}", id);
        }
    }

    #[test]
    fn prop_idempotent_serialization(old_shape in model_shape(), new_shape in model_shape()) {
        let a = build("a", &old_shape);
        let b = build("b", &new_shape);

        let first = serde_json::to_string(&compute_diff(&a, &b)).unwrap();
        let second = serde_json::to_string(&compute_diff(&a, &b)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_parallel_matches_sequential(old_shape in model_shape(), new_shape in model_shape()) {
        let a = build("a", &old_shape);
        let b = build("b", &new_shape);

        let sequential = compute_diff_with(&a, &b, DiffConfig::default());
        let parallel = compute_diff_with(&a, &b, DiffConfig::parallel());
        prop_assert_eq!(
            serde_json::to_string(&sequential).unwrap(),
            serde_json::to_string(&parallel).unwrap()
        );
    }

    #[test]
    fn prop_statistics_sum_law(old_shape in model_shape(), new_shape in model_shape()) {
        let a = build("a", &old_shape);
        let b = build("b", &new_shape);

        let result = compute_diff(&a, &b);
        assert_sum_law(&result);

        let pct = result.statistics.overall_percentage_changed;
        prop_assert!((0.0..=100.0).contains(&pct));
    }

    #[test]
    fn prop_containers_flag_nested_changes(old_shape in model_shape(), new_shape in model_shape()) {
        let a = build("a", &old_shape);
        let b = build("b", &new_shape);

        for record in compute_diff(&a, &b).records() {
            let child_changed = record.children.iter().any(|c| c.has_changes());
            prop_assert_eq!(record.nested_changes, child_changed);
            if child_changed {
                prop_assert_ne!(record.kind, ChangeKind::Unchanged);
            }
        }
    }

    #[test]
    fn prop_children_follow_added_or_removed_container(
        old_shape in model_shape(),
        new_shape in model_shape()
    ) {
        let a = build("a", &old_shape);
        let b = build("b", &new_shape);

        for record in compute_diff(&a, &b).records() {
            if matches!(record.kind, ChangeKind::Added | ChangeKind::Removed) {
                for child in &record.children {
                    prop_assert_eq!(child.kind, record.kind, "child {} of {}", child.identifier, record.identifier);
                }
            }
        }
    }
}
