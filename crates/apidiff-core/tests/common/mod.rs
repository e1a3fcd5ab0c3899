use std::collections::BTreeMap;

use apidiff_core::diff::{ChangeKind, DiffResult};
use apidiff_core::model::{
    ApiModel, ApiModelBuilder, MemberDecl, ModifierFlag, Modifiers, TypeDecl,
};

/// Build a model with one package `p` holding one class `T` with `members`
#[allow(dead_code)]
pub fn single_type_model(name: &str, members: Vec<MemberDecl>) -> ApiModel {
    single_type_model_with(name, TypeDecl::class("T"), members)
}

/// Like `single_type_model`, with a custom type declaration named `T`
#[allow(dead_code)]
pub fn single_type_model_with(name: &str, ty: TypeDecl, members: Vec<MemberDecl>) -> ApiModel {
    let mut b = ApiModelBuilder::new(name);
    let pkg = b.add_package("p", None).unwrap();
    let t = b.add_type(&pkg, ty).unwrap();
    for m in members {
        b.add_member(&t, m).unwrap();
    }
    b.build()
}

/// A small but representative library snapshot
///
/// ```text
/// com.example
///   Widget (class, extends com.example.Base, implements java.io.Serializable)
///     <init>(), <init>(int), resize(int), resize(int, int), SIZE
///   Base (abstract class)
///     close()
/// com.example.util
///   Strings (final class)
///     join(java.lang.String[])
/// ```
#[allow(dead_code)]
pub fn library_v1() -> ApiModelBuilder {
    let mut b = ApiModelBuilder::new("lib-1.0");
    let pkg = b
        .add_package("com.example", Some("Example widgets".to_string()))
        .unwrap();
    let widget = b
        .add_type(
            &pkg,
            TypeDecl::class("Widget")
                .with_superclass("com.example.Base")
                .with_interface("java.io.Serializable")
                .with_doc("A widget"),
        )
        .unwrap();
    b.add_member(&widget, MemberDecl::constructor()).unwrap();
    b.add_member(&widget, MemberDecl::constructor().with_param("size", "int"))
        .unwrap();
    b.add_member(
        &widget,
        MemberDecl::method("resize", "void").with_param("w", "int"),
    )
    .unwrap();
    b.add_member(
        &widget,
        MemberDecl::method("resize", "void")
            .with_param("w", "int")
            .with_param("h", "int"),
    )
    .unwrap();
    b.add_member(
        &widget,
        MemberDecl::field("SIZE", "int")
            .with_modifiers(
                Modifiers::public()
                    .with(ModifierFlag::Static, true)
                    .with(ModifierFlag::Final, true),
            )
            .with_constant_value("10"),
    )
    .unwrap();

    let base = b
        .add_type(
            &pkg,
            TypeDecl::class("Base").with_modifiers(Modifiers {
                is_abstract: true,
                ..Modifiers::public()
            }),
        )
        .unwrap();
    b.add_member(&base, MemberDecl::method("close", "void"))
        .unwrap();

    let util = b.add_package("com.example.util", None).unwrap();
    let strings = b
        .add_type(
            &util,
            TypeDecl::class("Strings").with_modifiers(Modifiers {
                is_final: true,
                ..Modifiers::public()
            }),
        )
        .unwrap();
    b.add_member(
        &strings,
        MemberDecl::method("join", "java.lang.String").with_param("parts", "java.lang.String[]"),
    )
    .unwrap();
    b
}

/// Map every record identifier to its kind
#[allow(dead_code)]
pub fn kinds_by_id(result: &DiffResult) -> BTreeMap<String, ChangeKind> {
    result
        .records()
        .into_iter()
        .map(|r| (r.identifier.to_string(), r.kind))
        .collect()
}

/// Assert the statistics sum law for every scope of a result
#[allow(dead_code)]
pub fn assert_sum_law(result: &DiffResult) {
    let stats = &result.statistics;

    assert_eq!(stats.root.total(), result.packages.len());
    assert_eq!(stats.totals.total(), result.records().len());

    for pkg in &result.packages {
        let counts = stats
            .package_scope(&pkg.identifier)
            .unwrap_or_else(|| panic!("no stats for package {}", pkg.identifier));
        assert_eq!(counts.total(), pkg.children.len(), "package {}", pkg.identifier);
        for kind in ChangeKind::ALL {
            let direct = pkg.children.iter().filter(|c| c.kind == kind).count();
            assert_eq!(counts.get(kind), direct, "{:?} in {}", kind, pkg.identifier);
        }

        for ty in &pkg.children {
            let counts = stats
                .type_scope(&pkg.identifier, &ty.identifier)
                .unwrap_or_else(|| panic!("no stats for type {}", ty.identifier));
            assert_eq!(counts.total(), ty.children.len(), "type {}", ty.identifier);
            for kind in ChangeKind::ALL {
                let direct = ty.children.iter().filter(|c| c.kind == kind).count();
                assert_eq!(counts.get(kind), direct, "{:?} in {}", kind, ty.identifier);
            }
        }
    }
}
