//! Snapshot loader
//!
//! Turns a parsed snapshot document into an `ApiModel`. Every declaration
//! goes through `ApiModelBuilder`, so a document that parses but describes
//! an impossible API is rejected with the builder's error.

#![allow(clippy::result_large_err)]

use crate::digest::compute_snapshot_digest;
use crate::errors::{malformed_model, Result};
use crate::format_v1::{SnapshotMember, SnapshotType, SnapshotV1};
use crate::parser::parse_snapshot_file;
use apidiff_core::model::{ApiModel, ApiModelBuilder, MemberDecl, Modifiers, Param, TypeDecl};
use apidiff_core::{log_op_end, log_op_error, log_op_start};
use std::path::Path;
use std::time::Instant;

/// A snapshot read from disk, ready to compare
#[derive(Debug, Clone)]
pub struct LoadedSnapshot {
    /// Display name used for the model (override or document `api_name`)
    pub api_name: String,
    /// SHA256 digest of the canonical document
    pub digest: String,
    pub model: ApiModel,
}

/// Build an `ApiModel` from a parsed snapshot document
///
/// `name_override` replaces the document's `api_name` as the model name.
///
/// # Errors
///
/// Any builder rejection (duplicate identifiers, empty names, inconsistent
/// member shapes), tagged with op `build_model` and the API name.
pub fn build_model(snapshot: &SnapshotV1, name_override: Option<&str>) -> Result<ApiModel> {
    let api_name = name_override.unwrap_or(&snapshot.api_name);
    let mut builder = ApiModelBuilder::new(api_name);

    for package in &snapshot.packages {
        let package_id = builder
            .add_package(&package.name, package.doc.clone())
            .map_err(|e| malformed_model(api_name, e))?;

        for ty in &package.types {
            let type_id = builder
                .add_type(&package_id, type_decl(ty))
                .map_err(|e| malformed_model(api_name, e))?;

            for member in &ty.members {
                builder
                    .add_member(&type_id, member_decl(member))
                    .map_err(|e| malformed_model(api_name, e))?;
            }
        }
    }

    Ok(builder.build())
}

/// Parse, digest and build one snapshot file
///
/// # Errors
///
/// Parse errors from [`parse_snapshot_file`] and builder errors from
/// [`build_model`].
pub fn load_snapshot(path: &Path, name_override: Option<&str>) -> Result<LoadedSnapshot> {
    let start = Instant::now();
    log_op_start!("load_snapshot", path = %path.display());

    let result = load_snapshot_inner(path, name_override);

    match &result {
        Ok(loaded) => log_op_end!(
            "load_snapshot",
            duration_ms = start.elapsed().as_millis() as u64,
            api_name = %loaded.api_name,
            package_count = loaded.model.package_count(),
            type_count = loaded.model.type_count(),
            member_count = loaded.model.member_count()
        ),
        Err(e) => log_op_error!(
            "load_snapshot",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        ),
    }

    result
}

fn load_snapshot_inner(path: &Path, name_override: Option<&str>) -> Result<LoadedSnapshot> {
    let snapshot = parse_snapshot_file(path)?;
    let digest = compute_snapshot_digest(&snapshot);
    let model = build_model(&snapshot, name_override)?;

    Ok(LoadedSnapshot {
        api_name: model.name().to_string(),
        digest,
        model,
    })
}

fn type_decl(ty: &SnapshotType) -> TypeDecl {
    let modifiers = Modifiers {
        visibility: ty.visibility,
        is_static: ty.is_static,
        is_final: ty.is_final,
        is_abstract: ty.is_abstract,
        ..Modifiers::public()
    };

    TypeDecl {
        name: ty.name.clone(),
        kind: ty.kind,
        modifiers,
        deprecated: ty.deprecated,
        superclass: ty.superclass.clone(),
        interfaces: ty.interfaces.clone(),
        doc: ty.doc.clone(),
    }
}

fn member_decl(member: &SnapshotMember) -> MemberDecl {
    let modifiers = Modifiers {
        visibility: member.visibility,
        is_static: member.is_static,
        is_final: member.is_final,
        is_abstract: member.is_abstract,
        is_native: member.is_native,
        is_synchronized: member.is_synchronized,
        is_transient: member.is_transient,
        is_volatile: member.is_volatile,
    };

    MemberDecl {
        kind: member.kind,
        name: member.name.clone(),
        params: member
            .params
            .iter()
            .map(|p| Param::new(p.name.clone(), p.type_name.clone()))
            .collect(),
        return_type: member.returns.clone(),
        field_type: member.field_type.clone(),
        constant_value: member.value.clone(),
        modifiers,
        exceptions: member.exceptions.clone(),
        deprecated: member.deprecated,
        inherited_from: member.inherited_from.clone(),
        doc: member.doc.clone(),
    }
}
