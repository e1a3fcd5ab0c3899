//! Arena storage for one API snapshot and the builder that validates it.

use std::collections::{BTreeMap, BTreeSet};

use super::identifier::Identifier;
use super::member::{MemberDecl, MemberKind, MemberNode};
use super::package::PackageNode;
use super::type_node::{TypeDecl, TypeNode};
use crate::errors::{ApiDiffError, Result};

/// Characters that carry meaning inside identifiers
const RESERVED_CHARS: &[char] = &['#', '(', ')', ','];

/// Immutable representation of one API snapshot
///
/// Packages, types and members live in separate arenas keyed by
/// [`Identifier`]. Parent nodes hold child identifiers, and cross references
/// (superclass, interfaces, `inherited_from`) are identifiers resolved by
/// lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiModel {
    name: String,
    packages: BTreeMap<Identifier, PackageNode>,
    types: BTreeMap<Identifier, TypeNode>,
    members: BTreeMap<Identifier, MemberNode>,
}

impl ApiModel {
    /// Display name of the snapshot (e.g. `lib-1.0`)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn package(&self, id: &Identifier) -> Option<&PackageNode> {
        self.packages.get(id)
    }

    pub fn type_node(&self, id: &Identifier) -> Option<&TypeNode> {
        self.types.get(id)
    }

    pub fn member(&self, id: &Identifier) -> Option<&MemberNode> {
        self.members.get(id)
    }

    /// Packages in identifier order
    pub fn packages(&self) -> impl Iterator<Item = &PackageNode> {
        self.packages.values()
    }

    /// Types of a package in declaration order
    pub fn types_of<'a>(&'a self, package: &'a PackageNode) -> impl Iterator<Item = &'a TypeNode> {
        package.type_ids.iter().filter_map(|id| self.types.get(id))
    }

    /// Members of a type in declaration order
    pub fn members_of<'a>(&'a self, ty: &'a TypeNode) -> impl Iterator<Item = &'a MemberNode> {
        ty.member_ids.iter().filter_map(|id| self.members.get(id))
    }

    /// Resolve a type reference within this snapshot
    ///
    /// # Errors
    ///
    /// Returns `UnresolvedReference` when no type with this identifier was
    /// declared.
    pub fn resolve_type(&self, reference: &Identifier) -> Result<&TypeNode> {
        self.types
            .get(reference)
            .ok_or_else(|| ApiDiffError::UnresolvedReference {
                reference: reference.to_string(),
                api_name: self.name.clone(),
            })
    }

    /// True if any declaration of any scope carries this identifier
    pub fn contains(&self, id: &Identifier) -> bool {
        self.packages.contains_key(id) || self.types.contains_key(id) || self.members.contains_key(id)
    }

    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

/// Incremental, validating constructor for [`ApiModel`]
///
/// Every `add_*` call checks its own declaration, so a builder never holds a
/// malformed model and [`build`](Self::build) cannot fail.
///
/// ```
/// use apidiff_core::model::{ApiModelBuilder, MemberDecl, TypeDecl};
///
/// let mut builder = ApiModelBuilder::new("lib-1.0");
/// let pkg = builder.add_package("com.example", None).unwrap();
/// let widget = builder.add_type(&pkg, TypeDecl::class("Widget")).unwrap();
/// builder
///     .add_member(&widget, MemberDecl::method("resize", "void").with_param("w", "int"))
///     .unwrap();
/// let model = builder.build();
///
/// assert_eq!(model.member_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ApiModelBuilder {
    name: String,
    packages: BTreeMap<Identifier, PackageNode>,
    types: BTreeMap<Identifier, TypeNode>,
    members: BTreeMap<Identifier, MemberNode>,
    identifiers: BTreeSet<Identifier>,
}

impl ApiModelBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            packages: BTreeMap::new(),
            types: BTreeMap::new(),
            members: BTreeMap::new(),
            identifiers: BTreeSet::new(),
        }
    }

    /// Add a package
    ///
    /// # Errors
    ///
    /// - `EmptyName` / `InvalidName` for a bad package name
    /// - `DuplicatePackage` if the package was already added
    /// - `DuplicateIdentifier` if a type already uses this identifier
    pub fn add_package(&mut self, name: &str, doc: Option<String>) -> Result<Identifier> {
        check_name("package", name)?;
        let id = Identifier::package(name);
        if self.packages.contains_key(&id) {
            return Err(ApiDiffError::DuplicatePackage {
                package: name.to_string(),
            });
        }
        self.claim(&id)?;

        let mut node = PackageNode::new(name);
        node.doc = doc;
        self.packages.insert(id.clone(), node);
        Ok(id)
    }

    /// Add a type to a previously added package
    ///
    /// # Errors
    ///
    /// - `UnknownPackage` if `package` was never added
    /// - `EmptyName` / `InvalidName` for a bad type name
    /// - `DuplicateIdentifier` on any identifier collision
    pub fn add_type(&mut self, package: &Identifier, decl: TypeDecl) -> Result<Identifier> {
        if !self.packages.contains_key(package) {
            return Err(ApiDiffError::UnknownPackage {
                package: package.to_string(),
            });
        }
        check_name("type", &decl.name)?;
        if decl.name.starts_with('.') || decl.name.ends_with('.') || decl.name.contains("..") {
            return Err(ApiDiffError::InvalidName {
                scope: "type".to_string(),
                name: decl.name,
                reason: "empty segment in nested type name".to_string(),
            });
        }

        let id = Identifier::type_in(package, &decl.name);
        self.claim(&id)?;

        let node = TypeNode {
            identifier: id.clone(),
            package: package.clone(),
            name: decl.name,
            kind: decl.kind,
            modifiers: decl.modifiers,
            deprecated: decl.deprecated,
            superclass: decl.superclass.map(Identifier::from_string),
            interfaces: decl
                .interfaces
                .into_iter()
                .map(Identifier::from_string)
                .collect(),
            member_ids: Vec::new(),
            doc: decl.doc,
        };
        self.types.insert(id.clone(), node);
        if let Some(pkg) = self.packages.get_mut(package) {
            pkg.type_ids.push(id.clone());
        }
        Ok(id)
    }

    /// Add a member to a previously added type
    ///
    /// # Errors
    ///
    /// - `UnknownType` if `owner` was never added
    /// - `EmptyName` / `InvalidName` for a bad member name
    /// - `InvalidMember` if the declaration does not fit its kind
    /// - `DuplicateIdentifier` on any identifier collision (including a
    ///   repeated overload signature)
    pub fn add_member(&mut self, owner: &Identifier, decl: MemberDecl) -> Result<Identifier> {
        let simple_name = match self.types.get(owner) {
            Some(ty) => ty.simple_name().to_string(),
            None => {
                return Err(ApiDiffError::UnknownType {
                    type_id: owner.to_string(),
                })
            }
        };

        let name = match decl.kind {
            MemberKind::Constructor => {
                if !decl.name.is_empty() && decl.name != simple_name {
                    return Err(invalid_member(
                        Identifier::field(owner, &decl.name),
                        format!("constructor name must match its type '{}'", simple_name),
                    ));
                }
                simple_name
            }
            _ => {
                check_name("member", &decl.name)?;
                decl.name.clone()
            }
        };

        let id = match decl.kind {
            MemberKind::Field => Identifier::field(owner, &name),
            MemberKind::Method => Identifier::method(owner, &name, &decl.param_types()),
            MemberKind::Constructor => Identifier::constructor(owner, &decl.param_types()),
        };
        check_member_shape(&id, &decl)?;
        self.claim(&id)?;

        let node = MemberNode {
            identifier: id.clone(),
            owner: owner.clone(),
            kind: decl.kind,
            name,
            params: decl.params,
            return_type: decl.return_type,
            field_type: decl.field_type,
            constant_value: decl.constant_value,
            modifiers: decl.modifiers,
            exceptions: decl.exceptions,
            deprecated: decl.deprecated,
            inherited_from: decl.inherited_from.map(Identifier::from_string),
            doc: decl.doc,
        };
        self.members.insert(id.clone(), node);
        if let Some(ty) = self.types.get_mut(owner) {
            ty.member_ids.push(id.clone());
        }
        Ok(id)
    }

    /// Freeze the builder into an immutable model
    pub fn build(self) -> ApiModel {
        ApiModel {
            name: self.name,
            packages: self.packages,
            types: self.types,
            members: self.members,
        }
    }

    /// Reserve an identifier across all scopes
    fn claim(&mut self, id: &Identifier) -> Result<()> {
        if !self.identifiers.insert(id.clone()) {
            return Err(ApiDiffError::DuplicateIdentifier {
                identifier: id.to_string(),
            });
        }
        Ok(())
    }
}

fn check_name(scope: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ApiDiffError::EmptyName {
            scope: scope.to_string(),
        });
    }
    if name.chars().any(|c| c.is_whitespace() || RESERVED_CHARS.contains(&c)) {
        return Err(ApiDiffError::InvalidName {
            scope: scope.to_string(),
            name: name.to_string(),
            reason: "whitespace and '#', '(', ')', ',' are not allowed".to_string(),
        });
    }
    Ok(())
}

fn invalid_member(id: Identifier, reason: impl Into<String>) -> ApiDiffError {
    ApiDiffError::InvalidMember {
        identifier: id.to_string(),
        reason: reason.into(),
    }
}

fn check_member_shape(id: &Identifier, decl: &MemberDecl) -> Result<()> {
    if decl.params.iter().any(|p| p.type_name.trim().is_empty()) {
        return Err(invalid_member(id.clone(), "parameter with empty type"));
    }
    match decl.kind {
        MemberKind::Field => {
            if !decl.params.is_empty() {
                return Err(invalid_member(id.clone(), "field with parameters"));
            }
            if decl.return_type.is_some() {
                return Err(invalid_member(id.clone(), "field with a return type"));
            }
            if decl.field_type.as_deref().map_or(true, |t| t.trim().is_empty()) {
                return Err(invalid_member(id.clone(), "field without a type"));
            }
        }
        MemberKind::Constructor | MemberKind::Method => {
            if decl.field_type.is_some() {
                return Err(invalid_member(id.clone(), "field type on a non-field member"));
            }
            if decl.constant_value.is_some() {
                return Err(invalid_member(id.clone(), "constant value on a non-field member"));
            }
            match (decl.kind, decl.return_type.as_deref()) {
                (MemberKind::Constructor, Some(_)) => {
                    return Err(invalid_member(id.clone(), "constructor with a return type"));
                }
                (MemberKind::Method, None) => {
                    return Err(invalid_member(id.clone(), "method without a return type"));
                }
                (MemberKind::Method, Some(t)) if t.trim().is_empty() => {
                    return Err(invalid_member(id.clone(), "method with an empty return type"));
                }
                _ => {}
            }
        }
    }
    Ok(())
}
