use serde::{Deserialize, Serialize};

use super::identifier::Identifier;
use super::modifiers::Modifiers;

/// Kind of a type declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

/// A class, interface, enum or annotation type
///
/// `superclass` and `interfaces` are references by identifier. They may
/// point at types outside the snapshot (e.g. platform classes), so they are
/// resolved through [`ApiModel::resolve_type`](super::ApiModel::resolve_type)
/// rather than owned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeNode {
    pub identifier: Identifier,

    /// Owning package
    pub package: Identifier,

    /// Type name relative to its package; nested types are dotted
    pub name: String,

    pub kind: TypeKind,
    pub modifiers: Modifiers,
    pub deprecated: bool,
    pub superclass: Option<Identifier>,
    pub interfaces: Vec<Identifier>,

    /// Members in declaration order
    pub member_ids: Vec<Identifier>,

    pub doc: Option<String>,
}

impl TypeNode {
    /// Last segment of the (possibly nested) type name
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

/// Input to [`ApiModelBuilder::add_type`](super::ApiModelBuilder::add_type)
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub name: String,
    pub kind: TypeKind,
    pub modifiers: Modifiers,
    pub deprecated: bool,
    pub superclass: Option<String>,
    pub interfaces: Vec<String>,
    pub doc: Option<String>,
}

impl TypeDecl {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            modifiers: Modifiers::public(),
            deprecated: false,
            superclass: None,
            interfaces: Vec::new(),
            doc: None,
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Class)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Interface)
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    pub fn with_superclass(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}
