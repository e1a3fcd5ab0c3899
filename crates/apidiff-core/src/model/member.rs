use serde::{Deserialize, Serialize};

use super::identifier::{join_signature, Identifier};
use super::modifiers::Modifiers;

/// Kind of a member declaration
///
/// The variant order is the member sort order used by the differ:
/// constructors, then methods, then fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Constructor,
    Method,
    Field,
}

/// A formal parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl Param {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// A field, constructor or method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberNode {
    pub identifier: Identifier,

    /// Owning type
    pub owner: Identifier,

    pub kind: MemberKind,

    /// Member name; constructors carry the simple name of their type
    pub name: String,

    pub params: Vec<Param>,

    /// Methods only
    pub return_type: Option<String>,

    /// Fields only
    pub field_type: Option<String>,

    /// Compile-time constant value of a field, when known
    pub constant_value: Option<String>,

    pub modifiers: Modifiers,

    /// Thrown exceptions in declaration order; compared as a set
    pub exceptions: Vec<String>,

    pub deprecated: bool,

    /// Type the member is inherited from, when it is not declared locally
    pub inherited_from: Option<Identifier>,

    pub doc: Option<String>,
}

impl MemberNode {
    /// Parameter types joined with `", "`
    pub fn signature(&self) -> String {
        let types: Vec<&str> = self.params.iter().map(|p| p.type_name.as_str()).collect();
        join_signature(&types)
    }

    /// Sort key within a type: (kind, name, signature)
    pub fn sort_key(&self) -> (MemberKind, &str, String) {
        (self.kind, self.name.as_str(), self.signature())
    }
}

/// Input to [`ApiModelBuilder::add_member`](super::ApiModelBuilder::add_member)
///
/// Fields are public so that loaders can map arbitrary documents onto a
/// declaration; the builder rejects shapes that do not fit `kind`.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberDecl {
    pub kind: MemberKind,
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: Option<String>,
    pub field_type: Option<String>,
    pub constant_value: Option<String>,
    pub modifiers: Modifiers,
    pub exceptions: Vec<String>,
    pub deprecated: bool,
    pub inherited_from: Option<String>,
    pub doc: Option<String>,
}

impl MemberDecl {
    fn bare(kind: MemberKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            params: Vec::new(),
            return_type: None,
            field_type: None,
            constant_value: None,
            modifiers: Modifiers::public(),
            exceptions: Vec::new(),
            deprecated: false,
            inherited_from: None,
            doc: None,
        }
    }

    pub fn field(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            field_type: Some(field_type.into()),
            ..Self::bare(MemberKind::Field, name)
        }
    }

    pub fn method(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            return_type: Some(return_type.into()),
            ..Self::bare(MemberKind::Method, name)
        }
    }

    /// Constructor; its name is filled in from the owning type
    pub fn constructor() -> Self {
        Self::bare(MemberKind::Constructor, "")
    }

    pub fn with_param(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.params.push(Param::new(name, type_name));
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_exception(mut self, exception: impl Into<String>) -> Self {
        self.exceptions.push(exception.into());
        self
    }

    pub fn with_constant_value(mut self, value: impl Into<String>) -> Self {
        self.constant_value = Some(value.into());
        self
    }

    pub fn with_inherited_from(mut self, owner: impl Into<String>) -> Self {
        self.inherited_from = Some(owner.into());
        self
    }

    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Parameter types of this declaration
    pub fn param_types(&self) -> Vec<&str> {
        self.params.iter().map(|p| p.type_name.as_str()).collect()
    }
}
