use serde::{Deserialize, Serialize};

use super::identifier::Identifier;

/// A package of one API snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageNode {
    /// Package identifier (equal to its name)
    pub identifier: Identifier,

    /// Dotted package name
    pub name: String,

    /// Documentation text, carried through unmodified
    pub doc: Option<String>,

    /// Types declared in this package, in declaration order
    pub type_ids: Vec<Identifier>,
}

impl PackageNode {
    pub fn new(name: &str) -> Self {
        Self {
            identifier: Identifier::package(name),
            name: name.to_string(),
            doc: None,
            type_ids: Vec::new(),
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}
