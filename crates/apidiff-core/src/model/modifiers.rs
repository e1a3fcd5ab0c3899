use serde::{Deserialize, Serialize};

/// Declared visibility
///
/// Only the exported surface is modelled, so private and package-private
/// declarations never reach the core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Protected => write!(f, "protected"),
        }
    }
}

/// Boolean modifier names, in the order they are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierFlag {
    Static,
    Final,
    Abstract,
    Native,
    Synchronized,
    Transient,
    Volatile,
}

impl ModifierFlag {
    pub const ALL: [ModifierFlag; 7] = [
        ModifierFlag::Static,
        ModifierFlag::Final,
        ModifierFlag::Abstract,
        ModifierFlag::Native,
        ModifierFlag::Synchronized,
        ModifierFlag::Transient,
        ModifierFlag::Volatile,
    ];

    /// Implementation detail flags that do not affect callers
    pub fn is_implementation_detail(&self) -> bool {
        matches!(self, ModifierFlag::Native | ModifierFlag::Synchronized)
    }
}

/// Modifiers shared by types and members
///
/// Types only ever set `static`, `final` and `abstract`; the remaining flags
/// stay `false` for them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    pub visibility: Visibility,
    #[serde(rename = "static")]
    pub is_static: bool,
    #[serde(rename = "final")]
    pub is_final: bool,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    #[serde(rename = "native")]
    pub is_native: bool,
    #[serde(rename = "synchronized")]
    pub is_synchronized: bool,
    #[serde(rename = "transient")]
    pub is_transient: bool,
    #[serde(rename = "volatile")]
    pub is_volatile: bool,
}

impl Modifiers {
    pub fn public() -> Self {
        Self::default()
    }

    pub fn protected() -> Self {
        Self {
            visibility: Visibility::Protected,
            ..Self::default()
        }
    }

    /// Return a copy with `flag` set to `value`
    pub fn with(mut self, flag: ModifierFlag, value: bool) -> Self {
        match flag {
            ModifierFlag::Static => self.is_static = value,
            ModifierFlag::Final => self.is_final = value,
            ModifierFlag::Abstract => self.is_abstract = value,
            ModifierFlag::Native => self.is_native = value,
            ModifierFlag::Synchronized => self.is_synchronized = value,
            ModifierFlag::Transient => self.is_transient = value,
            ModifierFlag::Volatile => self.is_volatile = value,
        }
        self
    }

    pub fn get(&self, flag: ModifierFlag) -> bool {
        match flag {
            ModifierFlag::Static => self.is_static,
            ModifierFlag::Final => self.is_final,
            ModifierFlag::Abstract => self.is_abstract,
            ModifierFlag::Native => self.is_native,
            ModifierFlag::Synchronized => self.is_synchronized,
            ModifierFlag::Transient => self.is_transient,
            ModifierFlag::Volatile => self.is_volatile,
        }
    }
}
