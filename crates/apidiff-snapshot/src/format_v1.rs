//! Snapshot Format v1 schema
//!
//! Defines the JSON/YAML structure an extraction front-end writes for one
//! API snapshot. Unknown keys are rejected at every level.

use apidiff_core::model::{MemberKind, TypeKind, Visibility};
use serde::{Deserialize, Serialize};

/// The only schema version this format defines
pub const SCHEMA_VERSION: u32 = 1;

/// Top-level snapshot document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotV1 {
    /// Schema version (must be 1 for this format)
    pub schema_version: u32,

    /// Display name of the snapshot, e.g. `lib-1.0`
    pub api_name: String,

    #[serde(default)]
    pub packages: Vec<SnapshotPackage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotPackage {
    pub name: String,

    #[serde(default)]
    pub doc: Option<String>,

    #[serde(default)]
    pub types: Vec<SnapshotType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotType {
    /// Name relative to the package; nested types are dotted (`Map.Entry`)
    pub name: String,

    pub kind: TypeKind,

    #[serde(default)]
    pub visibility: Visibility,

    #[serde(default, rename = "static")]
    pub is_static: bool,

    #[serde(default, rename = "final")]
    pub is_final: bool,

    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(default)]
    pub superclass: Option<String>,

    #[serde(default)]
    pub interfaces: Vec<String>,

    #[serde(default)]
    pub doc: Option<String>,

    #[serde(default)]
    pub members: Vec<SnapshotMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotMember {
    pub kind: MemberKind,

    /// May be omitted for constructors
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub params: Vec<SnapshotParam>,

    /// Return type (methods)
    #[serde(default)]
    pub returns: Option<String>,

    /// Declared type (fields)
    #[serde(default, rename = "type")]
    pub field_type: Option<String>,

    /// Constant value (fields); scalars are normalized to their text
    #[serde(default, deserialize_with = "deserialize_constant")]
    pub value: Option<String>,

    #[serde(default)]
    pub visibility: Visibility,

    #[serde(default, rename = "static")]
    pub is_static: bool,

    #[serde(default, rename = "final")]
    pub is_final: bool,

    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,

    #[serde(default, rename = "native")]
    pub is_native: bool,

    #[serde(default, rename = "synchronized")]
    pub is_synchronized: bool,

    #[serde(default, rename = "transient")]
    pub is_transient: bool,

    #[serde(default, rename = "volatile")]
    pub is_volatile: bool,

    #[serde(default)]
    pub exceptions: Vec<String>,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(default)]
    pub inherited_from: Option<String>,

    #[serde(default)]
    pub doc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotParam {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// Custom deserializer for constant values to accept any scalar
fn deserialize_constant<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct ConstantVisitor;

    impl<'de> Visitor<'de> for ConstantVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, number, boolean or null")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(ConstantVisitor)
}
