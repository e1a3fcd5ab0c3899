use serde::{Deserialize, Serialize};

/// Qualified name used as the matching key between snapshots
///
/// Formats:
/// - package: `java.util`
/// - type: `java.util.Map.Entry` (package, then dotted type name)
/// - field: `java.util.Map.Entry#key`
/// - method: `java.util.Map#put(K, V)`
/// - constructor: `java.util.HashMap#<init>(int, float)`
///
/// Identifiers compare as plain strings. The builder guarantees uniqueness
/// across every scope of one model.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

/// Name segment used for constructors
pub const CONSTRUCTOR_NAME: &str = "<init>";

impl Identifier {
    /// Identifier of a package
    pub fn package(name: &str) -> Self {
        Self(name.to_string())
    }

    /// Identifier of a type declared in `package`
    pub fn type_in(package: &Identifier, name: &str) -> Self {
        Self(format!("{}.{}", package.0, name))
    }

    /// Identifier of a field declared in `owner`
    pub fn field(owner: &Identifier, name: &str) -> Self {
        Self(format!("{}#{}", owner.0, name))
    }

    /// Identifier of a method; overloads differ by parameter types
    pub fn method<S: AsRef<str>>(owner: &Identifier, name: &str, param_types: &[S]) -> Self {
        Self(format!(
            "{}#{}({})",
            owner.0,
            name,
            join_signature(param_types)
        ))
    }

    /// Identifier of a constructor
    pub fn constructor<S: AsRef<str>>(owner: &Identifier, param_types: &[S]) -> Self {
        Self::method(owner, CONSTRUCTOR_NAME, param_types)
    }

    /// Wrap an already-qualified reference (e.g. a superclass name)
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Join parameter types the way they appear inside an identifier
pub fn join_signature<S: AsRef<str>>(param_types: &[S]) -> String {
    param_types
        .iter()
        .map(|t| t.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_formats() {
        let pkg = Identifier::package("java.util");
        let map = Identifier::type_in(&pkg, "Map");
        let entry = Identifier::type_in(&pkg, "Map.Entry");

        assert_eq!(pkg.as_str(), "java.util");
        assert_eq!(map.as_str(), "java.util.Map");
        assert_eq!(entry.as_str(), "java.util.Map.Entry");
        assert_eq!(Identifier::field(&entry, "key").as_str(), "java.util.Map.Entry#key");
        assert_eq!(
            Identifier::method(&map, "put", &["K", "V"]).as_str(),
            "java.util.Map#put(K, V)"
        );
        assert_eq!(
            Identifier::constructor(&map, &[] as &[&str]).as_str(),
            "java.util.Map#<init>()"
        );
    }

    #[test]
    fn test_overloads_are_distinct() {
        let ty = Identifier::from("p.T");
        let one = Identifier::method(&ty, "f", &["int"]);
        let two = Identifier::method(&ty, "f", &["int", "int"]);
        let swapped = Identifier::method(&ty, "f", &["long", "int"]);

        assert_ne!(one, two);
        assert_ne!(two, swapped);
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = Identifier::from("p.T#f(int)");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"p.T#f(int)\"");
    }
}
