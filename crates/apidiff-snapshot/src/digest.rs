//! Snapshot digest canonicalization
//!
//! Computes stable SHA256 digests of snapshot documents. Declaration order
//! and the JSON/YAML encoding do not affect the digest.

use crate::format_v1::{SnapshotMember, SnapshotPackage, SnapshotType, SnapshotV1};
use sha2::{Digest, Sha256};

/// Compute a stable digest for a snapshot
///
/// Returns a SHA256 hex digest of the canonicalized snapshot: packages sorted
/// by name, types by name, members by (kind, name, parameter types), and
/// set-valued lists sorted.
pub fn compute_snapshot_digest(snapshot: &SnapshotV1) -> String {
    let canonical = canonicalize_snapshot(snapshot);

    // Plain structs serialize in declaration order
    let json = serde_json::to_string(&canonical).unwrap_or_default();

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    hex::encode(hasher.finalize())
}

fn canonicalize_snapshot(snapshot: &SnapshotV1) -> SnapshotV1 {
    let mut packages: Vec<SnapshotPackage> = snapshot
        .packages
        .iter()
        .map(|p| SnapshotPackage {
            types: canonicalize_types(&p.types),
            ..p.clone()
        })
        .collect();
    packages.sort_by(|a, b| a.name.cmp(&b.name));

    SnapshotV1 {
        schema_version: snapshot.schema_version,
        api_name: snapshot.api_name.clone(),
        packages,
    }
}

fn canonicalize_types(types: &[SnapshotType]) -> Vec<SnapshotType> {
    let mut canonical: Vec<SnapshotType> = types
        .iter()
        .map(|t| {
            let mut t = t.clone();
            t.interfaces.sort();
            t.members = canonicalize_members(&t.members);
            t
        })
        .collect();
    canonical.sort_by(|a, b| a.name.cmp(&b.name));
    canonical
}

fn canonicalize_members(members: &[SnapshotMember]) -> Vec<SnapshotMember> {
    let mut canonical: Vec<SnapshotMember> = members
        .iter()
        .map(|m| {
            let mut m = m.clone();
            m.exceptions.sort();
            m
        })
        .collect();
    canonical.sort_by(|a, b| {
        let key = |m: &SnapshotMember| {
            let types: Vec<String> = m.params.iter().map(|p| p.type_name.clone()).collect();
            (m.kind, m.name.clone(), types)
        };
        key(a).cmp(&key(b))
    });
    canonical
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_snapshot_str, SnapshotFormat};

    #[test]
    fn test_snapshot_digest_stable() {
        let yaml = r#"
schema_version: 1
api_name: lib
packages:
  - name: p
    types:
      - name: T
        kind: class
"#;

        let snapshot = parse_snapshot_str(yaml, SnapshotFormat::Yaml).unwrap();
        let d1 = compute_snapshot_digest(&snapshot);
        let d2 = compute_snapshot_digest(&snapshot);

        assert_eq!(d1, d2);
        assert_eq!(d1.len(), 64);
    }

    #[test]
    fn test_digest_ignores_declaration_order() {
        let a = r#"
schema_version: 1
api_name: lib
packages:
  - name: q
  - name: p
    types:
      - name: T
        kind: class
        interfaces: [x.B, x.A]
        members:
          - { kind: field, name: f, type: int }
          - { kind: method, name: m, returns: void }
"#;
        let b = r#"
schema_version: 1
api_name: lib
packages:
  - name: p
    types:
      - name: T
        kind: class
        interfaces: [x.A, x.B]
        members:
          - { kind: method, name: m, returns: void }
          - { kind: field, name: f, type: int }
  - name: q
"#;
        let da = compute_snapshot_digest(&parse_snapshot_str(a, SnapshotFormat::Yaml).unwrap());
        let db = compute_snapshot_digest(&parse_snapshot_str(b, SnapshotFormat::Yaml).unwrap());
        assert_eq!(da, db);
    }

    #[test]
    fn test_digest_changes_with_content() {
        let base = r#"{"schema_version": 1, "api_name": "lib", "packages": [{"name": "p"}]}"#;
        let other = r#"{"schema_version": 1, "api_name": "lib", "packages": [{"name": "p", "doc": "x"}]}"#;

        let d1 = compute_snapshot_digest(&parse_snapshot_str(base, SnapshotFormat::Json).unwrap());
        let d2 = compute_snapshot_digest(&parse_snapshot_str(other, SnapshotFormat::Json).unwrap());
        assert_ne!(d1, d2);
    }
}
