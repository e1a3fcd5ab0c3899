use apidiff_core::errors::{ApiDiffError, ExError, ExErrorKind};

#[test]
fn test_duplicate_identifier_verifiable_by_kind() {
    let err = ApiDiffError::DuplicateIdentifier {
        identifier: "p.T#f(int)".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::DuplicateIdentifier);
    assert_eq!(ex_err.code(), "ERR_DUPLICATE_IDENTIFIER");
    assert_eq!(ex_err.identifier(), Some("p.T#f(int)"));
}

#[test]
fn test_unknown_package_and_type_share_kind() {
    let pkg: ExError = ApiDiffError::UnknownPackage {
        package: "p".to_string(),
    }
    .into();
    let ty: ExError = ApiDiffError::UnknownType {
        type_id: "p.T".to_string(),
    }
    .into();

    assert_eq!(pkg.kind(), ExErrorKind::UnknownParent);
    assert_eq!(ty.kind(), ExErrorKind::UnknownParent);
    assert_ne!(pkg.message(), ty.message());
}

#[test]
fn test_unresolved_reference_carries_api_name() {
    let err = ApiDiffError::UnresolvedReference {
        reference: "ext.Base".to_string(),
        api_name: "lib-1.0".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::UnresolvedReference);
    assert_eq!(ex_err.code(), "ERR_UNRESOLVED_REFERENCE");
    assert_eq!(ex_err.identifier(), Some("ext.Base"));
    assert_eq!(ex_err.api_name(), Some("lib-1.0"));
    assert!(!ex_err.kind().is_malformed_model());
}

#[test]
fn test_invalid_name_is_malformed_model() {
    let ex_err: ExError = ApiDiffError::InvalidName {
        scope: "member".to_string(),
        name: "f#g".to_string(),
        reason: "reserved character".to_string(),
    }
    .into();

    assert_eq!(ex_err.kind(), ExErrorKind::MalformedModel);
    assert!(ex_err.kind().is_malformed_model());
    assert!(ex_err.message().contains("member"));
}

#[test]
fn test_codes_are_unique() {
    let kinds = [
        ExErrorKind::MalformedModel,
        ExErrorKind::DuplicateIdentifier,
        ExErrorKind::UnknownParent,
        ExErrorKind::EmptyName,
        ExErrorKind::InvalidMember,
        ExErrorKind::UnresolvedReference,
        ExErrorKind::InvalidSnapshot,
        ExErrorKind::UnsupportedSchemaVersion,
        ExErrorKind::InvalidConfig,
        ExErrorKind::Io,
        ExErrorKind::Serialization,
    ];
    let codes: std::collections::BTreeSet<&str> = kinds.iter().map(|k| k.code()).collect();
    assert_eq!(codes.len(), kinds.len());
    assert!(codes.iter().all(|c| c.starts_with("ERR_")));
}
