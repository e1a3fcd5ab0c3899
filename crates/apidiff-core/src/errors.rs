use thiserror::Error;

/// Result type alias using ApiDiffError
pub type Result<T> = std::result::Result<T, ApiDiffError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and CLI exit reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Model construction
    /// Structural invariant of the API model violated
    MalformedModel,
    /// Two declarations share one qualified identifier
    DuplicateIdentifier,
    /// A declaration names a parent package/type that was never added
    UnknownParent,
    /// A package, type or member name is empty
    EmptyName,
    /// Member shape is inconsistent with its kind (e.g. a field with parameters)
    InvalidMember,

    // Reference resolution
    /// A superclass/interface reference does not resolve within a model
    UnresolvedReference,

    // Snapshot documents
    /// Snapshot bytes are not valid JSON/YAML or do not match the document schema
    InvalidSnapshot,
    /// The snapshot declares a schema version this build cannot read
    UnsupportedSchemaVersion,

    // Configuration
    InvalidConfig,

    // Integration/IO
    Io,
    /// A result could not be encoded for output
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::MalformedModel => "ERR_MALFORMED_MODEL",
            ExErrorKind::DuplicateIdentifier => "ERR_DUPLICATE_IDENTIFIER",
            ExErrorKind::UnknownParent => "ERR_UNKNOWN_PARENT",
            ExErrorKind::EmptyName => "ERR_EMPTY_NAME",
            ExErrorKind::InvalidMember => "ERR_INVALID_MEMBER",
            ExErrorKind::UnresolvedReference => "ERR_UNRESOLVED_REFERENCE",
            ExErrorKind::InvalidSnapshot => "ERR_INVALID_SNAPSHOT",
            ExErrorKind::UnsupportedSchemaVersion => "ERR_UNSUPPORTED_SCHEMA_VERSION",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }

    /// True for kinds raised while constructing an API model
    pub fn is_malformed_model(&self) -> bool {
        matches!(
            self,
            ExErrorKind::MalformedModel
                | ExErrorKind::DuplicateIdentifier
                | ExErrorKind::UnknownParent
                | ExErrorKind::EmptyName
                | ExErrorKind::InvalidMember
        )
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling and context for
/// debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    identifier: Option<String>,
    api_name: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            identifier: None,
            api_name: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add declaration identifier context
    pub fn with_identifier(mut self, id: impl Into<String>) -> Self {
        self.identifier = Some(id.into());
        self
    }

    /// Add snapshot display name context
    pub fn with_api_name(mut self, name: impl Into<String>) -> Self {
        self.api_name = Some(name.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the identifier context, if any
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// Get the snapshot display name, if any
    pub fn api_name(&self) -> Option<&str> {
        self.api_name.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(identifier) = &self.identifier {
            write!(f, " (identifier: {})", identifier)?;
        }
        if let Some(api_name) = &self.api_name {
            write!(f, " (api: {})", api_name)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for API model construction and lookup
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiDiffError {
    // ===== Model construction (MalformedModel family) =====
    /// A package with this name was already added
    #[error("Duplicate package: {package}")]
    DuplicatePackage { package: String },

    /// Two declarations produce the same qualified identifier
    #[error("Identifier collision: {identifier}")]
    DuplicateIdentifier { identifier: String },

    /// A type was added to a package that does not exist
    #[error("Unknown package: {package}")]
    UnknownPackage { package: String },

    /// A member was added to a type that does not exist
    #[error("Unknown type: {type_id}")]
    UnknownType { type_id: String },

    /// A declaration has an empty name
    #[error("Empty {scope} name")]
    EmptyName { scope: String },

    /// A name contains characters reserved for identifier syntax
    #[error("Invalid {scope} name '{name}': {reason}")]
    InvalidName {
        scope: String,
        name: String,
        reason: String,
    },

    /// Member shape is inconsistent with its kind
    #[error("Invalid member {identifier}: {reason}")]
    InvalidMember { identifier: String, reason: String },

    // ===== Reference resolution =====
    /// A type reference does not resolve in the model it was looked up in
    #[error("Unresolved reference {reference} in API {api_name}")]
    UnresolvedReference { reference: String, api_name: String },
}

impl From<ApiDiffError> for ExError {
    fn from(err: ApiDiffError) -> Self {
        match err {
            ApiDiffError::DuplicatePackage { package } => {
                ExError::new(ExErrorKind::DuplicateIdentifier)
                    .with_identifier(package)
                    .with_message("Package declared more than once")
            }
            ApiDiffError::DuplicateIdentifier { identifier } => {
                ExError::new(ExErrorKind::DuplicateIdentifier)
                    .with_identifier(identifier)
                    .with_message("Identifier is not unique within the snapshot")
            }
            ApiDiffError::UnknownPackage { package } => ExError::new(ExErrorKind::UnknownParent)
                .with_identifier(package)
                .with_message("Type refers to a package that was not declared"),
            ApiDiffError::UnknownType { type_id } => ExError::new(ExErrorKind::UnknownParent)
                .with_identifier(type_id)
                .with_message("Member refers to a type that was not declared"),
            ApiDiffError::EmptyName { scope } => {
                ExError::new(ExErrorKind::EmptyName).with_message(format!("Empty {} name", scope))
            }
            ApiDiffError::InvalidName {
                scope,
                name,
                reason,
            } => ExError::new(ExErrorKind::MalformedModel)
                .with_identifier(name)
                .with_message(format!("Invalid {} name: {}", scope, reason)),
            ApiDiffError::InvalidMember { identifier, reason } => {
                ExError::new(ExErrorKind::InvalidMember)
                    .with_identifier(identifier)
                    .with_message(reason)
            }
            ApiDiffError::UnresolvedReference {
                reference,
                api_name,
            } => ExError::new(ExErrorKind::UnresolvedReference)
                .with_identifier(reference)
                .with_api_name(api_name)
                .with_message("Reference does not resolve"),
        }
    }
}
