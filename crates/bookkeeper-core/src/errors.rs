use crate::model::FieldType;
use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure a repository can report maps onto exactly one kind. Each kind
/// has a stable error code that callers and tests can match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Construction
    /// The record type has no persisted fields
    Schema,
    /// A field's semantic type has no registered column type
    UnsupportedType,

    // Primary-key lifecycle
    PreconditionViolation,
    NotFound,

    // Marshalling
    /// A result column is not part of the record's field map
    UnexpectedField,
    /// A decoded value does not have the declared semantic type
    TypeMismatch,
    Serialization,

    // Integration
    Persistence,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::Schema => "ERR_SCHEMA",
            ExErrorKind::UnsupportedType => "ERR_UNSUPPORTED_TYPE",
            ExErrorKind::PreconditionViolation => "ERR_PRECONDITION_VIOLATION",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::UnexpectedField => "ERR_UNEXPECTED_FIELD",
            ExErrorKind::TypeMismatch => "ERR_TYPE_MISMATCH",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
        }
    }
}

/// Canonical structured error type
///
/// Carries a kind for programmatic handling plus optional context (operation,
/// table, primary key, field) for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity: Option<String>,
    key: Option<i64>,
    field: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity: None,
            key: None,
            field: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity (record type or table) context
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Add primary key context
    pub fn with_key(mut self, key: i64) -> Self {
        self.key = Some(key);
        self
    }

    /// Add field name context
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
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

    /// Get the entity context, if any
    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    /// Get the primary key context, if any
    pub fn key(&self) -> Option<i64> {
        self.key
    }

    /// Get the field context, if any
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
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
        if let Some(entity) = &self.entity {
            write!(f, " (entity: {})", entity)?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {})", field)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Failures raised by repositories and the record marshalling layer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RepositoryError {
    // ===== Schema Errors =====
    /// The record type declares no persisted fields
    #[error("Trying to create repository for {type_name} without persisted fields")]
    EmptySchema { type_name: String },

    /// A field's semantic type has no column mapping
    #[error("Type {field_type} of field {field} is not supported yet")]
    UnsupportedType {
        type_name: String,
        field: String,
        field_type: FieldType,
    },

    // ===== Primary-Key Errors =====
    #[error("Trying to add object without `primary_key` attribute")]
    MissingPrimaryKey { type_name: String },

    #[error("Trying to add object with filled `primary_key` attribute ({key})")]
    PrimaryKeyAlreadySet { type_name: String, key: i64 },

    #[error("Trying to update object with key {key}, which does not exist")]
    UpdateMissingKey { key: i64 },

    #[error("Trying to delete object with key {key}, which does not exist")]
    DeleteMissingKey { key: i64 },

    // ===== Marshalling Errors =====
    #[error("Unexpected field name: {field}")]
    UnexpectedField { field: String },

    #[error("Field {field} expected {expected} but got {actual}")]
    TypeMismatch {
        field: String,
        expected: FieldType,
        actual: String,
    },

    #[error("Cannot parse date-time {value:?}: {reason}")]
    InvalidDateTime { value: String, reason: String },

    #[error("Real value is NaN and cannot be stored")]
    NotANumber,
}

impl From<RepositoryError> for ExError {
    fn from(err: RepositoryError) -> Self {
        let message = err.to_string();
        match err {
            RepositoryError::EmptySchema { type_name } => ExError::new(ExErrorKind::Schema)
                .with_entity(type_name)
                .with_message(message),
            RepositoryError::UnsupportedType {
                type_name, field, ..
            } => ExError::new(ExErrorKind::UnsupportedType)
                .with_entity(type_name)
                .with_field(field)
                .with_message(message),
            RepositoryError::MissingPrimaryKey { type_name } => {
                ExError::new(ExErrorKind::PreconditionViolation)
                    .with_entity(type_name)
                    .with_message(message)
            }
            RepositoryError::PrimaryKeyAlreadySet { type_name, key } => {
                ExError::new(ExErrorKind::PreconditionViolation)
                    .with_entity(type_name)
                    .with_key(key)
                    .with_message(message)
            }
            RepositoryError::UpdateMissingKey { key } => {
                ExError::new(ExErrorKind::PreconditionViolation)
                    .with_key(key)
                    .with_message(message)
            }
            RepositoryError::DeleteMissingKey { key } => ExError::new(ExErrorKind::NotFound)
                .with_key(key)
                .with_message(message),
            RepositoryError::UnexpectedField { field } => {
                ExError::new(ExErrorKind::UnexpectedField)
                    .with_field(field)
                    .with_message(message)
            }
            RepositoryError::TypeMismatch { field, .. } => {
                ExError::new(ExErrorKind::TypeMismatch)
                    .with_field(field)
                    .with_message(message)
            }
            RepositoryError::InvalidDateTime { .. } | RepositoryError::NotANumber => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}
