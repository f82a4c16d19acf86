//! Unified error types for the feedback service.
//!
//! Error codes:
//! - VALID_001-004: Validation errors
//! - NOT_FOUND: Unknown entity identifier
//! - DB_001: Store errors

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Validation error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorCode {
    /// VALID_001: Payload is not JSON or has the wrong JSON type
    InvalidFormat,
    /// VALID_002: Required field missing or empty
    MissingField,
    /// VALID_003: Numeric value outside its allowed range
    OutOfRange,
    /// VALID_004: Value is not a member of the field's enumeration
    InvalidEnum,
}

impl ValidationErrorCode {
    /// Get the error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidFormat => "VALID_001",
            Self::MissingField => "VALID_002",
            Self::OutOfRange => "VALID_003",
            Self::InvalidEnum => "VALID_004",
        }
    }

    /// Get the HTTP status code.
    pub fn http_status(&self) -> u16 {
        422
    }
}

/// Database error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbErrorCode {
    /// DB_001: Store unreachable or the operation failed
    StoreFailed,
}

impl DbErrorCode {
    /// Get the error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::StoreFailed => "DB_001",
        }
    }

    /// Get the HTTP status code.
    pub fn http_status(&self) -> u16 {
        500
    }
}

/// Code reported for unknown identifiers.
pub const NOT_FOUND_CODE: &str = "NOT_FOUND";

/// A single failed constraint on a submitted field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub code: ValidationErrorCode,
    pub message: String,
}

impl FieldViolation {
    pub fn new(
        field: impl Into<String>,
        code: ValidationErrorCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code.code(), self.field, self.message)
    }
}

fn describe_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Unified error type for the feedback service.
#[derive(Debug, Error)]
pub enum Error {
    /// Submission rejected before any write.
    #[error("validation failed: {}", describe_violations(.0))]
    Validation(Vec<FieldViolation>),

    /// Identifier does not resolve to a stored entity.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Store error with code.
    #[error("[{code}] {message}")]
    Store {
        code: &'static str,
        message: String,
        http_status: u16,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a validation error for a single field.
    pub fn validation(
        field: impl Into<String>,
        code: ValidationErrorCode,
        msg: impl Into<String>,
    ) -> Self {
        Self::Validation(vec![FieldViolation::new(field, code, msg)])
    }

    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Create a store error.
    pub fn store(code: DbErrorCode, msg: impl Into<String>) -> Self {
        Self::Store {
            code: code.code(),
            message: msg.into(),
            http_status: code.http_status(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Validation(violations) => violations
                .first()
                .map(|v| v.code.http_status())
                .unwrap_or(422),
            Self::NotFound { .. } => 404,
            Self::Store { http_status, .. } => *http_status,
            Self::Serialization(_) => 500,
            Self::Internal(_) => 500,
        }
    }

    /// Get the error code if this is a coded error.
    ///
    /// Validation errors report the code of their first violation.
    pub fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::Validation(violations) => violations.first().map(|v| v.code.code()),
            Self::NotFound { .. } => Some(NOT_FOUND_CODE),
            Self::Store { code, .. } => Some(code),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
