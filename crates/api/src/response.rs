//! Standardized API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use feedback_core::{error::NOT_FOUND_CODE, Error, FieldViolation, ValidationErrorCode};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Acknowledgement body.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub store_connected: bool,
    pub uptime_secs: i64,
}

/// One rejected field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl From<&FieldViolation> for ErrorDetail {
    fn from(violation: &FieldViolation) -> Self {
        Self {
            field: violation.field.clone(),
            code: violation.code.code().to_string(),
            message: violation.message.clone(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ErrorDetail>>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Vec<ErrorDetail>) -> Self {
        self.details = Some(details);
        self
    }
}

/// API error carrying the HTTP status and the coded body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ErrorResponse,
}

impl ApiError {
    pub fn with_code(status: StatusCode, code: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            status,
            response: ErrorResponse::new(msg, code),
        }
    }

    /// Body that is not JSON or does not fit the expected shape.
    pub fn malformed(field: impl Into<String>, msg: impl Into<String>) -> Self {
        let code = ValidationErrorCode::InvalidFormat;
        let violation = FieldViolation::new(field, code, msg);
        Self::validation(&[violation])
    }

    pub fn validation(violations: &[FieldViolation]) -> Self {
        let code = violations
            .first()
            .map(|v| v.code)
            .unwrap_or(ValidationErrorCode::InvalidFormat);

        Self {
            status: StatusCode::from_u16(code.http_status())
                .unwrap_or(StatusCode::UNPROCESSABLE_ENTITY),
            response: ErrorResponse::new("Validation failed", code.code())
                .with_details(violations.iter().map(ErrorDetail::from).collect()),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::with_code(StatusCode::NOT_FOUND, NOT_FOUND_CODE, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_code(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL", msg)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match &err {
            Error::Validation(violations) => ApiError::validation(violations),
            Error::NotFound { kind, .. } => ApiError::not_found(format!("{} not found", kind)),
            Error::Store {
                code, http_status, ..
            } => {
                let status = StatusCode::from_u16(*http_status)
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                ApiError::with_code(status, *code, "Store operation failed")
            }
            Error::Serialization(_) | Error::Internal(_) => {
                error!(error = %err, "Request failed");
                ApiError::internal("Internal server error")
            }
        }
    }
}
