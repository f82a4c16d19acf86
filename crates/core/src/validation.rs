//! Payload validation helpers.
//!
//! Submissions derive `validator::Validate`; this module turns its reports
//! into [`FieldViolation`]s and supplies the custom field checks.

use validator::{ValidationError, ValidationErrors};

use crate::error::{Error, FieldViolation, Result, ValidationErrorCode};
use crate::types::{Category, EnumField, FeedbackType};

/// Validator code for blank text.
const BLANK: &str = "blank";

/// Validator code for enumeration membership.
const INVALID_ENUM: &str = "invalid_enum";

fn code_for(validator_code: &str) -> ValidationErrorCode {
    match validator_code {
        "required" | "length" | BLANK => ValidationErrorCode::MissingField,
        "range" => ValidationErrorCode::OutOfRange,
        INVALID_ENUM => ValidationErrorCode::InvalidEnum,
        _ => ValidationErrorCode::InvalidFormat,
    }
}

fn default_message(code: ValidationErrorCode) -> &'static str {
    match code {
        ValidationErrorCode::MissingField => "field is required",
        ValidationErrorCode::OutOfRange => "value out of range",
        ValidationErrorCode::InvalidEnum => "value is not an allowed member",
        ValidationErrorCode::InvalidFormat => "invalid value",
    }
}

/// JSON key for a struct field whose serde name differs from the Rust one.
fn wire_name(field: &str) -> &str {
    match field {
        "feedback_type" => FeedbackType::FIELD,
        other => other,
    }
}

/// Flattens a validator report into violations, ordered by JSON field name.
pub fn violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut out: Vec<FieldViolation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = wire_name(field).to_string();
            errs.iter().map(move |err| {
                let code = code_for(&err.code);
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| default_message(code).to_string());
                FieldViolation::new(field.clone(), code, message)
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Error::Validation(violations(&errors))
    }
}

/// Unwraps a field already checked with `#[validate(required)]`.
pub fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| {
        Error::validation(
            field,
            ValidationErrorCode::MissingField,
            default_message(ValidationErrorCode::MissingField),
        )
    })
}

pub(crate) fn validate_not_blank(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new(BLANK);
        err.message = Some("must not be empty".into());
        return Err(err);
    }
    Ok(())
}

fn validate_member<E: EnumField>(value: &str) -> std::result::Result<(), ValidationError> {
    if E::is_member(value) {
        return Ok(());
    }
    let expected: Vec<&str> = E::ALL.iter().map(|m| m.as_str()).collect();
    let mut err = ValidationError::new(INVALID_ENUM);
    err.message = Some(format!("`{}` is not one of: {}", value, expected.join(", ")).into());
    Err(err)
}

pub(crate) fn validate_category(value: &str) -> std::result::Result<(), ValidationError> {
    validate_member::<Category>(value)
}

pub(crate) fn validate_feedback_type(value: &str) -> std::result::Result<(), ValidationError> {
    validate_member::<FeedbackType>(value)
}
