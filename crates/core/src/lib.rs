//! Core types, payload validation, and error taxonomy for the feedback service.

pub mod analytics;
pub mod error;
pub mod feedback;
pub mod limits;
pub mod query;
pub mod reports;
pub mod suggestion;
pub mod timestamp;
pub mod types;
pub mod update;
pub mod validation;

pub use analytics::*;
pub use error::{DbErrorCode, Error, FieldViolation, Result, ValidationErrorCode};
pub use feedback::*;
pub use query::*;
pub use reports::*;
pub use suggestion::*;
pub use types::*;
pub use update::*;
