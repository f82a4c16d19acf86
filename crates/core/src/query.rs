//! Listing filters and pagination.

use serde::{Deserialize, Serialize};

use crate::error::{Error, FieldViolation, Result};
use crate::limits::{DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use crate::types::{Category, EnumField, FeedbackType, Priority, Status};

/// Skip/limit window over a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u64,
    pub limit: u64,
}

impl Page {
    /// Clamps `limit` to [`MAX_LIST_LIMIT`].
    pub fn new(skip: Option<u64>, limit: Option<u64>) -> Self {
        Self {
            skip: skip.unwrap_or(0),
            limit: limit.unwrap_or(DEFAULT_LIST_LIMIT).min(MAX_LIST_LIMIT),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Raw query string of `GET /api/feedback`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackListParams {
    pub status: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub feedback_type: Option<String>,
    pub limit: Option<u64>,
    pub skip: Option<u64>,
}

/// Raw query string of `GET /api/suggestions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuggestionListParams {
    pub status: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub limit: Option<u64>,
    pub skip: Option<u64>,
}

/// Conjunctive filter over feedback; `None` imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackQuery {
    pub status: Option<Status>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub feedback_type: Option<FeedbackType>,
    pub page: Page,
}

/// Conjunctive filter over suggestions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionQuery {
    pub status: Option<Status>,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub page: Page,
}

fn parse_param<E: EnumField>(
    field: &str,
    raw: Option<String>,
    violations: &mut Vec<FieldViolation>,
) -> Option<E> {
    let raw = raw?;
    match E::parse_field(field, &raw) {
        Ok(value) => Some(value),
        Err(Error::Validation(found)) => {
            violations.extend(found);
            None
        }
        Err(_) => None,
    }
}

impl FeedbackListParams {
    pub fn into_query(self) -> Result<FeedbackQuery> {
        let mut violations = Vec::new();
        let query = FeedbackQuery {
            status: parse_param("status", self.status, &mut violations),
            category: parse_param("category", self.category, &mut violations),
            priority: parse_param("priority", self.priority, &mut violations),
            feedback_type: parse_param("feedback_type", self.feedback_type, &mut violations),
            page: Page::new(self.skip, self.limit),
        };
        if violations.is_empty() {
            Ok(query)
        } else {
            Err(Error::Validation(violations))
        }
    }
}

impl SuggestionListParams {
    pub fn into_query(self) -> Result<SuggestionQuery> {
        let mut violations = Vec::new();
        let query = SuggestionQuery {
            status: parse_param("status", self.status, &mut violations),
            category: parse_param("category", self.category, &mut violations),
            priority: parse_param("priority", self.priority, &mut violations),
            page: Page::new(self.skip, self.limit),
        };
        if violations.is_empty() {
            Ok(query)
        } else {
            Err(Error::Validation(violations))
        }
    }
}
