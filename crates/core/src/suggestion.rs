//! Suggestion entity and its submission payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::Result;
use crate::timestamp;
use crate::types::{Category, EnumField, Priority, Status};
use crate::validation::{required, validate_category, validate_not_blank};

/// A stored suggestion with its community vote counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub rating: Option<i64>,
    #[serde(default)]
    pub is_anonymous: bool,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
    pub expected_benefit: Option<String>,
    pub status: Status,
    pub priority: Priority,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
    pub admin_notes: Option<String>,
    pub admin_response: Option<String>,
    /// Only ever incremented, one per vote.
    #[serde(default)]
    pub votes: i64,
}

/// Client submission for `POST /api/suggestions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SuggestionCreate {
    #[validate(required, custom(function = "validate_not_blank"))]
    pub title: Option<String>,
    #[validate(required, custom(function = "validate_not_blank"))]
    pub description: Option<String>,
    #[validate(required, custom(function = "validate_category"))]
    pub category: Option<String>,
    /// Interest rating
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i64>,
    #[serde(default)]
    pub is_anonymous: bool,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
    pub expected_benefit: Option<String>,
}

impl SuggestionCreate {
    /// Validates the submission and builds a new pending suggestion.
    pub fn into_suggestion(self) -> Result<Suggestion> {
        self.validate()?;

        let category = Category::parse(&required(self.category, "category")?)?;
        let now = timestamp::now();

        Ok(Suggestion {
            id: Uuid::new_v4().to_string(),
            title: required(self.title, "title")?,
            description: required(self.description, "description")?,
            category,
            rating: self.rating,
            is_anonymous: self.is_anonymous,
            user_email: self.user_email,
            user_name: self.user_name,
            expected_benefit: self.expected_benefit,
            status: Status::Pending,
            priority: Priority::Medium,
            created_at: now,
            updated_at: now,
            admin_notes: None,
            admin_response: None,
            votes: 0,
        })
    }
}
