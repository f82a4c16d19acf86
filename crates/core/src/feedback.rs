//! Feedback entity and its submission payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::Result;
use crate::timestamp;
use crate::types::{Category, EnumField, FeedbackType, Priority, Status};
use crate::validation::{
    required, validate_category, validate_feedback_type, validate_not_blank,
};

/// A stored feedback item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    #[serde(rename = "type")]
    pub feedback_type: FeedbackType,
    pub rating: Option<i64>,
    #[serde(default)]
    pub is_anonymous: bool,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
    pub status: Status,
    pub priority: Priority,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
    pub admin_notes: Option<String>,
    pub admin_response: Option<String>,
}

/// Client submission for `POST /api/feedback`.
///
/// Enumerated fields arrive as raw strings so that every violation can be
/// reported by field before anything is stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct FeedbackCreate {
    #[validate(required, custom(function = "validate_not_blank"))]
    pub title: Option<String>,
    #[validate(required, custom(function = "validate_not_blank"))]
    pub description: Option<String>,
    #[validate(required, custom(function = "validate_category"))]
    pub category: Option<String>,
    #[serde(rename = "type")]
    #[validate(required, custom(function = "validate_feedback_type"))]
    pub feedback_type: Option<String>,
    /// 1-5 star rating
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i64>,
    #[serde(default)]
    pub is_anonymous: bool,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
}

impl FeedbackCreate {
    /// Validates the submission and builds a new pending feedback item.
    pub fn into_feedback(self) -> Result<Feedback> {
        self.validate()?;

        let category = Category::parse(&required(self.category, "category")?)?;
        let feedback_type = FeedbackType::parse(&required(self.feedback_type, "type")?)?;
        let now = timestamp::now();

        Ok(Feedback {
            id: Uuid::new_v4().to_string(),
            title: required(self.title, "title")?,
            description: required(self.description, "description")?,
            category,
            feedback_type,
            rating: self.rating,
            is_anonymous: self.is_anonymous,
            user_email: self.user_email,
            user_name: self.user_name,
            status: Status::Pending,
            priority: Priority::Medium,
            created_at: now,
            updated_at: now,
            admin_notes: None,
            admin_response: None,
        })
    }
}
