//! Append-only records: interaction events and status checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::Result;
use crate::timestamp;
use crate::validation::required;

/// A recorded user interaction event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAnalytics {
    pub id: String,
    pub user_id: Option<String>,
    pub page_path: String,
    /// Free-form action name ("view", "click", "submit", ...)
    pub action: String,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub session_id: Option<String>,
}

/// Client submission for `POST /api/analytics`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AnalyticsEventInput {
    pub id: Option<String>,
    pub user_id: Option<String>,
    #[validate(required)]
    pub page_path: Option<String>,
    #[validate(required)]
    pub action: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub user_agent: Option<String>,
    pub session_id: Option<String>,
}

impl AnalyticsEventInput {
    /// Stamps `id` and `timestamp` when the client left them out.
    pub fn into_record(self) -> Result<UserAnalytics> {
        self.validate()?;

        Ok(UserAnalytics {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            user_id: self.user_id,
            page_path: required(self.page_path, "page_path")?,
            action: required(self.action, "action")?,
            timestamp: self.timestamp.unwrap_or_else(timestamp::now),
            user_agent: self.user_agent,
            session_id: self.session_id,
        })
    }
}

/// Liveness probe record kept for compatibility with older clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: String,
    pub client_name: String,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// Body of `POST /api/status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct StatusCheckCreate {
    #[validate(required)]
    pub client_name: Option<String>,
}

impl StatusCheckCreate {
    pub fn into_record(self) -> Result<StatusCheck> {
        self.validate()?;

        Ok(StatusCheck {
            id: Uuid::new_v4().to_string(),
            client_name: required(self.client_name, "client_name")?,
            timestamp: timestamp::now(),
        })
    }
}
