//! Closed enumerations shared by feedback and suggestions.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, ValidationErrorCode};

/// A field restricted to a fixed set of string values.
pub trait EnumField: Sized + Copy + 'static {
    /// Field name used in validation reports.
    const FIELD: &'static str;

    /// Every member, in declaration order.
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    /// Parses a raw value, reporting which field was violated.
    fn parse_field(field: &str, value: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|member| member.as_str() == value)
            .ok_or_else(|| {
                let expected: Vec<&str> = Self::ALL.iter().map(|m| m.as_str()).collect();
                Error::validation(
                    field,
                    ValidationErrorCode::InvalidEnum,
                    format!("`{}` is not one of: {}", value, expected.join(", ")),
                )
            })
    }

    fn parse(value: &str) -> Result<Self> {
        Self::parse_field(Self::FIELD, value)
    }

    fn is_member(value: &str) -> bool {
        Self::ALL.iter().any(|member| member.as_str() == value)
    }
}

/// Feedback and suggestion category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    UserInterface,
    SocialFeatures,
    Content,
    Functionality,
    Performance,
    Security,
    Accessibility,
    Other,
}

impl EnumField for Category {
    const FIELD: &'static str = "category";

    const ALL: &'static [Self] = &[
        Self::UserInterface,
        Self::SocialFeatures,
        Self::Content,
        Self::Functionality,
        Self::Performance,
        Self::Security,
        Self::Accessibility,
        Self::Other,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::UserInterface => "user_interface",
            Self::SocialFeatures => "social_features",
            Self::Content => "content",
            Self::Functionality => "functionality",
            Self::Performance => "performance",
            Self::Security => "security",
            Self::Accessibility => "accessibility",
            Self::Other => "other",
        }
    }
}

/// Kind of feedback submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackType {
    Feedback,
    Suggestion,
    BugReport,
    FeatureRequest,
}

impl EnumField for FeedbackType {
    const FIELD: &'static str = "type";

    const ALL: &'static [Self] = &[
        Self::Feedback,
        Self::Suggestion,
        Self::BugReport,
        Self::FeatureRequest,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Feedback => "feedback",
            Self::Suggestion => "suggestion",
            Self::BugReport => "bug_report",
            Self::FeatureRequest => "feature_request",
        }
    }
}

/// Triage status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Pending,
    Reviewed,
    InProgress,
    Resolved,
    Closed,
}

impl EnumField for Status {
    const FIELD: &'static str = "status";

    const ALL: &'static [Self] = &[
        Self::Pending,
        Self::Reviewed,
        Self::InProgress,
        Self::Resolved,
        Self::Closed,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reviewed => "reviewed",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }
}

/// Triage priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl EnumField for Priority {
    const FIELD: &'static str = "priority";

    const ALL: &'static [Self] = &[Self::Low, Self::Medium, Self::High, Self::Urgent];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

macro_rules! impl_display {
    ($($ty:ty),*) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

impl_display!(Category, FeedbackType, Status, Priority);
