//! Partial update payloads for triage fields.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, FieldViolation, Result, ValidationErrorCode};
use crate::types::{EnumField, Priority, Status};

/// State of one key in a PATCH body.
///
/// Use with `#[serde(default)]` so that an absent key stays `Unchanged`
/// while an explicit `null` becomes `Clear`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    #[default]
    Unchanged,
    Clear,
    Set(T),
}

impl<T> FieldUpdate<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }
}

impl<'de, T> Deserialize<'de> for FieldUpdate<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(value) => Self::Set(value),
            None => Self::Clear,
        })
    }
}

impl<T: Serialize> Serialize for FieldUpdate<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Set(value) => value.serialize(serializer),
            _ => serializer.serialize_none(),
        }
    }
}

/// Body of `PATCH /api/feedback/{id}` and `PATCH /api/suggestions/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRequest {
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub status: FieldUpdate<String>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub priority: FieldUpdate<String>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub admin_notes: FieldUpdate<String>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub admin_response: FieldUpdate<String>,
}

/// A validated partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityUpdate {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub admin_notes: FieldUpdate<String>,
    pub admin_response: FieldUpdate<String>,
}

fn parse_enum_update<E: EnumField>(
    update: FieldUpdate<String>,
    violations: &mut Vec<FieldViolation>,
) -> Option<E> {
    match update {
        FieldUpdate::Unchanged => None,
        FieldUpdate::Clear => {
            violations.push(FieldViolation::new(
                E::FIELD,
                ValidationErrorCode::InvalidEnum,
                format!("{} cannot be null", E::FIELD),
            ));
            None
        }
        FieldUpdate::Set(raw) => match E::parse(&raw) {
            Ok(value) => Some(value),
            Err(Error::Validation(found)) => {
                violations.extend(found);
                None
            }
            Err(_) => None,
        },
    }
}

impl UpdateRequest {
    /// Checks enum membership of the provided fields.
    pub fn into_update(self) -> Result<EntityUpdate> {
        let mut violations = Vec::new();
        let status = parse_enum_update::<Status>(self.status, &mut violations);
        let priority = parse_enum_update::<Priority>(self.priority, &mut violations);

        if !violations.is_empty() {
            return Err(Error::Validation(violations));
        }

        Ok(EntityUpdate {
            status,
            priority,
            admin_notes: self.admin_notes,
            admin_response: self.admin_response,
        })
    }
}

impl EntityUpdate {
    /// True when the body named no field at all.
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.priority.is_none()
            && self.admin_notes.is_unchanged()
            && self.admin_response.is_unchanged()
    }

    /// Fields to set in the stored document, excluding `updated_at`.
    pub fn changes(&self) -> Map<String, Value> {
        let mut changes = Map::new();
        if let Some(status) = self.status {
            changes.insert("status".into(), Value::from(status.as_str()));
        }
        if let Some(priority) = self.priority {
            changes.insert("priority".into(), Value::from(priority.as_str()));
        }
        for (field, update) in [
            ("admin_notes", &self.admin_notes),
            ("admin_response", &self.admin_response),
        ] {
            match update {
                FieldUpdate::Unchanged => {}
                FieldUpdate::Clear => {
                    changes.insert(field.into(), Value::Null);
                }
                FieldUpdate::Set(text) => {
                    changes.insert(field.into(), Value::from(text.as_str()));
                }
            }
        }
        changes
    }
}
