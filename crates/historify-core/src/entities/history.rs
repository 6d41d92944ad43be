//! History entity - one audit row recorded for a base entity

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::HistoryError;

/// Marker stored in `changed_fields` for the insert event
pub const CREATED_MARKER: &str = "created";

/// Before/after pair for one changed column, both stringified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    pub from: String,
    pub to: String,
}

impl FieldChange {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Changed-field mapping keyed by column name
pub type ChangeSet = BTreeMap<String, FieldChange>;

/// Payload of the `changed_fields` column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangedFields {
    /// Row recorded for the initial insert
    Created,
    /// Row recorded for an update with at least one changed column
    Updated(ChangeSet),
}

impl ChangedFields {
    /// Render the payload the way it is persisted
    pub fn to_stored(&self) -> Result<String, HistoryError> {
        match self {
            Self::Created => Ok(CREATED_MARKER.to_string()),
            Self::Updated(changes) => Ok(serde_json::to_string(changes)?),
        }
    }

    /// Parse a persisted payload
    pub fn parse(stored: &str) -> Result<Self, HistoryError> {
        if stored == CREATED_MARKER {
            return Ok(Self::Created);
        }

        serde_json::from_str::<ChangeSet>(stored)
            .map(Self::Updated)
            .map_err(|e| HistoryError::MalformedChangedFields(e.to_string()))
    }

    #[inline]
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created)
    }

    /// Get the changed columns, if this is an update payload
    pub fn changes(&self) -> Option<&ChangeSet> {
        match self {
            Self::Created => None,
            Self::Updated(changes) => Some(changes),
        }
    }
}

impl fmt::Display for ChangedFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_stored() {
            Ok(s) => f.write_str(&s),
            Err(_) => Err(fmt::Error),
        }
    }
}

/// A single recorded history row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub history_id: i64,
    pub model_id: i64,
    pub timestamp: DateTime<Utc>,
    pub actor: String,
    pub changed_fields: ChangedFields,
}

impl HistoryEntry {
    /// Human readable one-line description, e.g.
    /// `<WidgetHistory on 2024-01-01 00:00:00 UTC by alice changed created>`
    pub fn summary(&self, history_name: &str) -> String {
        format!(
            "<{} on {} by {} changed {}>",
            history_name, self.timestamp, self.actor, self.changed_fields
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_created_marker() {
        assert_eq!(ChangedFields::Created.to_stored().unwrap(), "created");
        assert!(ChangedFields::parse("created").unwrap().is_created());
    }

    #[test]
    fn test_updated_payload_shape() {
        let mut changes = ChangeSet::new();
        changes.insert("price".to_string(), FieldChange::new("10", "20"));

        let stored = ChangedFields::Updated(changes).to_stored().unwrap();
        assert_eq!(stored, r#"{"price":{"from":"10","to":"20"}}"#);
    }

    #[test]
    fn test_parse_updated() {
        let parsed =
            ChangedFields::parse(r#"{"name": {"from": "a", "to": "b"}}"#).unwrap();
        let changes = parsed.changes().unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes["name"], FieldChange::new("a", "b"));
    }

    #[test]
    fn test_parse_malformed() {
        let err = ChangedFields::parse("").unwrap_err();
        assert_eq!(err.code(), "HISTORY_MALFORMED_PAYLOAD");

        assert!(ChangedFields::parse(r#"{"name": "b"}"#).is_err());
    }

    #[test]
    fn test_summary() {
        let entry = HistoryEntry {
            history_id: 1,
            model_id: 7,
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            actor: "alice".to_string(),
            changed_fields: ChangedFields::Created,
        };

        assert_eq!(
            entry.summary("WidgetHistory"),
            "<WidgetHistory on 2024-01-01 00:00:00 UTC by alice changed created>"
        );
    }
}
