//! History entry <-> model mapper

use chrono::{DateTime, Utc};

use historify_core::{ChangeSet, ChangedFields, HistoryEntry, HistoryError, CREATED_MARKER};

use crate::models::HistoryModel;

/// Convert HistoryModel to HistoryEntry, parsing the stored payload
impl TryFrom<HistoryModel> for HistoryEntry {
    type Error = HistoryError;

    fn try_from(model: HistoryModel) -> Result<Self, Self::Error> {
        Ok(HistoryEntry {
            history_id: model.history_id,
            model_id: model.model_id,
            timestamp: model.timestamp,
            actor: model.actor,
            changed_fields: ChangedFields::parse(&model.changed_fields)?,
        })
    }
}

/// Values for inserting one history row
#[derive(Debug, Clone)]
pub struct HistoryInsert {
    pub model_id: i64,
    pub timestamp: DateTime<Utc>,
    pub actor: String,
    pub changed_fields: String,
}

impl HistoryInsert {
    /// Row for the insert event
    pub fn created(model_id: i64, actor: String) -> Self {
        Self {
            model_id,
            timestamp: Utc::now(),
            actor,
            changed_fields: CREATED_MARKER.to_string(),
        }
    }

    /// Row for an update event
    pub fn updated(model_id: i64, actor: String, changes: ChangeSet) -> Result<Self, HistoryError> {
        Ok(Self {
            model_id,
            timestamp: Utc::now(),
            actor,
            changed_fields: ChangedFields::Updated(changes).to_stored()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use historify_core::FieldChange;

    fn model(changed_fields: &str) -> HistoryModel {
        HistoryModel {
            history_id: 1,
            model_id: 2,
            timestamp: Utc::now(),
            actor: "alice".to_string(),
            changed_fields: changed_fields.to_string(),
        }
    }

    #[test]
    fn test_created_row() {
        let row = HistoryInsert::created(9, "alice".to_string());
        assert_eq!(row.model_id, 9);
        assert_eq!(row.changed_fields, "created");
    }

    #[test]
    fn test_updated_row() {
        let mut changes = ChangeSet::new();
        changes.insert("price".to_string(), FieldChange::new("10", "20"));

        let row = HistoryInsert::updated(9, "alice".to_string(), changes).unwrap();
        assert_eq!(row.changed_fields, r#"{"price":{"from":"10","to":"20"}}"#);
    }

    #[test]
    fn test_model_to_entry() {
        let entry = HistoryEntry::try_from(model("created")).unwrap();
        assert_eq!(entry.model_id, 2);
        assert!(entry.changed_fields.is_created());

        let entry = HistoryEntry::try_from(model(r#"{"name":{"from":"a","to":"b"}}"#)).unwrap();
        assert_eq!(
            entry.changed_fields.changes().unwrap()["name"],
            FieldChange::new("a", "b")
        );
    }

    #[test]
    fn test_model_with_bad_payload() {
        assert!(HistoryEntry::try_from(model("not json")).is_err());
    }
}
