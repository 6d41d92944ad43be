//! History schema - names and shape of the table paired with a base entity

use crate::error::HistoryError;
use crate::traits::Historified;

/// Suffix appended to the entity name to name its history type
pub const HISTORY_NAME_SUFFIX: &str = "History";

/// Suffix appended to the base table to name its history table
pub const HISTORY_TABLE_SUFFIX: &str = "_histories";

/// Width of the `actor` column
pub const ACTOR_MAX_LENGTH: usize = 100;

/// Columns of every history table, in declaration order
pub const HISTORY_COLUMNS: [&str; 5] = [
    "history_id",
    "model_id",
    "timestamp",
    "actor",
    "changed_fields",
];

/// Derived description of one history table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistorySchema {
    /// Base entity type name, e.g. `Widget`
    pub entity_name: &'static str,
    /// Base entity table, e.g. `widgets`
    pub entity_table: &'static str,
    /// Base entity identifier column, e.g. `id`
    pub entity_id_column: &'static str,
    /// History type name, e.g. `WidgetHistory`
    pub history_name: String,
    /// History table, e.g. `widgets_histories`
    pub history_table: String,
}

impl HistorySchema {
    /// Derive the schema for a base entity type
    ///
    /// Fails if any name that ends up in SQL is not a plain identifier.
    pub fn of<T: Historified>() -> Result<Self, HistoryError> {
        Self::derive(T::ENTITY_NAME, T::TABLE_NAME, T::ID_COLUMN)
    }

    fn derive(
        entity_name: &'static str,
        entity_table: &'static str,
        entity_id_column: &'static str,
    ) -> Result<Self, HistoryError> {
        for name in [entity_name, entity_table, entity_id_column] {
            validate_identifier(name)?;
        }

        Ok(Self {
            entity_name,
            entity_table,
            entity_id_column,
            history_name: format!("{entity_name}{HISTORY_NAME_SUFFIX}"),
            history_table: format!("{entity_table}{HISTORY_TABLE_SUFFIX}"),
        })
    }

    /// Name of the lookup index on `model_id`
    pub fn model_index_name(&self) -> String {
        format!("ix_{}_model_id", self.history_table)
    }
}

/// Accept `[A-Za-z_][A-Za-z0-9_]*`, at most 63 bytes (PostgreSQL NAMEDATALEN - 1)
fn validate_identifier(name: &str) -> Result<(), HistoryError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    // Leave room for the "_histories" suffix
    let fits = name.len() + HISTORY_TABLE_SUFFIX.len() <= 63;

    if valid_start && valid_rest && fits {
        Ok(())
    } else {
        Err(HistoryError::InvalidIdentifier(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_names() {
        let schema = HistorySchema::derive("Widget", "widgets", "id").unwrap();
        assert_eq!(schema.history_name, "WidgetHistory");
        assert_eq!(schema.history_table, "widgets_histories");
        assert_eq!(schema.model_index_name(), "ix_widgets_histories_model_id");
    }

    #[test]
    fn test_rejects_non_identifiers() {
        for bad in ["", "1widgets", "widgets; drop", "wid-gets", "\"w\""] {
            let err = HistorySchema::derive("Widget", bad, "id").unwrap_err();
            assert!(matches!(err, HistoryError::InvalidIdentifier(_)), "{bad}");
        }
    }

    #[test]
    fn test_rejects_overlong_table() {
        let long: &'static str = "t_abcdefghijklmnopqrstuvwxyz_abcdefghijklmnopqrstuvwxyz";
        assert!(HistorySchema::derive("Widget", long, "id").is_err());
    }

    #[test]
    fn test_accepts_underscores() {
        assert!(HistorySchema::derive("_Widget2", "shop_widgets", "widget_id").is_ok());
    }
}
