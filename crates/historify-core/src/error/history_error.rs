//! History errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum HistoryError {
    // =========================================================================
    // Registration Errors
    // =========================================================================
    #[error("Entity is not registered for history: {0}")]
    NotRegistered(&'static str),

    #[error("Entity already registered for history: {0}")]
    AlreadyRegistered(&'static str),

    #[error("History table already claimed by another entity: {0}")]
    DuplicateHistoryTable(String),

    #[error("Invalid SQL identifier: {0:?}")]
    InvalidIdentifier(String),

    // =========================================================================
    // Payload Errors
    // =========================================================================
    #[error("Malformed changed_fields payload: {0}")]
    MalformedChangedFields(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl HistoryError {
    /// Get an error code string for logs and API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotRegistered(_) => "HISTORY_NOT_REGISTERED",
            Self::AlreadyRegistered(_) => "HISTORY_ALREADY_REGISTERED",
            Self::DuplicateHistoryTable(_) => "HISTORY_DUPLICATE_TABLE",
            Self::InvalidIdentifier(_) => "HISTORY_INVALID_IDENTIFIER",
            Self::MalformedChangedFields(_) => "HISTORY_MALFORMED_PAYLOAD",
            Self::Serialization(_) => "HISTORY_SERIALIZATION_ERROR",
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Check if this error was raised while building the registry
    pub fn is_registration(&self) -> bool {
        matches!(
            self,
            Self::NotRegistered(_)
                | Self::AlreadyRegistered(_)
                | Self::DuplicateHistoryTable(_)
                | Self::InvalidIdentifier(_)
        )
    }

    /// Check if this error came from the storage layer
    pub fn is_database(&self) -> bool {
        matches!(self, Self::DatabaseError(_))
    }
}

impl From<serde_json::Error> for HistoryError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            HistoryError::NotRegistered("Widget").code(),
            "HISTORY_NOT_REGISTERED"
        );
        assert_eq!(
            HistoryError::DatabaseError("boom".to_string()).code(),
            "DATABASE_ERROR"
        );
    }

    #[test]
    fn test_is_registration() {
        assert!(HistoryError::AlreadyRegistered("Widget").is_registration());
        assert!(HistoryError::InvalidIdentifier("a b".to_string()).is_registration());
        assert!(!HistoryError::DatabaseError("x".to_string()).is_registration());
    }

    #[test]
    fn test_error_display() {
        let err = HistoryError::NotRegistered("Widget");
        assert_eq!(err.to_string(), "Entity is not registered for history: Widget");

        let err = HistoryError::InvalidIdentifier("drop table".to_string());
        assert_eq!(err.to_string(), "Invalid SQL identifier: \"drop table\"");
    }
}
