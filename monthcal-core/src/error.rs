//! Error types for monthcal.

use thiserror::Error;

use crate::date_key::DateKey;

/// Errors that can occur in monthcal operations.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("{0}")]
    Validation(String),

    #[error("No event '{event_id}' on {date}")]
    NotFound { date: DateKey, event_id: String },

    #[error("Could not save events: {0}")]
    Persistence(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CalendarError {
    pub fn is_validation(&self) -> bool {
        matches!(self, CalendarError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CalendarError::NotFound { .. })
    }
}

/// Result type alias for monthcal operations.
pub type CalendarResult<T> = Result<T, CalendarError>;
