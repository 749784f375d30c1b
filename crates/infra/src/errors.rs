//! Infrastructure error types

use safehours_domain::SafeHoursError;
use thiserror::Error;

/// Error type for infrastructure adapters
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Malformed calendar data: {0}")]
    MalformedCalendar(String),
}

impl From<InfraError> for SafeHoursError {
    fn from(err: InfraError) -> Self {
        match err {
            InfraError::Database(inner) => Self::Storage(inner.to_string()),
            InfraError::Io(inner) => Self::Storage(inner.to_string()),
            InfraError::Csv(inner) => Self::Import(inner.to_string()),
            InfraError::MalformedRecord(message) | InfraError::MalformedCalendar(message) => {
                Self::Import(message)
            }
        }
    }
}
