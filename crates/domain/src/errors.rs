//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for SafeHours
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum SafeHoursError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid time value: {0}")]
    InvalidTime(String),

    #[error("Activity overlaps an existing activity: {0}")]
    OverlapConflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Import error: {0}")]
    Import(String),
}

/// Result type alias for SafeHours operations
pub type Result<T> = std::result::Result<T, SafeHoursError>;
