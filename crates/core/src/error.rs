//! Error types for Retain Theme
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Main error type for Retain Theme
#[derive(Error, Debug)]
pub enum RetainError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Retain Theme operations
pub type Result<T> = std::result::Result<T, RetainError>;

impl RetainError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            RetainError::Io(e) => format!("File operation failed: {}", e),
            RetainError::Config(msg) => format!("Configuration error: {}", msg),
            RetainError::TomlParse(e) => format!("Configuration file is malformed: {}", e),
            _ => self.to_string(),
        }
    }
}
