//! Application error types for the REST client, storage, and validation.
use thiserror::Error;

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error payload or a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("{0}")]
    Validation(String),

    #[error("Question not found")]
    NotFound,
}

impl AppError {
    /// Message suitable for an inline error block or alert dialog.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Api { message, .. } if !message.trim().is_empty() => message.clone(),
            AppError::Api { status, .. } => format!("Server responded with {}", status),
            other => other.to_string(),
        }
    }
}
