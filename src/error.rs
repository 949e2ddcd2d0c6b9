use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::models::SearchEnvelope;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("No match: {0}")]
    NoMatch(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap a store failure seen by the corpus accessor
    pub fn storage(err: impl std::fmt::Display) -> Self {
        Error::StorageUnavailable(err.to_string())
    }

    /// Get a sanitized error message safe for logging
    pub fn log_safe(&self) -> String {
        match self {
            // Store errors might contain schema details or connection strings
            Error::StorageUnavailable(_) => "Recipe store unavailable".to_string(),
            Error::Database(_) => "Database operation failed".to_string(),
            Error::Migration(_) => "Database migration failed".to_string(),

            Error::Http(_) => "External HTTP request failed".to_string(),

            Error::Internal(msg) => {
                let lower = msg.to_lowercase();
                if lower.contains("password") || lower.contains("secret") || lower.contains("token")
                {
                    "Internal error (details redacted)".to_string()
                } else {
                    format!("Internal error: {msg}")
                }
            }

            Error::InvalidQuery(msg) => format!("Invalid query: {msg}"),
            Error::NoMatch(msg) => format!("No match: {msg}"),
            Error::Io(_) => "File system operation failed".to_string(),
            Error::Config(msg) => format!("Configuration error: {msg}"),
            Error::Validation(msg) => format!("Validation error: {msg}"),
        }
    }

    /// HTTP status and client-facing message for this error
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Error::InvalidQuery(msg) | Error::Validation(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            Error::NoMatch(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Error::StorageUnavailable(_) | Error::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Recipe store unavailable".to_string(),
            ),
            Error::Http(_) => (
                StatusCode::BAD_GATEWAY,
                "External service error".to_string(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!("Request error: {}", self.log_safe());
        } else {
            tracing::debug!("Request rejected: {}", self.log_safe());
        }

        (status, Json(SearchEnvelope::failure(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let (status, _) = Error::InvalidQuery("missing".into()).status_and_message();
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, msg) = Error::NoMatch("Recipe not found".into()).status_and_message();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(msg, "Recipe not found");

        let (status, msg) = Error::storage("disk I/O error").status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!msg.contains("disk"));
    }

    #[test]
    fn test_log_safe_redacts_secrets() {
        let err = Error::Internal("bad secret in config".into());
        assert_eq!(err.log_safe(), "Internal error (details redacted)");

        let err = Error::storage("connection to sqlite:/var/db refused");
        assert_eq!(err.log_safe(), "Recipe store unavailable");
    }
}
