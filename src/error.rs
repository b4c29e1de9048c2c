// src/error.rs

//! Unified error handling for the sentiment pipeline.

use std::fmt;

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Credentials missing or rejected by the search provider
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Search provider request failed
    #[error("Query error: {0}")]
    Query(String),

    /// The search returned zero posts
    #[error("No posts found for keyword '{keyword}'")]
    NoResults { keyword: String },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding/decoding failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Object store upload failed
    #[error("Publish error: {0}")]
    Publish(String),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create an authentication error.
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    /// Create a query error.
    pub fn query(message: impl fmt::Display) -> Self {
        Self::Query(message.to_string())
    }

    /// Create an empty-result error for a keyword.
    pub fn no_results(keyword: impl Into<String>) -> Self {
        Self::NoResults {
            keyword: keyword.into(),
        }
    }

    /// Create a publish error.
    pub fn publish(message: impl fmt::Display) -> Self {
        Self::Publish(message.to_string())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether this error halts the run. Only publish failures are tolerated.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Publish(_))
    }

    /// Name of the pipeline stage this error belongs to.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Authentication(_) => "authenticate",
            Self::Query(_) | Self::NoResults { .. } | Self::Http(_) | Self::Url(_) => "fetch",
            // Response bodies are decoded into `Query` errors; only reports reach here.
            Self::Json(_) => "report",
            Self::Io(_) | Self::Csv(_) => "export",
            Self::Publish(_) => "publish",
            Self::Toml(_) | Self::Config(_) | Self::Validation(_) => "configure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_publish_errors_are_non_fatal() {
        assert!(!AppError::publish("access denied").is_fatal());
        assert!(AppError::auth("missing token").is_fatal());
        assert!(AppError::query("rate limited").is_fatal());
        assert!(AppError::no_results("AWS").is_fatal());
        assert!(AppError::Io(std::io::Error::other("disk full")).is_fatal());
    }

    #[test]
    fn stage_names() {
        assert_eq!(AppError::auth("x").stage(), "authenticate");
        assert_eq!(AppError::no_results("AWS").stage(), "fetch");
        assert_eq!(AppError::Io(std::io::Error::other("x")).stage(), "export");
        assert_eq!(AppError::publish("x").stage(), "publish");
    }

    #[test]
    fn json_errors_are_not_fetch_errors() {
        let err: AppError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.stage(), "report");
    }

    #[test]
    fn no_results_message_names_keyword() {
        let err = AppError::no_results("AWS");
        assert_eq!(err.to_string(), "No posts found for keyword 'AWS'");
    }
}
