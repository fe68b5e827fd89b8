//! Error types for CiteGraph
//!
//! Provides the error handling system shared by the loader, configuration
//! and command line layers:
//! - Distinct error types for different failure modes
//! - Machine-readable error codes
//! - Process exit code mapping for the CLI
//!
//! The analytics engine itself signals by value (an unknown seed yields a
//! zero H-index) and never returns these errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Error codes for machine-readable error identification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors (1xxx)
    ValidationError,
    InvalidFormat,

    // Resource errors (4xxx)
    ArticleNotFound,
    DatasetNotFound,

    // Internal errors (9xxx)
    InternalError,
    IoError,
    ConfigurationError,
    SerializationError,
}

impl ErrorCode {
    /// Get the numeric code for this error
    pub fn as_code(&self) -> u16 {
        match self {
            // Validation (1xxx)
            ErrorCode::ValidationError => 1001,
            ErrorCode::InvalidFormat => 1003,

            // Resources (4xxx)
            ErrorCode::ArticleNotFound => 4002,
            ErrorCode::DatasetNotFound => 4003,

            // Internal (9xxx)
            ErrorCode::InternalError => 9001,
            ErrorCode::ConfigurationError => 9002,
            ErrorCode::SerializationError => 9003,
            ErrorCode::IoError => 9004,
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    // Resource errors
    #[error("Article not found: {id}")]
    ArticleNotFound { id: String },

    #[error("Dataset not found: {path}")]
    DatasetNotFound { path: String },

    // Internal errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { .. } => ErrorCode::ValidationError,
            AppError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            AppError::ArticleNotFound { .. } => ErrorCode::ArticleNotFound,
            AppError::DatasetNotFound { .. } => ErrorCode::DatasetNotFound,
            AppError::Io(_) => ErrorCode::IoError,
            AppError::Internal { .. } => ErrorCode::InternalError,
            AppError::Configuration { .. } => ErrorCode::ConfigurationError,
            AppError::Serialization(_) => ErrorCode::SerializationError,
            AppError::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Process exit code for the command line front end
    ///
    /// Follows the BSD `sysexits` convention.
    pub fn exit_code(&self) -> i32 {
        match self {
            // EX_DATAERR
            AppError::Validation { .. } | AppError::InvalidFormat { .. } | AppError::Serialization(_) => 65,

            // EX_NOINPUT
            AppError::ArticleNotFound { .. } | AppError::DatasetNotFound { .. } => 66,

            // EX_IOERR
            AppError::Io(_) => 74,

            // EX_CONFIG
            AppError::Configuration { .. } => 78,

            // EX_SOFTWARE
            AppError::Internal { .. } | AppError::Other(_) => 70,
        }
    }

    /// Check if this error was caused by the caller's input
    pub fn is_user_error(&self) -> bool {
        matches!(self.exit_code(), 65 | 66)
    }
}

/// Structured error payload for JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        let code = err.code();
        let message = err.to_string();

        if err.is_user_error() {
            tracing::warn!(error = %message, code = ?code, "Input error");
        } else {
            tracing::error!(error = %message, code = ?code, "Internal error");
        }

        ErrorResponse {
            error: ErrorDetails {
                code,
                message,
                details: None,
            },
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration {
            message: err.to_string(),
        }
    }
}
