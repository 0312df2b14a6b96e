//! Error types for plebsfin-core
//!
//! Every failure the record store or PIN gate can produce, with a stable code
//! and severity so the HTTP boundary can map and log them uniformly.

use thiserror::Error;
use serde::{Deserialize, Serialize};

use crate::types::Category;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Patch or toggle target missing
    RecordNotFound,
    /// PIN verification failed
    InvalidPin,
    /// Old PIN did not match on change
    InvalidCurrentPin,
    /// Malformed or incomplete request
    BadRequest,
    /// Storage backend unavailable
    StorageError,
    /// Stored document could not be (de)serialized
    SerializationError,
    /// Internal error
    InternalError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::RecordNotFound => write!(f, "RECORD_NOT_FOUND"),
            ErrorCode::InvalidPin => write!(f, "INVALID_PIN"),
            ErrorCode::InvalidCurrentPin => write!(f, "INVALID_CURRENT_PIN"),
            ErrorCode::BadRequest => write!(f, "BAD_REQUEST"),
            ErrorCode::StorageError => write!(f, "STORAGE_ERROR"),
            ErrorCode::SerializationError => write!(f, "SERIALIZATION_ERROR"),
            ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
        }
    }
}

/// Detailed error information for logs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Expected outcome of user input
    Info,
    /// Operation refused
    Warning,
    /// Operation failed
    Error,
    /// Backend unusable
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Main error type for plebsfin-core
#[derive(Error, Debug, Clone)]
pub enum CoreError {
    #[error("Not found")]
    RecordNotFound { category: Category, id: String },

    #[error("Invalid PIN")]
    InvalidPin,

    #[error("Invalid current PIN")]
    InvalidCurrentPin,

    #[error("{message}")]
    BadRequest { message: String },

    #[error("Storage unavailable: {message}")]
    Storage { message: String },

    #[error("Corrupt document '{key}': {message}")]
    Serialization { key: String, message: String },

    #[error("{message}")]
    Internal { message: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::RecordNotFound { .. } => ErrorCode::RecordNotFound,
            CoreError::InvalidPin => ErrorCode::InvalidPin,
            CoreError::InvalidCurrentPin => ErrorCode::InvalidCurrentPin,
            CoreError::BadRequest { .. } => ErrorCode::BadRequest,
            CoreError::Storage { .. } => ErrorCode::StorageError,
            CoreError::Serialization { .. } => ErrorCode::SerializationError,
            CoreError::Internal { .. } => ErrorCode::InternalError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::RecordNotFound { .. } => ErrorSeverity::Info,
            CoreError::BadRequest { .. } => ErrorSeverity::Info,
            CoreError::InvalidPin => ErrorSeverity::Warning,
            CoreError::InvalidCurrentPin => ErrorSeverity::Warning,
            CoreError::Serialization { .. } => ErrorSeverity::Error,
            CoreError::Internal { .. } => ErrorSeverity::Error,
            CoreError::Storage { .. } => ErrorSeverity::Critical,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::RecordNotFound { category, id } => {
                details = details.with_detail(serde_json::json!({
                    "category": category.key(),
                    "id": id,
                }));
            }
            CoreError::Storage { .. } => {
                details = details.with_suggestion(
                    "Check that storage.path exists and is writable.".to_string()
                );
            }
            CoreError::Serialization { key, .. } => {
                details = details.with_suggestion(format!(
                    "The stored '{}' document no longer matches the expected shape.", key
                ));
            }
            _ => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<std::io::Error> for CoreError {
    fn from(error: std::io::Error) -> Self {
        CoreError::Storage { message: error.to_string() }
    }
}

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed, e.g. `POST /api/goals`
    pub operation: String,
    /// Additional context data
    pub data: serde_json::Value,
}

impl ErrorContext {
    pub fn new(operation: String) -> Self {
        Self {
            operation,
            data: serde_json::json!({}),
        }
    }

    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data[key] = value;
        self
    }
}

/// Error logger trait
pub trait ErrorLogger: Send + Sync {
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        match error.severity() {
            ErrorSeverity::Info => log::debug!(
                target: "plebsfin::error",
                "{} - Operation: {}", error.to_details(), context.operation
            ),
            ErrorSeverity::Warning => log::warn!(
                target: "plebsfin::error",
                "{} - Operation: {}", error.to_details(), context.operation
            ),
            ErrorSeverity::Error | ErrorSeverity::Critical => log::error!(
                target: "plebsfin::error",
                "{} - Operation: {} - Data: {}", error.to_details(), context.operation, context.data
            ),
        }
    }
}

// ==================== Tests ====================
