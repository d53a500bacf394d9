use std::io;
use thiserror::Error;

/// Crate-wide error type for the fallible edges around the feedback engine.
///
/// The engine itself never returns this: analysis is total. Errors only arise
/// while loading configuration, compiling rule books, or installing logging.
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents standard input/output errors (e.g., reading a rules file).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents data validation errors (e.g., an empty pattern in a rule book).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents configuration-related errors (e.g., an unknown log format).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents unexpected internal errors that indicate a bug.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            AppError::Io(e) => AppError::Io(io::Error::new(e.kind(), e.to_string())),
            AppError::Validation(s) => AppError::Validation(s.clone()),
            AppError::Config(s) => AppError::Config(s.clone()),
            AppError::Internal(s) => AppError::Internal(s.clone()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("JSON error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}

impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        AppError::Config(format!("Invalid rule pattern: {}", err))
    }
}

impl From<tracing_subscriber::filter::ParseError> for AppError {
    fn from(err: tracing_subscriber::filter::ParseError) -> Self {
        AppError::Config(format!("Invalid log filter: {}", err))
    }
}
