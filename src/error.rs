//! Custom error types for expenses-cli
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for expense-tracker operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user-supplied values (dates, amounts)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entry not found in the store
    #[error("There is no entry with ID {0}")]
    NotFound(u64),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid query window parameters
    #[error("Invalid window: {0}")]
    InvalidWindow(String),

    /// Polynomial degree incompatible with the number of points
    #[error("Invalid fit degree {degree} for {points} data points (degree must be < points)")]
    InvalidFitDegree { degree: usize, points: usize },

    /// `compare` requires at least one include tag
    #[error("Tag comparison requires at least one include tag")]
    EmptyTagFilter,

    /// Sort key not recognized
    #[error("Unknown sort key '{0}' (expected name, cost or date)")]
    UnknownSortKey(String),

    /// A raw tag token that is just the exclusion marker '/'
    #[error("Malformed tag token '/': exclusion marker with no label")]
    MalformedTagToken,
}

impl ExpenseError {
    /// Create an invalid-window error with the offending bounds named
    pub fn invalid_window(detail: impl Into<String>) -> Self {
        Self::InvalidWindow(detail.into())
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for expense-tracker operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;
