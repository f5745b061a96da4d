//! # Error Types
//!
//! Validation errors raised while parsing console input.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  hotel-core (this file)                                                │
//! │  └── ValidationError  - Input could not be parsed / is out of range    │
//! │                                                                         │
//! │  hotel-db                                                              │
//! │  └── DbError          - Connection and statement failures              │
//! │                                                                         │
//! │  apps/cli                                                              │
//! │  └── CliError         - What the menu loop acts on                     │
//! │                                                                         │
//! │  ValidationError → re-prompt in place                                  │
//! │  DbError         → message on stderr, back to the menu                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Input validation errors.
///
/// A handler that receives one of these prints it and asks again; it never
/// leaves the current prompt.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (e.g., not an integer, not MM/DD/YYYY).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// A range whose start lies after its end.
    #[error("{start} must not be after {end}")]
    InvertedRange { start: String, end: String },
}

impl ValidationError {
    /// Creates an InvalidFormat error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a Required error.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;
