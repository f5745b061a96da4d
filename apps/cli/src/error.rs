//! # Console Error Type
//!
//! What the menu loop acts on when a handler fails.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Console                            │
//! │                                                                         │
//! │  Handler                                                                │
//! │  CliResult<()>                                                          │
//! │       │                                                                 │
//! │       ├── ValidationError ── handled in place, re-prompt                │
//! │       │                                                                 │
//! │       ├── CliError::Db (statement failed) ── stderr, back to the menu   │
//! │       │                                                                 │
//! │       ├── CliError::Db (connection lost) ─┐                             │
//! │       ├── CliError::Io ───────────────────┼── loop stops, main reports  │
//! │       │                                   │                             │
//! │       └── CliError::InputClosed ──────────┘   (treated as Exit)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use hotel_db::DbError;
use thiserror::Error;

/// Errors surfaced by prompts and handlers.
#[derive(Debug, Error)]
pub enum CliError {
    /// A statement or the connection failed.
    #[error(transparent)]
    Db(#[from] DbError),

    /// Reading the console or writing to it failed.
    ///
    /// ## When This Occurs
    /// - stdout was closed (e.g., piped into `head`)
    /// - stdin is not readable
    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// End of input reached at a prompt.
    #[error("Input closed")]
    InputClosed,
}

impl CliError {
    /// Whether the menu can report this error and carry on.
    pub fn is_recoverable(&self) -> bool {
        match self {
            CliError::Db(e) => !e.is_fatal(),
            _ => false,
        }
    }
}

/// Result type for prompts and handlers.
pub type CliResult<T> = Result<T, CliError>;
