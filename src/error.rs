//! Error types for the CircuitLab engine.
//!
//! The error surface is deliberately small. [`CircuitLabError::InvalidConnection`]
//! is an expected, frequent outcome of exploratory play and is always returned,
//! never panicked. Everything else signals a bug in the adapter or in a
//! descriptor table rather than a user mistake.

use thiserror::Error;

/// Result type alias using [`CircuitLabError`].
pub type Result<T> = std::result::Result<T, CircuitLabError>;

/// Unified error type for all engine operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CircuitLabError {
    /// An attempted pairing violates the experiment's topology rules.
    ///
    /// Surfaced to the player as a rejection notification; the selection is
    /// cleared and the player may retry.
    #[error("Invalid connection: {a} to {b} is not allowed here")]
    InvalidConnection { a: String, b: String },

    /// Reference to an unknown terminal name or id.
    ///
    /// This never arises from normal interaction; it means the presentation
    /// adapter and the terminal registry disagree about the board layout.
    #[error("Terminal '{terminal}' not found on this board")]
    TerminalNotFound { terminal: String },

    /// A board definition declared the same terminal name twice.
    #[error("Duplicate terminal name '{terminal}' in board definition")]
    DuplicateTerminal { terminal: String },
}

impl CircuitLabError {
    /// Create an invalid-connection error for the given terminal names.
    pub fn invalid_connection(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self::InvalidConnection {
            a: a.into(),
            b: b.into(),
        }
    }

    /// Create a terminal-not-found error.
    pub fn not_found(terminal: impl Into<String>) -> Self {
        Self::TerminalNotFound {
            terminal: terminal.into(),
        }
    }
}
