//! Error handling for prgview
//!
//! Parsing PRG text never fails; malformed lines are dropped and reported as
//! diagnostics instead. The errors here cover contract violations when a
//! program is assembled by hand and invalid rendering options.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// PRG program error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PrgError {
    /// Command and shutter flag sequences differ in length
    #[error("Program has {commands} commands but {flags} shutter flags")]
    LengthMismatch {
        /// Number of commands supplied.
        commands: usize,
        /// Number of shutter flags supplied.
        flags: usize,
    },

    /// A rendering option is out of range
    #[error("Invalid option '{name}': {reason}")]
    InvalidOption {
        /// The option name.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Main error type for prgview
#[derive(Error, Debug)]
pub enum Error {
    /// Program error
    #[error(transparent)]
    Prg(#[from] PrgError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a program error
    pub fn is_prg_error(&self) -> bool {
        matches!(self, Error::Prg(_))
    }
}

/// Result type for prgview operations
pub type Result<T> = std::result::Result<T, Error>;
