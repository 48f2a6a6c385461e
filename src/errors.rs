/*!
 * Error types for the librarium data-access layer.
 *
 * Every fallible operation of the gateway and of the entity records returns
 * a [`LibraryError`]. Callers that only care about the broad category can
 * match on [`LibraryError::kind`].
 */

use std::fmt;

use thiserror::Error;

use crate::app_config::Engine;
use crate::validation::ValidationIssue;

/// Broad category of a [`LibraryError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The backing store could not be reached or opened
    Connection,
    /// A statement could not be prepared, bound, executed or read
    Statement,
    /// Timestamp text did not match the expected pattern
    Parse,
    /// Configuration is missing or inconsistent
    Config,
    /// A record failed its optional pre-persistence checks
    Validation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Connection => write!(f, "connection"),
            ErrorKind::Statement => write!(f, "statement"),
            ErrorKind::Parse => write!(f, "parse"),
            ErrorKind::Config => write!(f, "config"),
            ErrorKind::Validation => write!(f, "validation"),
        }
    }
}

/// Errors raised by the gateway, the entity records and the date utilities
#[derive(Error, Debug)]
pub enum LibraryError {
    /// Opening the connection failed
    #[error("Connection error: {0}")]
    Connection(String),

    /// The gateway is already connected to another target
    #[error("Connection error: already connected to {connected}, refusing to switch to {requested}")]
    TargetMismatch {
        /// URL of the open connection
        connected: String,
        /// URL that was requested
        requested: String,
    },

    /// The configured engine has no driver in this build
    #[error("Connection error: no driver available for engine {0}")]
    UnsupportedEngine(Engine),

    /// Error reported by the SQL engine
    #[error("Statement error: {0}")]
    Statement(#[from] rusqlite::Error),

    /// A mutating statement was passed to a read operation
    #[error("Statement error: not a read-only statement: {0}")]
    NotReadOnly(String),

    /// Cursor access while positioned before the first or after the last row
    #[error("Statement error: cursor is not positioned on a row")]
    NoCurrentRow,

    /// Cursor access by a column name the result set does not have
    #[error("Statement error: unknown column {0}")]
    UnknownColumn(String),

    /// A column value could not be converted to the requested type
    #[error("Statement error: cannot convert column {column}: {message}")]
    Conversion {
        /// Column index
        column: usize,
        /// Conversion failure
        message: String,
    },

    /// Timestamp text did not match the pattern
    #[error("Parse error: cannot parse '{input}' with pattern {pattern}: {message}")]
    Parse {
        /// Text that was parsed
        input: String,
        /// Name of the pattern used
        pattern: String,
        /// Underlying failure
        message: String,
    },

    /// Invalid configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Failed validation checks
    #[error("Validation error: {}", format_issues(.0))]
    Validation(Vec<ValidationIssue>),
}

impl LibraryError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Connection(_) | Self::TargetMismatch { .. } | Self::UnsupportedEngine(_) => {
                ErrorKind::Connection
            }
            Self::Statement(_)
            | Self::NotReadOnly(_)
            | Self::NoCurrentRow
            | Self::UnknownColumn(_)
            | Self::Conversion { .. } => ErrorKind::Statement,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::Config(_) => ErrorKind::Config,
            Self::Validation(_) => ErrorKind::Validation,
        }
    }
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
