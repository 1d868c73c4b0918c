//! Error types for pqrunner.
//!
//! Defines the main error enum used throughout the crate. Note that the
//! absence of an `Errors:` or `NEW:` pattern in subprocess output is never
//! an error; those cases are represented by zero / sentinel values instead.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for pqrunner operations.
#[derive(Error, Debug)]
pub enum PqError {
    /// File create/read/write/delete failures, carrying the affected path.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Subprocess deadline exceeded.
    #[error("primusquery timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Subprocess launch failure or non-zero exit.
    #[error("Execution error: {0}")]
    Exec(String),

    /// A matched output pattern carried a digit run that failed to parse.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Import file missing before invocation.
    #[error("Import file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Configuration errors (invalid config file, bad field values).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Secure deletion failed after the file was successfully opened.
    ///
    /// Fatal-class: the file may be partially overwritten and inconsistent.
    /// Callers decide whether to escalate; the library never aborts the
    /// process on its own.
    #[error("Secure delete of {} failed during {stage}: {source}", path.display())]
    SecureDelete {
        path: PathBuf,
        stage: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl PqError {
    /// Creates an I/O error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates an execution error with the given message.
    pub fn exec(msg: impl Into<String>) -> Self {
        Self::Exec(msg.into())
    }

    /// Creates a parse error with the given message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Creates a file-not-found error for the given path.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns true for errors the caller should treat as unrecoverable.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::SecureDelete { .. })
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io { .. } => "I/O Error",
            Self::Timeout { .. } => "Timeout Error",
            Self::Exec(_) => "Execution Error",
            Self::Parse(_) => "Parse Error",
            Self::FileNotFound { .. } => "File Not Found",
            Self::Config(_) => "Configuration Error",
            Self::SecureDelete { .. } => "Secure Delete Failure",
        }
    }
}

/// Result type alias using PqError.
pub type Result<T> = std::result::Result<T, PqError>;
