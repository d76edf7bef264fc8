//! Error types for ferro-rename
//!
//! Every error carries a numeric [`ErrorCode`] so callers (and the CLI) can
//! categorize failures without matching on message text.
//!
//! Malformed *data* lines are never errors: the renamer passes them through.
//! Only problems with the inputs themselves (missing files, bad alias records,
//! empty read files) and I/O failures surface here.

use std::fmt;
use thiserror::Error;

/// Error codes for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // Input errors (E1xxx)
    /// Input file does not exist
    InputNotFound = 1001,
    /// Alias source (TSV or registry document) does not exist
    AliasSourceNotFound = 1002,
    /// Input contained no countable lines
    EmptyInput = 1003,

    // Record errors (E2xxx)
    /// Alias record could not be split into exactly two fields
    MalformedAliasRecord = 2001,

    // Configuration errors (E3xxx)
    /// Invalid configuration value
    InvalidConfig = 3001,

    // IO errors (E9xxx)
    /// File IO error
    IoError = 9001,
    /// JSON parsing error
    JsonError = 9002,
}

impl ErrorCode {
    /// Get the error code as a string (e.g., "E1001")
    pub fn as_str(&self) -> String {
        format!("E{:04}", *self as u16)
    }

    /// Get a brief description of this error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::InputNotFound => "input file not found",
            ErrorCode::AliasSourceNotFound => "alias source not found",
            ErrorCode::EmptyInput => "input contains no lines",
            ErrorCode::MalformedAliasRecord => "malformed alias record",
            ErrorCode::InvalidConfig => "invalid configuration",
            ErrorCode::IoError => "file I/O error",
            ErrorCode::JsonError => "JSON parsing error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for ferro-rename operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenameError {
    /// Input file to be renamed or counted does not exist
    #[error("Input file {path} not found")]
    InputNotFound { path: String },

    /// Alias file or registry document does not exist
    #[error("Alias file {path} not found")]
    AliasSourceNotFound { path: String },

    /// An alias record could not be turned into an `old -> new` pair
    #[error("Malformed alias record at line {line}: {reason}: {record:?}")]
    MalformedAliasRecord {
        /// 1-based line (TSV) or entry (registry) number
        line: usize,
        record: String,
        reason: String,
    },

    /// No lines were found where at least one is required
    #[error("Zero lines found in {path}, check the BED file")]
    EmptyInput { path: String },

    /// Invalid configuration value
    #[error("Config error: {msg}")]
    Config { msg: String },

    /// IO error (for file operations)
    #[error("IO error: {msg}")]
    Io { msg: String },

    /// JSON parsing error
    #[error("JSON error: {msg}")]
    Json { msg: String },
}

impl RenameError {
    /// Create a malformed-record error
    pub fn malformed(line: usize, record: impl Into<String>, reason: impl Into<String>) -> Self {
        RenameError::MalformedAliasRecord {
            line,
            record: record.into(),
            reason: reason.into(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            RenameError::InputNotFound { .. } => ErrorCode::InputNotFound,
            RenameError::AliasSourceNotFound { .. } => ErrorCode::AliasSourceNotFound,
            RenameError::MalformedAliasRecord { .. } => ErrorCode::MalformedAliasRecord,
            RenameError::EmptyInput { .. } => ErrorCode::EmptyInput,
            RenameError::Config { .. } => ErrorCode::InvalidConfig,
            RenameError::Io { .. } => ErrorCode::IoError,
            RenameError::Json { .. } => ErrorCode::JsonError,
        }
    }

    /// Get a formatted error prefixed with its code, plus a hint where one helps
    pub fn detailed_message(&self) -> String {
        let mut result = format!("[{}] {}", self.code(), self);
        let hint = match self {
            RenameError::MalformedAliasRecord { .. } => {
                Some("alias records must be `old_name<TAB>new_name`; use --on-malformed skip to ignore bad records")
            }
            RenameError::AliasSourceNotFound { .. } => {
                Some("pass a two-column TSV or a JSON registry of canonical -> alias names")
            }
            _ => None,
        };
        if let Some(hint) = hint {
            result.push_str("\n\nHint: ");
            result.push_str(hint);
        }
        result
    }
}

impl From<std::io::Error> for RenameError {
    fn from(err: std::io::Error) -> Self {
        RenameError::Io {
            msg: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for RenameError {
    fn from(err: serde_json::Error) -> Self {
        RenameError::Json {
            msg: err.to_string(),
        }
    }
}
