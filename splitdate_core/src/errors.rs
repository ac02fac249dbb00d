//! # Error Types
//!
//! Structured error types for splitdate_core. Validation errors carry the
//! exact user-facing message the form should display; configuration and I/O
//! errors carry enough context to find the offending attribute or file.
//!
//! ## Example
//!
//! ```rust
//! use splitdate_core::errors::{DateError, DateResult};
//!
//! fn require_value(item: &str) -> DateResult<()> {
//!     if item.is_empty() {
//!         return Err(DateError::malformed(item, "Enter a month, a day, and a year"));
//!     }
//!     Ok(())
//! }
//!
//! let err = require_value("").unwrap_err();
//! assert_eq!(err.to_string(), "Enter a month, a day, and a year");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parts::DatePart;

/// Result type alias for splitdate_core operations
pub type DateResult<T> = Result<T, DateError>;

/// Which boundary an out-of-range date crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeBound {
    /// Earlier than the configured minimum
    Min,
    /// Later than the configured maximum
    Max,
    /// A birthdate later than today
    Today,
}

/// Structured error type for date validation and its supporting machinery.
///
/// The first four variants are user errors (see [`DateError::is_validation`]);
/// their `Display` output is the message shown next to the field.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum DateError {
    /// Wrong token count, unparsable, or not a real calendar date
    #[error("{message}")]
    Malformed { value: String, message: String },

    /// One or more of month/day/year were left blank
    #[error("{message}")]
    Incomplete {
        missing: Vec<DatePart>,
        message: String,
    },

    /// Before the minimum, after the maximum, or a birthdate in the future
    #[error("{message}")]
    OutOfRange {
        value: String,
        bound: RangeBound,
        message: String,
    },

    /// The day does not exist in the given month (e.g. February 31)
    #[error("{message}")]
    CalendarOverflow { value: String, message: String },

    /// A field attribute could not be understood
    #[error("Invalid attribute '{attribute}': {value} - {reason}")]
    InvalidConfig {
        attribute: String,
        value: String,
        reason: String,
    },

    /// No data type is registered under this name
    #[error("Unknown data type: {name}")]
    UnknownDataType { name: String },

    /// A data type with this name is already registered
    #[error("Data type already registered: {name}")]
    DuplicateDataType { name: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl DateError {
    /// Create a Malformed error
    pub fn malformed(value: impl Into<String>, message: impl Into<String>) -> Self {
        DateError::Malformed {
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create an Incomplete error
    pub fn incomplete(missing: Vec<DatePart>, message: impl Into<String>) -> Self {
        DateError::Incomplete {
            missing,
            message: message.into(),
        }
    }

    /// Create an OutOfRange error
    pub fn out_of_range(value: impl Into<String>, bound: RangeBound, message: impl Into<String>) -> Self {
        DateError::OutOfRange {
            value: value.into(),
            bound,
            message: message.into(),
        }
    }

    /// Create a CalendarOverflow error
    pub fn calendar_overflow(value: impl Into<String>, message: impl Into<String>) -> Self {
        DateError::CalendarOverflow {
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create an InvalidConfig error
    pub fn invalid_config(attribute: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        DateError::InvalidConfig {
            attribute: attribute.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        DateError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by what the user typed, as opposed to
    /// configuration or I/O problems.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DateError::Malformed { .. }
                | DateError::Incomplete { .. }
                | DateError::OutOfRange { .. }
                | DateError::CalendarOverflow { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            DateError::Malformed { .. } => "MALFORMED_DATE",
            DateError::Incomplete { .. } => "INCOMPLETE_DATE",
            DateError::OutOfRange { .. } => "OUT_OF_RANGE",
            DateError::CalendarOverflow { .. } => "CALENDAR_OVERFLOW",
            DateError::InvalidConfig { .. } => "INVALID_CONFIG",
            DateError::UnknownDataType { .. } => "UNKNOWN_DATA_TYPE",
            DateError::DuplicateDataType { .. } => "DUPLICATE_DATA_TYPE",
            DateError::FileError { .. } => "FILE_ERROR",
            DateError::SerializationError { .. } => "SERIALIZATION_ERROR",
            DateError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}
