//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for the conditions that can occur around a salary calculation. The
//! calculation itself never fails on missing data; these errors come from
//! configuration loading and from validating wire input.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No payroll rules are effective for the requested month.
    #[error("No payroll rules effective on {date}")]
    RulesNotFound {
        /// The first day of the month the rules were requested for.
        date: NaiveDate,
    },

    /// A month string was not a valid `YYYY-MM` value.
    #[error("Invalid month '{value}': expected YYYY-MM")]
    InvalidMonth {
        /// The rejected input.
        value: String,
    },

    /// An attendance record carried a status outside the known vocabulary.
    #[error("Unknown attendance status '{status}'")]
    UnknownAttendanceStatus {
        /// The unrecognised status.
        status: String,
    },

    /// An amount on an input row was outside the range the engine accepts.
    #[error("Field '{field}' is out of range: {value}")]
    AmountOutOfRange {
        /// The offending field.
        field: String,
        /// The rejected amount.
        value: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
