//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the ledgers, the payroll engine and the report builder
//! can surface to their callers.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// Core computations never return ambiguous falsy values; they return one of
/// these variants and leave the HTTP-level mapping to the caller.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::not_found("employee", "emp_404");
/// assert_eq!(error.to_string(), "employee not found: emp_404");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Bad input: missing required field, invalid date/time range, non-numeric salary.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// The field (or input) that was invalid.
        field: String,
        /// A description of what made it invalid.
        message: String,
    },

    /// An employee, organization, leave request or reimbursement does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity that was looked up.
        entity: String,
        /// The identifier that was not found.
        id: String,
    },

    /// The request conflicts with the current state (double check-in/checkout,
    /// already-cancelled leave, ...).
    #[error("Conflict: {message}")]
    Conflict {
        /// A description of the conflicting state.
        message: String,
    },

    /// The storage layer was unavailable or failed.
    #[error("Storage unavailable: {message}")]
    Infrastructure {
        /// A description of the failure.
        message: String,
    },

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
}

impl EngineError {
    /// Creates a [`EngineError::Validation`] error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a [`EngineError::NotFound`] error.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Creates a [`EngineError::Conflict`] error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Creates a [`EngineError::Infrastructure`] error.
    pub fn infrastructure(message: impl Into<String>) -> Self {
        Self::Infrastructure {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
