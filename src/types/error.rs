//! Error types for the Rust Dashboard Engine
//!
//! This module defines all error types that can occur while loading fixtures,
//! authenticating callers, validating requests and writing output.
//! Errors are designed to be descriptive and user-friendly for both the
//! request layer (as JSON `error` bodies) and CLI output.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: Fixture not found, permission denied, etc.
//! - **Parse Errors**: Malformed fixture JSON
//! - **Request Errors**: Missing parameters, invalid range/window/cursor
//! - **Access Errors**: Authentication failure, missing permission, foreign resource
//! - **Calendar Errors**: Bucket arithmetic beyond the representable date range

use crate::types::Permission;
use thiserror::Error;

/// Main error type for the dashboard engine
///
/// Every variant maps to an HTTP status through [`DashboardError::status_code`],
/// which the request layer uses to build its error response.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    /// I/O error occurred while reading fixtures or writing output
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// A fixture file could not be parsed
    #[error("Failed to parse {file}: {message}")]
    ParseError {
        /// Fixture file name (e.g. `accounts.json`)
        file: String,
        /// Description of the parsing error
        message: String,
    },

    /// A required query parameter was absent
    #[error("{name} query parameter is required")]
    MissingParameter {
        /// Name of the missing parameter
        name: String,
    },

    /// Balance-history range outside the supported set
    #[error("range query parameter is required and must be one of: 1m, 3m, 6m, 1y")]
    InvalidRange {
        /// The rejected value
        value: String,
    },

    /// Transaction lookback window outside the supported set
    #[error("Invalid range '{value}': must be one of: 5d, 1m")]
    InvalidWindow {
        /// The rejected value
        value: String,
    },

    /// Pagination cursor does not reference a transaction in the result set
    #[error("Invalid cursor '{cursor}'")]
    InvalidCursor {
        /// The rejected cursor
        cursor: String,
    },

    /// Invalid `--now` or other instant supplied by the caller
    #[error("Invalid timestamp '{value}': {message}")]
    InvalidTimestamp {
        /// The rejected value
        value: String,
        /// Parser message
        message: String,
    },

    /// Authentication failed (missing header, unknown token)
    #[error("{message}")]
    Unauthenticated {
        /// Human-readable reason
        message: String,
    },

    /// The caller's role does not grant the permission a route requires
    #[error("Insufficient permissions")]
    InsufficientPermissions {
        /// The permission that was required
        required: Permission,
    },

    /// The caller does not own the requested account
    #[error("Access denied to this account")]
    AccessDenied {
        /// Account the caller tried to read
        account_id: String,
    },

    /// Account not found in the data source
    #[error("Account not found")]
    AccountNotFound {
        /// The account identifier that was not found
        account_id: String,
    },

    /// Request used a method other than GET
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Calendar arithmetic left chrono's representable range
    #[error("Date out of range while computing buckets from {reference}")]
    DateOutOfRange {
        /// The reference instant the buckets were derived from
        reference: String,
    },

    /// Replaying transactions pushed a balance past Decimal's range
    #[error("Balance overflow while replaying account {account_id}")]
    BalanceOverflow {
        /// The account whose history was being derived
        account_id: String,
    },

    /// CSV output error
    #[error("CSV write error: {message}")]
    CsvError {
        /// Description of the CSV error
        message: String,
    },

    /// The async runtime could not be created or a task failed
    #[error("Runtime error: {message}")]
    RuntimeError {
        /// Description of the runtime failure
        message: String,
    },
}

// Conversion from io::Error to DashboardError
impl From<std::io::Error> for DashboardError {
    fn from(error: std::io::Error) -> Self {
        DashboardError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to DashboardError
impl From<csv::Error> for DashboardError {
    fn from(error: csv::Error) -> Self {
        DashboardError::CsvError {
            message: error.to_string(),
        }
    }
}

// Conversion from serde_json::Error for output serialization; fixture parsing
// goes through `DashboardError::parse` to keep the file name.
impl From<serde_json::Error> for DashboardError {
    fn from(error: serde_json::Error) -> Self {
        DashboardError::IoError {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl DashboardError {
    /// Create a ParseError for a fixture file
    pub fn parse(file: &str, message: impl ToString) -> Self {
        DashboardError::ParseError {
            file: file.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a MissingParameter error
    pub fn missing_parameter(name: &str) -> Self {
        DashboardError::MissingParameter {
            name: name.to_string(),
        }
    }

    /// Create an InvalidRange error
    pub fn invalid_range(value: &str) -> Self {
        DashboardError::InvalidRange {
            value: value.to_string(),
        }
    }

    /// Create an InvalidWindow error
    pub fn invalid_window(value: &str) -> Self {
        DashboardError::InvalidWindow {
            value: value.to_string(),
        }
    }

    /// Create an InvalidCursor error
    pub fn invalid_cursor(cursor: &str) -> Self {
        DashboardError::InvalidCursor {
            cursor: cursor.to_string(),
        }
    }

    /// Create an Unauthenticated error
    pub fn unauthenticated(message: &str) -> Self {
        DashboardError::Unauthenticated {
            message: message.to_string(),
        }
    }

    /// Create an InsufficientPermissions error
    pub fn insufficient_permissions(required: Permission) -> Self {
        DashboardError::InsufficientPermissions { required }
    }

    /// Create an AccessDenied error
    pub fn access_denied(account_id: &str) -> Self {
        DashboardError::AccessDenied {
            account_id: account_id.to_string(),
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(account_id: &str) -> Self {
        DashboardError::AccountNotFound {
            account_id: account_id.to_string(),
        }
    }

    /// Create a DateOutOfRange error
    pub fn date_out_of_range(reference: impl ToString) -> Self {
        DashboardError::DateOutOfRange {
            reference: reference.to_string(),
        }
    }

    /// Create a BalanceOverflow error
    pub fn balance_overflow(account_id: &str) -> Self {
        DashboardError::BalanceOverflow {
            account_id: account_id.to_string(),
        }
    }

    /// Create a RuntimeError
    pub fn runtime(message: impl ToString) -> Self {
        DashboardError::RuntimeError {
            message: message.to_string(),
        }
    }

    /// HTTP status code the request layer answers with for this error
    pub fn status_code(&self) -> u16 {
        match self {
            DashboardError::MissingParameter { .. }
            | DashboardError::InvalidRange { .. }
            | DashboardError::InvalidWindow { .. }
            | DashboardError::InvalidCursor { .. }
            | DashboardError::InvalidTimestamp { .. } => 400,
            DashboardError::Unauthenticated { .. } => 401,
            DashboardError::InsufficientPermissions { .. } | DashboardError::AccessDenied { .. } => {
                403
            }
            DashboardError::AccountNotFound { .. } => 404,
            DashboardError::MethodNotAllowed => 405,
            DashboardError::IoError { .. }
            | DashboardError::ParseError { .. }
            | DashboardError::DateOutOfRange { .. }
            | DashboardError::BalanceOverflow { .. }
            | DashboardError::CsvError { .. }
            | DashboardError::RuntimeError { .. } => 500,
        }
    }
}
