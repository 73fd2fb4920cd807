//! # Form Error Type
//!
//! Unified error type for form operations, shaped for the hosting page.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Expense Form                       │
//! │                                                                         │
//! │  Page                         Rust                                      │
//! │  ────                         ────                                      │
//! │                                                                         │
//! │  click "remove" on a row that is already gone                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  FormController::dispatch                                        │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  RowStore::remove_row ── CoreError::RowNotFound ──► FormError ──►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "NOT_FOUND", "message": "Row not found: 6f1c..." }          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Totals never fail. These errors only come from stale row references
//! and from invalid setup (template, prefixes).

use expense_core::{CoreError, ValidationError};
use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

/// Error returned from form operations.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "row template does not contain placeholder '__prefix__'"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Error, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
#[error("[{code:?}] {message}")]
pub struct FormError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The event referred to a row that does not exist
    NotFound,

    /// Setup or input shape was rejected
    ValidationError,
}

impl FormError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        FormError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        FormError::new(ErrorCode::ValidationError, message)
    }
}

impl From<CoreError> for FormError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::RowNotFound(_) => FormError::new(ErrorCode::NotFound, err.to_string()),
            CoreError::Validation(e) => FormError::from(e),
        }
    }
}

impl From<ValidationError> for FormError {
    fn from(err: ValidationError) -> Self {
        FormError::validation(err.to_string())
    }
}

/// Result alias for form operations.
pub type FormResult<T> = Result<T, FormError>;
