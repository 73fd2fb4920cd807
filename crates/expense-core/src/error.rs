//! # Error Types
//!
//! Domain-specific error types for expense-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  expense-core errors (this file)                                       │
//! │  ├── CoreError        - Row store precondition failures                │
//! │  └── ValidationError  - Template / configuration validation            │
//! │                                                                         │
//! │  expense-form errors (separate crate)                                  │
//! │  └── FormError        - What the hosting page sees (serialized)        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → FormError → Page                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! Malformed numbers, missing display slots and an unselected tax method
//! all have a defined fallback. None of them ever surfaces here.

use thiserror::Error;

use crate::types::RowId;

// =============================================================================
// Core Error
// =============================================================================

/// Core logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The addressed row is not (or no longer) in the store.
    ///
    /// ## When This Occurs
    /// - A remove click arrives for a row that a previous click already removed
    /// - An edit event carries a stale row id
    #[error("Row not found: {0}")]
    RowNotFound(RowId),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Setup-time validation errors (templates, prefixes).
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (e.g., a field prefix with spaces).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// The row template never mentions its index placeholder.
    #[error("row template does not contain placeholder '{placeholder}'")]
    MissingPlaceholder { placeholder: String },

    /// No identifier in the row template carries the `{prefix}-{placeholder}-`
    /// segment, so rendered rows could never be renumbered.
    #[error("row template does not contain the index segment '{segment}'")]
    MissingIndexSegment { segment: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
