//! # Validation Module
//!
//! Setup-time checks for the pieces the page hands the core once: the
//! row template, its placeholder token, and the field-name prefix.
//!
//! User-entered quantities and prices are never validated here; they are
//! coerced (see [`crate::input`]).
//!
//! ## Usage
//! ```rust
//! use expense_core::validation::{validate_field_prefix, validate_row_template};
//!
//! validate_field_prefix("items").unwrap();
//! validate_row_template("<input name=\"items-__prefix__-quantity\">", "__prefix__").unwrap();
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates the prefix that field identifiers start with (`items` in
/// `items-0-quantity`).
///
/// ## Rules
/// - Must not be empty
/// - Only letters, numbers and underscores (a hyphen would make the
///   `{prefix}-{index}-` segment ambiguous)
///
/// ## Example
/// ```rust
/// use expense_core::validation::validate_field_prefix;
///
/// assert!(validate_field_prefix("items").is_ok());
/// assert!(validate_field_prefix("line_items").is_ok());
/// assert!(validate_field_prefix("").is_err());
/// assert!(validate_field_prefix("line-items").is_err());
/// ```
pub fn validate_field_prefix(prefix: &str) -> ValidationResult<()> {
    if prefix.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "field_prefix".to_string(),
        });
    }

    if !prefix.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(ValidationError::InvalidFormat {
            field: "field_prefix".to_string(),
            reason: "must contain only letters, numbers, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates the placeholder token.
///
/// ## Rules
/// - Must not be empty or contain whitespace
/// - Must not contain digits, or substituting an index could produce a
///   string that still looks like the placeholder
pub fn validate_placeholder(placeholder: &str) -> ValidationResult<()> {
    if placeholder.is_empty() {
        return Err(ValidationError::Required {
            field: "placeholder".to_string(),
        });
    }

    if placeholder
        .chars()
        .any(|c| c.is_whitespace() || c.is_ascii_digit())
    {
        return Err(ValidationError::InvalidFormat {
            field: "placeholder".to_string(),
            reason: "must not contain whitespace or digits".to_string(),
        });
    }

    Ok(())
}

/// Validates a row template against its placeholder.
///
/// ## Rules
/// - Template must not be blank
/// - Placeholder must itself be valid
/// - Template must contain the placeholder at least once
pub fn validate_row_template(source: &str, placeholder: &str) -> ValidationResult<()> {
    if source.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "row_template".to_string(),
        });
    }

    validate_placeholder(placeholder)?;

    if !source.contains(placeholder) {
        return Err(ValidationError::MissingPlaceholder {
            placeholder: placeholder.to_string(),
        });
    }

    Ok(())
}

/// Validates that the template's identifiers use `field_prefix`.
///
/// Renumbering rewrites the `{prefix}-{index}-` segment, so a template
/// rendered for one prefix and renumbered under another keeps stale
/// identifiers.
///
/// ## Example
/// ```rust
/// use expense_core::validation::validate_index_segment;
///
/// let row = "<input name=\"items-__prefix__-quantity\">";
/// assert!(validate_index_segment(row, "items", "__prefix__").is_ok());
/// assert!(validate_index_segment(row, "lines", "__prefix__").is_err());
/// ```
pub fn validate_index_segment(
    source: &str,
    field_prefix: &str,
    placeholder: &str,
) -> ValidationResult<()> {
    let segment = format!("{}-{}-", field_prefix, placeholder);
    if !source.contains(&segment) {
        return Err(ValidationError::MissingIndexSegment { segment });
    }

    Ok(())
}

/// Validates the currency prefix shown before every amount.
///
/// Empty is allowed (plain numbers); control characters are not.
pub fn validate_currency_prefix(prefix: &str) -> ValidationResult<()> {
    if prefix.chars().any(char::is_control) {
        return Err(ValidationError::InvalidFormat {
            field: "currency_prefix".to_string(),
            reason: "must not contain control characters".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
