//! # Input Coercion
//!
//! Turns whatever text sits in a quantity or unit-price field into a
//! number. This never fails: empty or non-numeric text is zero.
//!
//! ## Parsing Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "  12.5 "   → 12.5      surrounding whitespace ignored                 │
//! │  "12abc"     → 12        longest numeric prefix wins                    │
//! │  ".5"        → 0.5       missing integer part is fine                   │
//! │  "3."        → 3         dangling point is fine                         │
//! │  "1e3"       → 1000      exponent honoured                              │
//! │  "-2"        → -2        sign kept (business sense is not our job)      │
//! │  "", "abc"   → 0                                                        │
//! │  "1,000"     → 1         grouping separators end the number             │
//! │  "1e29"      → MAX       past the decimal range clamps to its bounds    │
//! │  "1e-40"     → 0         too small to represent                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::money::Money;

/// Parses a field value into a decimal, falling back to zero.
///
/// ## Example
/// ```rust
/// use expense_core::input::parse_decimal;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_decimal("2"), Decimal::from(2));
/// assert_eq!(parse_decimal("12abc"), Decimal::from(12));
/// assert_eq!(parse_decimal("abc"), Decimal::ZERO);
/// ```
pub fn parse_decimal(raw: &str) -> Decimal {
    numeric_prefix(raw.trim()).unwrap_or(Decimal::ZERO)
}

/// Parses a unit-price field into money.
pub fn parse_amount(raw: &str) -> Money {
    Money::from_decimal(parse_decimal(raw))
}

fn numeric_prefix(text: &str) -> Option<Decimal> {
    let bytes = text.as_bytes();
    let mut pos = 0;
    let mut mantissa = String::with_capacity(text.len() + 1);

    if let Some(&sign) = bytes.first() {
        if sign == b'-' || sign == b'+' {
            if sign == b'-' {
                mantissa.push('-');
            }
            pos += 1;
        }
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = &text[int_start..pos];

    let mut frac_digits = "";
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        frac_digits = &text[frac_start..end];
        pos = end;
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    mantissa.push_str(if int_digits.is_empty() { "0" } else { int_digits });
    if !frac_digits.is_empty() {
        mantissa.push('.');
        mantissa.push_str(frac_digits);
    }

    let exponent = exponent_suffix(&text[pos..]);
    let parsed = match exponent {
        Some(exp) => Decimal::from_scientific(&format!("{}e{}", mantissa, exp)),
        None => Decimal::from_str(&mantissa),
    };

    Some(parsed.unwrap_or_else(|_| {
        out_of_range(mantissa.starts_with('-'), int_digits, exponent)
    }))
}

/// A well-formed number `Decimal` cannot hold. Magnitudes that are too
/// large clamp to `Decimal::MAX` / `Decimal::MIN`, the same way `Money`
/// saturates. Anything else is too small and reads as zero.
fn out_of_range(negative: bool, int_digits: &str, exponent: Option<&str>) -> Decimal {
    let exp = match exponent {
        Some(exp) => exp.parse::<i64>().unwrap_or(if exp.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        }),
        None => 0,
    };
    let int_len = int_digits.trim_start_matches('0').len() as i64;

    if int_len.saturating_add(exp) > 0 {
        if negative {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    } else {
        Decimal::ZERO
    }
}

/// Reads `e12`, `E-3`, `e+4` at the start of `rest`. A bare `e` is not an
/// exponent and leaves the mantissa alone.
fn exponent_suffix(rest: &str) -> Option<&str> {
    let bytes = rest.as_bytes();
    if !matches!(bytes.first(), Some(b'e') | Some(b'E')) {
        return None;
    }

    let mut end = 1;
    if matches!(bytes.get(end), Some(b'-') | Some(b'+')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }

    if end == digits_start {
        None
    } else {
        Some(&rest[1..end])
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
