//! # Currency Formatting
//!
//! Turns computed totals into the strings written into the page:
//! prefix + thousands-grouped whole number. Decimals are never shown.
//!
//! ```text
//!   Money(1234567.5) ──► "$ 1,234,568"
//!   Money(0)         ──► "$ 0"
//!   Money(-42)       ──► "$ -42"
//! ```
//!
//! The display rounding here is presentation only; the totals themselves
//! keep their exact values.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::totals::Totals;
use crate::types::RowId;

/// Prefix used when the page does not supply one.
pub const DEFAULT_CURRENCY_PREFIX: &str = "$ ";

/// Currency display policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CurrencyFormat {
    pub prefix: String,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat::new(DEFAULT_CURRENCY_PREFIX)
    }
}

impl CurrencyFormat {
    pub fn new(prefix: impl Into<String>) -> Self {
        CurrencyFormat {
            prefix: prefix.into(),
        }
    }

    /// Formats an amount for display.
    ///
    /// ## Example
    /// ```rust
    /// use expense_core::format::CurrencyFormat;
    /// use expense_core::Money;
    ///
    /// let format = CurrencyFormat::default();
    /// assert_eq!(format.format(Money::from_major(1234567)), "$ 1,234,567");
    /// assert_eq!(format.format(Money::zero()), "$ 0");
    /// ```
    pub fn format(&self, amount: Money) -> String {
        format!("{}{}", self.prefix, group_thousands(amount.whole_units()))
    }

    /// Formats every figure of a recompute.
    pub fn render(&self, totals: &Totals) -> RenderedTotals {
        RenderedTotals {
            line_totals: totals
                .line_totals
                .iter()
                .map(|line| RenderedLine {
                    row: line.row,
                    index: line.index,
                    text: self.format(line.amount),
                })
                .collect(),
            subtotal: self.format(totals.subtotal),
            tax: self.format(totals.tax),
            total: self.format(totals.total),
        }
    }
}

/// A formatted line total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RenderedLine {
    pub row: RowId,
    pub index: usize,
    pub text: String,
}

/// Display strings for one recompute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RenderedTotals {
    pub line_totals: Vec<RenderedLine>,
    pub subtotal: String,
    pub tax: String,
    pub total: String,
}

fn group_thousands(value: i128) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::totals::LineTotal;
    use rust_decimal::Decimal;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(123456), "123,456");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(group_thousands(-1234), "-1,234");
    }

    #[test]
    fn test_format_rounds_for_display() {
        let format = CurrencyFormat::default();
        assert_eq!(format.format(Money::from_decimal(Decimal::new(18450, 3))), "$ 18");
        assert_eq!(format.format(Money::from_decimal(Decimal::new(185, 1))), "$ 19");
    }

    #[test]
    fn test_format_custom_prefix() {
        let format = CurrencyFormat::new("NT$");
        assert_eq!(format.format(Money::from_major(2500)), "NT$2,500");
    }

    #[test]
    fn test_format_negative() {
        let format = CurrencyFormat::default();
        assert_eq!(format.format(Money::from_major(-42)), "$ -42");
    }

    #[test]
    fn test_render_totals() {
        let row = RowId::new();
        let totals = Totals {
            line_totals: vec![LineTotal {
                row,
                index: 0,
                amount: Money::from_major(200),
            }],
            base_amount: Money::from_major(200),
            subtotal: Money::from_major(200),
            tax: Money::from_major(10),
            total: Money::from_major(210),
        };

        let rendered = CurrencyFormat::default().render(&totals);
        assert_eq!(rendered.line_totals[0].row, row);
        assert_eq!(rendered.line_totals[0].text, "$ 200");
        assert_eq!(rendered.subtotal, "$ 200");
        assert_eq!(rendered.tax, "$ 10");
        assert_eq!(rendered.total, "$ 210");
    }
}
