//! # Domain Types
//!
//! Tax configuration and identity types shared by the row store and the
//! totals engine.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    TaxRate      │   │    TaxType      │   │ CalculationMethod   │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  bps (u32)      │   │  Taxable        │   │  Exclusive          │   │
//! │  │  500 = 5%       │   │  ZeroRated      │   │  Inclusive          │   │
//! │  └─────────────────┘   │  TaxExempt      │   └─────────────────────┘   │
//! │                        └─────────────────┘                              │
//! │                                                                         │
//! │  TaxConfiguration = TaxType + Option<CalculationMethod> + TaxRate       │
//! │  RowId            = UUID v4, survives renumbering                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

use crate::DEFAULT_TAX_RATE_BPS;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 500 bps = 5% (the business tax rate the form applies)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as an exact fraction (500 bps → 0.05).
    #[inline]
    pub fn fraction(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 4)
    }
}

/// The fixed 5% rate.
impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::from_bps(DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// Tax Type
// =============================================================================

/// The tax category selected for the whole expense.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaxType {
    /// Tax applies; the calculation method decides how.
    Taxable,
    /// Zero-rated. Arithmetically identical to exempt.
    #[serde(rename = "ZERO_TAX")]
    ZeroRated,
    /// No tax.
    #[default]
    TaxExempt,
}

impl TaxType {
    /// Interprets the value of the tax-type selector.
    ///
    /// Anything unrecognised (including an empty selection) is exempt.
    ///
    /// ## Example
    /// ```rust
    /// use expense_core::types::TaxType;
    ///
    /// assert_eq!(TaxType::from_selection("TAXABLE"), TaxType::Taxable);
    /// assert_eq!(TaxType::from_selection("ZERO_TAX"), TaxType::ZeroRated);
    /// assert_eq!(TaxType::from_selection("whatever"), TaxType::TaxExempt);
    /// ```
    pub fn from_selection(value: &str) -> Self {
        match value.trim() {
            "TAXABLE" => TaxType::Taxable,
            "ZERO_TAX" => TaxType::ZeroRated,
            _ => TaxType::TaxExempt,
        }
    }

    /// Whether this type charges tax at all.
    #[inline]
    pub const fn is_taxable(&self) -> bool {
        matches!(self, TaxType::Taxable)
    }
}

// =============================================================================
// Calculation Method
// =============================================================================

/// How tax relates to the entered amounts. Only meaningful when taxable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalculationMethod {
    /// Entered amounts are pre-tax; tax is added on top.
    Exclusive,
    /// Entered amounts already include tax; tax is backed out.
    Inclusive,
}

impl CalculationMethod {
    /// Interprets the checked calculation-method radio, if any.
    ///
    /// ```rust
    /// use expense_core::types::CalculationMethod;
    ///
    /// assert_eq!(
    ///     CalculationMethod::from_selection(Some("INCLUSIVE")),
    ///     Some(CalculationMethod::Inclusive)
    /// );
    /// assert_eq!(CalculationMethod::from_selection(None), None);
    /// ```
    pub fn from_selection(value: Option<&str>) -> Option<Self> {
        match value.map(str::trim) {
            Some("EXCLUSIVE") => Some(CalculationMethod::Exclusive),
            Some("INCLUSIVE") => Some(CalculationMethod::Inclusive),
            _ => None,
        }
    }
}

// =============================================================================
// Tax Configuration
// =============================================================================

/// The tax settings a recompute reads.
///
/// Has no life of its own: the form controller replaces it wholesale
/// whenever the page's tax controls change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TaxConfiguration {
    pub tax_type: TaxType,
    pub calculation_method: Option<CalculationMethod>,
    pub rate: TaxRate,
}

impl TaxConfiguration {
    /// Builds a configuration at the fixed rate.
    pub fn new(tax_type: TaxType, calculation_method: Option<CalculationMethod>) -> Self {
        TaxConfiguration {
            tax_type,
            calculation_method,
            rate: TaxRate::default(),
        }
    }

    /// Builds a configuration straight from the raw selector values.
    pub fn from_selection(tax_type: &str, calculation_method: Option<&str>) -> Self {
        TaxConfiguration::new(
            TaxType::from_selection(tax_type),
            CalculationMethod::from_selection(calculation_method),
        )
    }

    /// Whether the calculation-method control should be shown.
    #[inline]
    pub const fn method_control_visible(&self) -> bool {
        self.tax_type.is_taxable()
    }
}

// =============================================================================
// Row Identity
// =============================================================================

/// Stable identity of a line item.
///
/// ## Why Not the Index?
/// Indices are renumbered on every removal, so an event that refers to
/// "row 2" may point at a different row after a preceding removal. The
/// id never changes for the lifetime of the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RowId(Uuid);

impl RowId {
    /// Generates a fresh UUID v4 id.
    pub fn new() -> Self {
        RowId(Uuid::new_v4())
    }
}

impl Default for RowId {
    fn default() -> Self {
        RowId::new()
    }
}

impl From<Uuid> for RowId {
    fn from(id: Uuid) -> Self {
        RowId(id)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// =============================================================================
// Category Option
// =============================================================================

/// One choice in a row's category selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryOption {
    pub value: String,
    pub label: String,
}

impl CategoryOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        CategoryOption {
            value: value.into(),
            label: label.into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_fraction() {
        let rate = TaxRate::from_bps(500);
        assert_eq!(rate.bps(), 500);
        assert_eq!(rate.fraction(), Decimal::new(5, 2));
    }

    #[test]
    fn test_tax_rate_default_is_five_percent() {
        assert_eq!(TaxRate::default().bps(), 500);
    }

    #[test]
    fn test_tax_type_selection() {
        assert_eq!(TaxType::from_selection("TAXABLE"), TaxType::Taxable);
        assert_eq!(TaxType::from_selection(" TAXABLE "), TaxType::Taxable);
        assert_eq!(TaxType::from_selection("TAX_EXEMPT"), TaxType::TaxExempt);
        assert_eq!(TaxType::from_selection(""), TaxType::TaxExempt);
        assert_eq!(TaxType::from_selection("taxable"), TaxType::TaxExempt);
    }

    #[test]
    fn test_calculation_method_selection() {
        assert_eq!(
            CalculationMethod::from_selection(Some("EXCLUSIVE")),
            Some(CalculationMethod::Exclusive)
        );
        assert_eq!(CalculationMethod::from_selection(Some("")), None);
        assert_eq!(CalculationMethod::from_selection(Some("BOTH")), None);
    }

    #[test]
    fn test_tax_configuration_default() {
        let config = TaxConfiguration::default();
        assert_eq!(config.tax_type, TaxType::TaxExempt);
        assert_eq!(config.calculation_method, None);
        assert_eq!(config.rate.bps(), 500);
        assert!(!config.method_control_visible());
    }

    #[test]
    fn test_method_control_visible_only_when_taxable() {
        assert!(TaxConfiguration::from_selection("TAXABLE", None).method_control_visible());
        assert!(!TaxConfiguration::from_selection("ZERO_TAX", Some("INCLUSIVE")).method_control_visible());
    }

    #[test]
    fn test_tax_type_serializes_as_selector_value() {
        assert_eq!(serde_json::to_string(&TaxType::Taxable).unwrap(), "\"TAXABLE\"");
        assert_eq!(serde_json::to_string(&TaxType::ZeroRated).unwrap(), "\"ZERO_TAX\"");
        assert_eq!(serde_json::to_string(&TaxType::TaxExempt).unwrap(), "\"TAX_EXEMPT\"");
    }

    #[test]
    fn test_row_ids_are_unique() {
        assert_ne!(RowId::new(), RowId::new());
    }
}
