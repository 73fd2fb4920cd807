//! # Totals Engine
//!
//! Derives every displayed figure from the current rows and tax settings.
//! A pure function: no state, no side effects, always a full pass.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  rows ──► line_total = quantity × unit price (per row)                  │
//! │                   │                                                     │
//! │                   ▼                                                     │
//! │           base = Σ line_total                                           │
//! │                   │                                                     │
//! │   ┌───────────────┼──────────────────────┬────────────────────────┐    │
//! │   ▼               ▼                      ▼                        ▼    │
//! │  EXEMPT /      TAXABLE +              TAXABLE +               TAXABLE + │
//! │  ZERO / ?      EXCLUSIVE              INCLUSIVE               (none)    │
//! │  sub = base    sub = base             sub = round(base/1.05)  sub=base  │
//! │  tax = 0       tax = round(sub×5%)    tax = base - sub        tax = 0   │
//! │   └───────────────┴──────────────────────┴────────────────────────┘    │
//! │                   │                                                     │
//! │                   ▼                                                     │
//! │           total = sub + tax                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rounding happens at most once per branch, at the point shown.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::rows::LineItem;
use crate::types::{CalculationMethod, RowId, TaxConfiguration, TaxType};

/// The derived line total of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineTotal {
    pub row: RowId,
    pub index: usize,
    pub amount: Money,
}

/// Everything the page displays, recomputed wholesale each time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub line_totals: Vec<LineTotal>,
    pub base_amount: Money,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

/// Recomputes all totals.
///
/// ## Example
/// ```rust
/// use expense_core::rows::{RowStore, RowValues};
/// use expense_core::template::RowTemplate;
/// use expense_core::totals::compute;
/// use expense_core::types::TaxConfiguration;
/// use expense_core::Money;
///
/// let template = RowTemplate::new("<tr id=\"items-__prefix__-row\"></tr>", "__prefix__").unwrap();
/// let mut store = RowStore::new(template, "items", Vec::new()).unwrap();
/// store.add_prefilled(RowValues {
///     quantity: "2".into(),
///     unit_price: "100".into(),
///     ..RowValues::default()
/// });
///
/// let taxed = TaxConfiguration::from_selection("TAXABLE", Some("EXCLUSIVE"));
/// let totals = compute(store.rows(), &taxed);
/// assert_eq!(totals.subtotal, Money::from_major(200));
/// assert_eq!(totals.tax, Money::from_major(10));
/// assert_eq!(totals.total, Money::from_major(210));
/// ```
pub fn compute(rows: &[LineItem], tax: &TaxConfiguration) -> Totals {
    let line_totals: Vec<LineTotal> = rows
        .iter()
        .map(|row| LineTotal {
            row: row.id(),
            index: row.index(),
            amount: row.line_total(),
        })
        .collect();

    let base_amount: Money = line_totals.iter().map(|line| line.amount).sum();
    let (subtotal, tax_amount) = split_tax(base_amount, tax);

    Totals {
        line_totals,
        base_amount,
        subtotal,
        tax: tax_amount,
        total: subtotal + tax_amount,
    }
}

/// Splits a base amount into `(subtotal, tax)` under the given settings.
///
/// An unselected calculation method on a taxable expense is treated like
/// an exempt one rather than as an error.
pub fn split_tax(base: Money, config: &TaxConfiguration) -> (Money, Money) {
    match (config.tax_type, config.calculation_method) {
        (TaxType::Taxable, Some(CalculationMethod::Exclusive)) => {
            (base, base.calculate_tax(config.rate))
        }
        (TaxType::Taxable, Some(CalculationMethod::Inclusive)) => {
            let subtotal = base.back_out_tax(config.rate);
            (subtotal, base - subtotal)
        }
        (TaxType::Taxable, None) | (TaxType::ZeroRated, _) | (TaxType::TaxExempt, _) => {
            (base, Money::zero())
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::{RowStore, RowValues};
    use crate::template::RowTemplate;
    use crate::types::TaxRate;
    use rust_decimal::Decimal;

    fn store_with(lines: &[(&str, &str)]) -> RowStore {
        let template = RowTemplate::new("<tr id=\"items-__prefix__-row\"></tr>", "__prefix__").unwrap();
        let mut store = RowStore::new(template, "items", Vec::new()).unwrap();
        for (quantity, unit_price) in lines {
            store.add_prefilled(RowValues {
                quantity: quantity.to_string(),
                unit_price: unit_price.to_string(),
                ..RowValues::default()
            });
        }
        store
    }

    fn exempt() -> TaxConfiguration {
        TaxConfiguration::from_selection("TAX_EXEMPT", None)
    }

    fn exclusive() -> TaxConfiguration {
        TaxConfiguration::from_selection("TAXABLE", Some("EXCLUSIVE"))
    }

    fn inclusive() -> TaxConfiguration {
        TaxConfiguration::from_selection("TAXABLE", Some("INCLUSIVE"))
    }

    #[test]
    fn test_exempt_single_row() {
        let store = store_with(&[("2", "100")]);
        let totals = compute(store.rows(), &exempt());

        assert_eq!(totals.subtotal, Money::from_major(200));
        assert_eq!(totals.tax, Money::zero());
        assert_eq!(totals.total, Money::from_major(200));
    }

    #[test]
    fn test_exclusive_single_row() {
        let store = store_with(&[("2", "100")]);
        let totals = compute(store.rows(), &exclusive());

        assert_eq!(totals.subtotal, Money::from_major(200));
        assert_eq!(totals.tax, Money::from_major(10));
        assert_eq!(totals.total, Money::from_major(210));
    }

    #[test]
    fn test_inclusive_single_row() {
        let store = store_with(&[("1", "105")]);
        let totals = compute(store.rows(), &inclusive());

        assert_eq!(totals.base_amount, Money::from_major(105));
        assert_eq!(totals.subtotal, Money::from_major(100));
        assert_eq!(totals.tax, Money::from_major(5));
        assert_eq!(totals.total, Money::from_major(105));
    }

    #[test]
    fn test_inclusive_with_rounding_still_reconstructs_base() {
        let store = store_with(&[("1", "100")]);
        let totals = compute(store.rows(), &inclusive());

        // 100 / 1.05 = 95.238 → 95
        assert_eq!(totals.subtotal, Money::from_major(95));
        assert_eq!(totals.tax, Money::from_major(5));
        assert_eq!(totals.total, totals.base_amount);
    }

    #[test]
    fn test_taxable_without_method_behaves_exempt() {
        let store = store_with(&[("2", "100")]);
        let config = TaxConfiguration::from_selection("TAXABLE", None);
        let totals = compute(store.rows(), &config);

        assert_eq!(totals.subtotal, Money::from_major(200));
        assert_eq!(totals.tax, Money::zero());
        assert_eq!(totals.total, Money::from_major(200));
    }

    #[test]
    fn test_zero_rated_ignores_method() {
        let store = store_with(&[("2", "100")]);
        let config = TaxConfiguration::from_selection("ZERO_TAX", Some("EXCLUSIVE"));
        let totals = compute(store.rows(), &config);

        assert_eq!(totals.tax, Money::zero());
        assert_eq!(totals.total, Money::from_major(200));
    }

    #[test]
    fn test_line_totals_follow_row_order() {
        let store = store_with(&[("1", "50"), ("3", "10"), ("", "99")]);
        let totals = compute(store.rows(), &exempt());

        let amounts: Vec<Money> = totals.line_totals.iter().map(|l| l.amount).collect();
        assert_eq!(
            amounts,
            vec![Money::from_major(50), Money::from_major(30), Money::zero()]
        );
        let indices: Vec<usize> = totals.line_totals.iter().map(|l| l.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(totals.base_amount, Money::from_major(80));
    }

    #[test]
    fn test_fractional_base_is_not_rounded_when_exempt() {
        let store = store_with(&[("1.5", "12.30")]);
        let totals = compute(store.rows(), &exempt());

        assert_eq!(totals.subtotal.amount(), Decimal::new(18450, 3));
        assert_eq!(totals.total.amount(), Decimal::new(18450, 3));
    }

    #[test]
    fn test_remove_then_recompute() {
        let mut store = store_with(&[("1", "50"), ("3", "10")]);
        let first = store.rows()[0].id();
        store.remove_row(first).unwrap();

        let totals = compute(store.rows(), &exempt());
        assert_eq!(totals.line_totals.len(), 1);
        assert_eq!(totals.line_totals[0].index, 0);
        assert_eq!(totals.subtotal, Money::from_major(30));
    }

    #[test]
    fn test_no_rows() {
        let totals = compute(&[], &exclusive());
        assert_eq!(totals, Totals::default());
    }

    #[test]
    fn test_split_tax_with_custom_rate() {
        let config = TaxConfiguration {
            rate: TaxRate::from_bps(1000),
            ..exclusive()
        };
        assert_eq!(
            split_tax(Money::from_major(200), &config),
            (Money::from_major(200), Money::from_major(20))
        );
    }

    #[test]
    fn test_totals_serialize_camel_case() {
        let store = store_with(&[("1", "105")]);
        let json = serde_json::to_value(compute(store.rows(), &inclusive())).unwrap();

        assert_eq!(json["baseAmount"], "105");
        assert_eq!(json["subtotal"], "100");
        assert!(json["lineTotals"].is_array());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;
        use rust_decimal::RoundingStrategy;

        fn amount() -> impl Strategy<Value = Decimal> {
            // Up to 100000.00 with two decimals
            (0i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
        }

        fn lines() -> impl Strategy<Value = Vec<(Decimal, Decimal)>> {
            prop::collection::vec((amount(), amount()), 0..8)
        }

        fn build(lines: &[(Decimal, Decimal)]) -> RowStore {
            let owned: Vec<(String, String)> = lines
                .iter()
                .map(|(q, p)| (q.to_string(), p.to_string()))
                .collect();
            let borrowed: Vec<(&str, &str)> = owned
                .iter()
                .map(|(q, p)| (q.as_str(), p.as_str()))
                .collect();
            store_with(&borrowed)
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: each line total is exactly quantity × unit price and
            /// the base is exactly their sum.
            #[test]
            fn line_totals_are_exact(lines in lines()) {
                let store = build(&lines);
                let totals = compute(store.rows(), &exempt());

                let mut expected_base = Decimal::ZERO;
                for ((q, p), line) in lines.iter().zip(&totals.line_totals) {
                    prop_assert_eq!(line.amount.amount(), q * p);
                    expected_base += q * p;
                }
                prop_assert_eq!(totals.base_amount.amount(), expected_base);
            }

            /// Property: inclusive mode always reconstructs the base exactly.
            #[test]
            fn inclusive_round_trips(lines in lines()) {
                let store = build(&lines);
                let totals = compute(store.rows(), &inclusive());

                prop_assert_eq!(totals.subtotal + totals.tax, totals.base_amount);
                prop_assert_eq!(totals.total, totals.base_amount);
                prop_assert_eq!(totals.subtotal, totals.subtotal.round_half_up());
            }

            /// Property: exclusive tax is 5% of the base, rounded half-up to whole
            /// units, on top of an untouched subtotal.
            #[test]
            fn exclusive_formula(lines in lines()) {
                let store = build(&lines);
                let totals = compute(store.rows(), &exclusive());

                prop_assert_eq!(totals.subtotal, totals.base_amount);
                let expected_tax = (totals.base_amount.amount() * Decimal::new(5, 2))
                    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
                prop_assert_eq!(totals.tax.amount(), expected_tax);
                prop_assert_eq!(totals.total, totals.subtotal + totals.tax);
            }

            /// Property: recomputing unchanged state gives identical output.
            #[test]
            fn recompute_is_idempotent(lines in lines(), inclusive_mode in any::<bool>()) {
                let store = build(&lines);
                let config = if inclusive_mode { inclusive() } else { exclusive() };

                prop_assert_eq!(compute(store.rows(), &config), compute(store.rows(), &config));
            }
        }
    }
}
