//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Exact Decimals?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 × 3 = 0.30000000000000004  ❌ WRONG!                             │
//! │                                                                         │
//! │  An expense line is quantity × unit price, and BOTH may carry           │
//! │  fractions (1.5 hours × 12.30). Integer cents cannot hold the exact     │
//! │  product, floats cannot hold it either.                                 │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 decimals (rust_decimal)                          │
//! │    1.5 × 12.30 = 18.450 exactly                                         │
//! │    Rounding to whole currency units happens ONLY where tax is derived   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use expense_core::money::Money;
//! use rust_decimal::Decimal;
//!
//! let price = Money::from_major(100);
//! let line_total = price.multiply_quantity(Decimal::from(2));
//! assert_eq!(line_total, Money::from_major(200));
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// An exact monetary amount in major currency units.
///
/// ## Design Decisions
/// - **Decimal, never f64**: line totals are exact products of fractional inputs
/// - **Signed**: the core does not reject negative input, it only computes
/// - **Saturating arithmetic**: absurdly large input must not abort a recompute
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  quantity × unit price ──► line total ──┐                               │
/// │  quantity × unit price ──► line total ──┼──► base amount                │
/// │  quantity × unit price ──► line total ──┘         │                     │
/// │                                                   ▼                     │
/// │                                   subtotal / tax (rounded once)         │
/// │                                                   │                     │
/// │                                                   ▼                     │
/// │                                    total ──► "$ 1,234" in the page      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "string")] Decimal);

impl Money {
    /// Wraps an exact decimal amount.
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use expense_core::money::Money;
    ///
    /// let fee = Money::from_major(105);
    /// assert_eq!(fee.whole_units(), 105);
    /// ```
    #[inline]
    pub fn from_major(units: i64) -> Self {
        Money(Decimal::from(units))
    }

    /// Returns the exact underlying decimal.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Rounds to the nearest whole currency unit, halves away from zero.
    ///
    /// For the non-negative amounts the form deals in this is plain
    /// round-half-up: 2.5 → 3, 2.49 → 2.
    ///
    /// ## Example
    /// ```rust
    /// use expense_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let half = Money::from_decimal(Decimal::new(25, 1)); // 2.5
    /// assert_eq!(half.round_half_up(), Money::from_major(3));
    /// ```
    pub fn round_half_up(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// The amount rounded to whole units, as an integer.
    ///
    /// Every `Decimal` fits in `i128` once rounded.
    pub fn whole_units(&self) -> i128 {
        self.round_half_up().0.to_i128().unwrap_or(0)
    }

    /// Calculates tax charged ON TOP of this amount, rounded once.
    ///
    /// ## Formula
    /// `round_half_up(amount × rate)`
    ///
    /// ## Example
    /// ```rust
    /// use expense_core::money::Money;
    /// use expense_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_major(200);
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(500)); // 5%
    /// assert_eq!(tax, Money::from_major(10));
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        Money(self.0.saturating_mul(rate.fraction())).round_half_up()
    }

    /// Backs the tax OUT of a tax-inclusive amount and returns the
    /// pre-tax part, rounded once.
    ///
    /// ## Formula
    /// `round_half_up(amount / (1 + rate))`
    ///
    /// The tax is then `amount - result`, which reconstructs `amount`
    /// exactly when added back.
    ///
    /// ## Example
    /// ```rust
    /// use expense_core::money::Money;
    /// use expense_core::types::TaxRate;
    ///
    /// let gross = Money::from_major(105);
    /// let net = gross.back_out_tax(TaxRate::from_bps(500));
    /// assert_eq!(net, Money::from_major(100));
    /// assert_eq!(gross - net, Money::from_major(5));
    /// ```
    pub fn back_out_tax(&self, rate: TaxRate) -> Money {
        let divisor = Decimal::ONE + rate.fraction();
        let net = self.0.checked_div(divisor).unwrap_or(self.0);
        Money(net).round_half_up()
    }

    /// Multiplies this unit price by a (possibly fractional) quantity.
    ///
    /// ## Example
    /// ```rust
    /// use expense_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let hourly = Money::from_decimal(Decimal::new(1230, 2)); // 12.30
    /// let line = hourly.multiply_quantity(Decimal::new(15, 1)); // × 1.5
    /// assert_eq!(line.amount(), Decimal::new(18450, 3));       // 18.450
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: Decimal) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering, for logs and debugging.
///
/// Page display goes through [`crate::format::CurrencyFormat`].
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

/// Multiplication by a decimal quantity.
impl Mul<Decimal> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: Decimal) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
