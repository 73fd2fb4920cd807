//! # expense-core: Pure Logic for the Expense Form
//!
//! This crate is the **heart** of the expense-entry form. It keeps the
//! line-item rows and derives every displayed total, with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Expense Form Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Page (row template, inputs)                  │   │
//! │  │    type qty ──► click add ──► click remove ──► pick tax type    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ FormEvent                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 expense-form (FormController)                   │   │
//! │  │        dispatch ──► store op ──► recompute ──► render           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ expense-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────────┐   │   │
//! │  │   │  rows    │  │  totals  │  │  money   │  │  template    │   │   │
//! │  │   │ RowStore │  │ compute  │  │  Money   │  │  RowTemplate │   │   │
//! │  │   │ LineItem │  │ Totals   │  │  TaxRate │  │  reindex     │   │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DOM • NO NETWORK • PURE FUNCTIONS                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Tax configuration, row identity, category options
//! - [`money`] - Exact decimal Money type
//! - [`input`] - Lenient numeric coercion of field text
//! - [`template`] - Row template rendering and index renumbering
//! - [`rows`] - The Row Store
//! - [`totals`] - The Totals Engine
//! - [`format`] - Currency display strings
//! - [`error`] / [`validation`] - Domain errors and setup checks
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: a recompute depends only on rows + tax settings
//! 2. **Never Fail on Input**: malformed numbers are zero, not errors
//! 3. **Exact Money**: decimals, rounded once per tax branch
//! 4. **Contiguous Rows**: indices are `0..n` after every store operation
//!
//! ## Example Usage
//!
//! ```rust
//! use expense_core::rows::RowStore;
//! use expense_core::template::RowTemplate;
//! use expense_core::totals::compute;
//! use expense_core::types::TaxConfiguration;
//! use expense_core::Money;
//!
//! let template = RowTemplate::new(
//!     "<input name=\"items-__prefix__-quantity\">",
//!     "__prefix__",
//! ).unwrap();
//! let mut store = RowStore::new(template, "items", Vec::new()).unwrap();
//!
//! let id = store.add_row().id();
//! store.set_quantity(id, "1").unwrap();
//! store.set_unit_price(id, "105").unwrap();
//!
//! let config = TaxConfiguration::from_selection("TAXABLE", Some("INCLUSIVE"));
//! let totals = compute(store.rows(), &config);
//! assert_eq!(totals.subtotal, Money::from_major(100));
//! assert_eq!(totals.tax, Money::from_major(5));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod format;
pub mod input;
pub mod money;
pub mod rows;
pub mod template;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use format::{CurrencyFormat, RenderedLine, RenderedTotals};
pub use money::Money;
pub use rows::{LineItem, RowStore, RowValues};
pub use template::{FieldNames, RowTemplate};
pub use totals::{compute, LineTotal, Totals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// The business tax rate in basis points (5%).
///
/// Fixed for the form; there is no user-facing control for it.
pub const DEFAULT_TAX_RATE_BPS: u32 = 500;
