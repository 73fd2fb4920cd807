//! # Row Store
//!
//! Owns the ordered line items of the form and keeps their indices
//! contiguous.
//!
//! ## Row Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Row Store Operations                                 │
//! │                                                                         │
//! │  Page Action              Store Operation          Sequence Change      │
//! │  ───────────              ───────────────          ───────────────      │
//! │                                                                         │
//! │  Page load (no rows) ───► ensure_non_empty() ────► [row 0]              │
//! │                                                                         │
//! │  Click "add item" ──────► add_row() ─────────────► push(row n)          │
//! │                                                                         │
//! │  Type in a field ───────► set_quantity() etc. ───► (values only)        │
//! │                                                                         │
//! │  Click "remove" ────────► remove_row(id) ────────► remove(i)            │
//! │                                                   + renumber i..n       │
//! │                                                                         │
//! │  INVARIANT: after every operation, indices are exactly 0..len           │
//! │             and every field name embeds its row's index.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store knows nothing about tax. Recomputing totals after a change is
//! the caller's job (see `expense_form::FormController`).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::input::{parse_amount, parse_decimal};
use crate::money::Money;
use crate::template::{reindex, FieldNames, RowTemplate};
use crate::types::{CategoryOption, RowId};
use crate::validation::{validate_field_prefix, validate_index_segment};

// =============================================================================
// Line Item
// =============================================================================

/// One expense row.
///
/// ## Raw Values
/// Quantity and unit price are kept exactly as typed. They are coerced to
/// numbers on read, so a half-typed "1." never loses the user's text.
///
/// ## Design Notes
/// - `index`: position in the store; only the store changes it
/// - `fields` / `markup`: identifiers and rendered row, both embedding `index`
/// - `category_options`: copied from the first row when created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    id: RowId,
    index: usize,
    fields: FieldNames,
    markup: String,
    item_name: String,
    quantity: String,
    unit: String,
    unit_price: String,
    category: Option<String>,
    category_options: Vec<CategoryOption>,
}

impl LineItem {
    fn blank(index: usize, prefix: &str, markup: String, options: Vec<CategoryOption>) -> Self {
        LineItem {
            id: RowId::new(),
            index,
            fields: FieldNames::for_index(prefix, index),
            markup,
            item_name: String::new(),
            quantity: String::new(),
            unit: String::new(),
            unit_price: String::new(),
            category: None,
            category_options: options,
        }
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    /// 0-based position in the store.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn fields(&self) -> &FieldNames {
        &self.fields
    }

    /// The rendered row, with every identifier pointing at `index`.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// The quantity field exactly as typed.
    pub fn quantity_input(&self) -> &str {
        &self.quantity
    }

    /// The unit-price field exactly as typed.
    pub fn unit_price_input(&self) -> &str {
        &self.unit_price
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn category_options(&self) -> &[CategoryOption] {
        &self.category_options
    }

    /// Quantity coerced to a number (0 when empty or malformed).
    pub fn quantity(&self) -> Decimal {
        parse_decimal(&self.quantity)
    }

    /// Unit price coerced to money (0 when empty or malformed).
    pub fn unit_price(&self) -> Money {
        parse_amount(&self.unit_price)
    }

    /// `quantity × unit price`, exact.
    ///
    /// ## Example
    /// ```rust
    /// use expense_core::rows::{RowStore, RowValues};
    /// use expense_core::template::RowTemplate;
    /// use expense_core::money::Money;
    ///
    /// let template = RowTemplate::new("<tr id=\"items-__prefix__-row\"></tr>", "__prefix__").unwrap();
    /// let mut store = RowStore::new(template, "items", Vec::new()).unwrap();
    /// let row = store.add_prefilled(RowValues {
    ///     quantity: "2".into(),
    ///     unit_price: "100".into(),
    ///     ..RowValues::default()
    /// });
    /// assert_eq!(row.line_total(), Money::from_major(200));
    /// ```
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity())
    }

    /// Moves the row to `to`, rewriting every identifier that embeds the
    /// old index.
    fn move_to(&mut self, to: usize, prefix: &str) {
        let from = self.index;
        if from == to {
            return;
        }
        self.fields.reindex(prefix, from, to);
        self.markup = reindex(&self.markup, prefix, from, to);
        self.index = to;
    }
}

// =============================================================================
// Row Values
// =============================================================================

/// Field values for a row that already exists when the page loads (the
/// edit page of a saved expense).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct RowValues {
    pub item_name: String,
    pub quantity: String,
    pub unit: String,
    pub unit_price: String,
    pub category: Option<String>,
}

// =============================================================================
// Row Store
// =============================================================================

/// The ordered collection of line items.
///
/// ## Invariants
/// - `rows[i].index() == i` for every row
/// - every identifier of `rows[i]` embeds `i`
/// - row ids are unique
#[derive(Debug, Clone)]
pub struct RowStore {
    rows: Vec<LineItem>,
    template: RowTemplate,
    field_prefix: String,
    default_categories: Vec<CategoryOption>,
}

impl RowStore {
    /// Creates an empty store.
    ///
    /// `default_categories` is the option list a row gets when there is no
    /// first row to copy from.
    ///
    /// ## Errors
    /// `CoreError::Validation` if the prefix is malformed or the template has
    /// no `{field_prefix}-{placeholder}-` segment to renumber.
    pub fn new(
        template: RowTemplate,
        field_prefix: impl Into<String>,
        default_categories: Vec<CategoryOption>,
    ) -> CoreResult<Self> {
        let field_prefix = field_prefix.into();
        validate_field_prefix(&field_prefix)?;
        validate_index_segment(template.source(), &field_prefix, template.placeholder())?;

        Ok(RowStore {
            rows: Vec::new(),
            template,
            field_prefix,
            default_categories,
        })
    }

    /// Appends a blank row at index `len()`.
    ///
    /// The category option set is copied from the first row when there is
    /// one; the first row's selected value is not.
    ///
    /// Does NOT recompute anything. Callers must recompute afterwards.
    pub fn add_row(&mut self) -> &LineItem {
        let index = self.rows.len();
        let options = self
            .rows
            .first()
            .map(|first| first.category_options.clone())
            .unwrap_or_else(|| self.default_categories.clone());
        let markup = self.template.render(index);

        self.rows
            .push(LineItem::blank(index, &self.field_prefix, markup, options));
        &self.rows[index]
    }

    /// Appends a row carrying existing values.
    pub fn add_prefilled(&mut self, values: RowValues) -> &LineItem {
        let index = self.add_row().index;
        let row = &mut self.rows[index];
        row.item_name = values.item_name;
        row.quantity = values.quantity;
        row.unit = values.unit;
        row.unit_price = values.unit_price;
        row.category = values.category;
        &self.rows[index]
    }

    /// Removes a row and renumbers every row after it.
    ///
    /// ## Errors
    /// `CoreError::RowNotFound` if the id is not in the store. The store is
    /// left untouched in that case.
    pub fn remove_row(&mut self, id: RowId) -> CoreResult<LineItem> {
        let position = self.position(id).ok_or(CoreError::RowNotFound(id))?;
        let removed = self.rows.remove(position);

        for (index, row) in self.rows.iter_mut().enumerate().skip(position) {
            row.move_to(index, &self.field_prefix);
        }

        debug_assert!(self.rows.iter().enumerate().all(|(i, r)| r.index == i));
        Ok(removed)
    }

    /// Adds one blank row if the store is empty.
    ///
    /// Returns `true` when a row was added.
    pub fn ensure_non_empty(&mut self) -> bool {
        if self.rows.is_empty() {
            self.add_row();
            true
        } else {
            false
        }
    }

    /// Removes every row.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    // -------------------------------------------------------------------------
    // Field edits
    // -------------------------------------------------------------------------

    pub fn set_quantity(&mut self, id: RowId, raw: impl Into<String>) -> CoreResult<()> {
        self.row_mut(id)?.quantity = raw.into();
        Ok(())
    }

    pub fn set_unit_price(&mut self, id: RowId, raw: impl Into<String>) -> CoreResult<()> {
        self.row_mut(id)?.unit_price = raw.into();
        Ok(())
    }

    pub fn set_item_name(&mut self, id: RowId, name: impl Into<String>) -> CoreResult<()> {
        self.row_mut(id)?.item_name = name.into();
        Ok(())
    }

    pub fn set_unit(&mut self, id: RowId, unit: impl Into<String>) -> CoreResult<()> {
        self.row_mut(id)?.unit = unit.into();
        Ok(())
    }

    /// Selects a category. An empty value clears the selection.
    pub fn select_category(&mut self, id: RowId, value: Option<String>) -> CoreResult<()> {
        self.row_mut(id)?.category = value.filter(|v| !v.is_empty());
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// All rows in index order.
    pub fn rows(&self) -> &[LineItem] {
        &self.rows
    }

    pub fn get(&self, id: RowId) -> Option<&LineItem> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// Current index of a row.
    pub fn position(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn field_prefix(&self) -> &str {
        &self.field_prefix
    }

    fn row_mut(&mut self, id: RowId) -> CoreResult<&mut LineItem> {
        self.rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(CoreError::RowNotFound(id))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
