//! # Rendering Collaborator
//!
//! The contract between the form controller and whatever shows the form.
//!
//! ## Render Pass
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  recompute ──► RenderedTotals ──┬──► line_total(row 0, "$ 50")          │
//! │                                 ├──► line_total(row 1, "$ 30")          │
//! │                                 ├──► summary(Subtotal, "$ 80")          │
//! │                                 ├──► summary(Tax,      "$ 0")           │
//! │                                 └──► summary(Total,    "$ 80")          │
//! │                                                                         │
//! │  Each write reports Written or Missing. Missing is skipped, the         │
//! │  remaining writes still happen.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeSet;

use expense_core::{LineItem, RowId};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Outcome of writing into a display slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    Written,
    Missing,
}

/// The three aggregate display slots below the rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SummarySlot {
    Subtotal,
    Tax,
    Total,
}

impl SummarySlot {
    /// Element id of the slot in the page.
    pub const fn element_id(&self) -> &'static str {
        match self {
            SummarySlot::Subtotal => "display-subtotal",
            SummarySlot::Tax => "display-tax",
            SummarySlot::Total => "display-total",
        }
    }
}

/// Receives everything the controller wants shown.
///
/// Row structure callbacks have no-op defaults so a sink that only shows
/// figures need not care about them.
pub trait RenderSink {
    /// A new row was created from the template; `row.markup()` is ready.
    fn row_inserted(&mut self, _row: &LineItem) {}

    /// A row left the store.
    fn row_removed(&mut self, _row: &LineItem) {}

    /// A row's index changed; its identifiers and markup are already updated.
    fn row_reindexed(&mut self, _row: &LineItem) {}

    /// Writes a row's formatted line total.
    fn line_total(&mut self, row: &LineItem, text: &str) -> SlotStatus;

    /// Writes one of the aggregate figures.
    fn summary(&mut self, slot: SummarySlot, text: &str) -> SlotStatus;

    /// Shows or hides the calculation-method control.
    fn method_control_visible(&mut self, _visible: bool) -> SlotStatus {
        SlotStatus::Missing
    }
}

// =============================================================================
// In-memory sink
// =============================================================================

/// One row as the in-memory form shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RenderedRow {
    pub id: RowId,
    pub index: usize,
    pub markup: String,
    pub line_total: Option<String>,
}

/// A complete in-memory rendering of the form.
///
/// Used by the headless driver and by tests. Slots listed in `absent`
/// behave like elements the page does not have.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RenderedForm {
    pub rows: Vec<RenderedRow>,
    pub subtotal: Option<String>,
    pub tax: Option<String>,
    pub total: Option<String>,
    pub method_control_visible: bool,
    #[serde(skip)]
    absent: BTreeSet<SummarySlot>,
}

impl RenderedForm {
    pub fn new() -> Self {
        RenderedForm::default()
    }

    /// A form whose page lacks the given slots.
    pub fn without(slots: impl IntoIterator<Item = SummarySlot>) -> Self {
        RenderedForm {
            absent: slots.into_iter().collect(),
            ..RenderedForm::default()
        }
    }

    pub fn row(&self, id: RowId) -> Option<&RenderedRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn slot(&self, slot: SummarySlot) -> Option<&str> {
        match slot {
            SummarySlot::Subtotal => self.subtotal.as_deref(),
            SummarySlot::Tax => self.tax.as_deref(),
            SummarySlot::Total => self.total.as_deref(),
        }
    }
}

impl RenderSink for RenderedForm {
    fn row_inserted(&mut self, row: &LineItem) {
        self.rows.push(RenderedRow {
            id: row.id(),
            index: row.index(),
            markup: row.markup().to_string(),
            line_total: None,
        });
    }

    fn row_removed(&mut self, row: &LineItem) {
        self.rows.retain(|shown| shown.id != row.id());
    }

    fn row_reindexed(&mut self, row: &LineItem) {
        if let Some(shown) = self.rows.iter_mut().find(|shown| shown.id == row.id()) {
            shown.index = row.index();
            shown.markup = row.markup().to_string();
        }
    }

    fn line_total(&mut self, row: &LineItem, text: &str) -> SlotStatus {
        match self.rows.iter_mut().find(|shown| shown.id == row.id()) {
            Some(shown) => {
                shown.line_total = Some(text.to_string());
                SlotStatus::Written
            }
            None => SlotStatus::Missing,
        }
    }

    fn summary(&mut self, slot: SummarySlot, text: &str) -> SlotStatus {
        if self.absent.contains(&slot) {
            return SlotStatus::Missing;
        }
        let target = match slot {
            SummarySlot::Subtotal => &mut self.subtotal,
            SummarySlot::Tax => &mut self.tax,
            SummarySlot::Total => &mut self.total,
        };
        *target = Some(text.to_string());
        SlotStatus::Written
    }

    fn method_control_visible(&mut self, visible: bool) -> SlotStatus {
        self.method_control_visible = visible;
        SlotStatus::Written
    }
}
