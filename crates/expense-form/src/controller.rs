//! # Form Controller
//!
//! Owns everything the expense form knows at runtime and turns page
//! events into row operations followed by a recompute.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         FormController                                  │
//! │                                                                         │
//! │  ┌──────────────┐   ┌──────────────────┐   ┌────────────────────────┐  │
//! │  │  RowStore    │   │ TaxConfiguration │   │  CurrencyFormat        │  │
//! │  │  (writes the │   │ (replaced on     │   │  (prefix + grouping)   │  │
//! │  │   rows)      │   │  every change)   │   │                        │  │
//! │  └──────┬───────┘   └────────┬─────────┘   └───────────┬────────────┘  │
//! │         │ read-only          │                         │               │
//! │         └─────────► compute ◄┘                         │               │
//! │                        │                               │               │
//! │                        ▼                               ▼               │
//! │                     Totals ──────────► render ──► RenderSink           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation runs to completion: rows are renumbered before the
//! recompute reads them, and the render pass only ever sees a fully
//! recomputed `Totals`.

use expense_core::{
    compute, CalculationMethod, CoreError, CurrencyFormat, LineItem, RowId, RowStore,
    TaxConfiguration, TaxType, Totals,
};
use tracing::{debug, info, warn};

use crate::error::{ErrorCode, FormError, FormResult};
use crate::events::{Action, EventTarget, FormEvent};
use crate::render::{RenderSink, SlotStatus, SummarySlot};
use crate::state::{FormConfig, PageState};

/// The expense form.
pub struct FormController<S: RenderSink> {
    store: RowStore,
    tax: TaxConfiguration,
    format: CurrencyFormat,
    totals: Totals,
    sink: S,
}

impl<S: RenderSink> FormController<S> {
    /// Builds the controller for a "new expense" page.
    pub fn new(config: &FormConfig, sink: S) -> FormResult<Self> {
        Self::from_page(config, PageState::default(), sink)
    }

    /// Builds the controller for a page that may already carry rows and
    /// tax selections.
    ///
    /// Nothing is computed until [`FormController::on_init`].
    pub fn from_page(config: &FormConfig, page: PageState, sink: S) -> FormResult<Self> {
        config.validate()?;

        let categories = page.categories_or(config).to_vec();
        let store = RowStore::new(config.template()?, config.field_prefix.clone(), categories)?;
        let tax = TaxConfiguration::from_selection(
            page.tax_type.as_deref().unwrap_or_default(),
            page.calculation_method.as_deref(),
        );

        let mut controller = FormController {
            store,
            tax,
            format: config.currency_format(),
            totals: Totals::default(),
            sink,
        };

        for values in page.rows {
            let row = controller.store.add_prefilled(values);
            controller.sink.row_inserted(row);
        }

        Ok(controller)
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Page load: guarantees one row, then recomputes unconditionally so an
    /// edit page with saved rows shows correct totals straight away.
    pub fn on_init(&mut self) -> &Totals {
        if self.store.ensure_non_empty() {
            if let Some(row) = self.store.rows().first() {
                self.sink.row_inserted(row);
            }
            debug!("Empty page, added first row");
        }
        self.show_method_control();

        info!(rows = self.store.len(), tax = ?self.tax.tax_type, "Form initialized");
        self.refresh()
    }

    /// A quantity or price in `row` changed.
    pub fn on_field_edited(&mut self, row: RowId) -> FormResult<&Totals> {
        if self.store.get(row).is_none() {
            warn!(%row, "Edit for unknown row");
            return Err(CoreError::RowNotFound(row).into());
        }
        debug!(%row, "Field edited");
        Ok(self.refresh())
    }

    /// Appends a blank row and recomputes. Returns the new row's id.
    pub fn on_add_requested(&mut self) -> RowId {
        let row = self.store.add_row();
        let id = row.id();
        debug!(%id, index = row.index(), "Row added");
        self.sink.row_inserted(row);

        self.refresh();
        id
    }

    /// Removes `row`, renumbers the rows after it, and recomputes.
    ///
    /// ## Errors
    /// `NOT_FOUND` if the row is already gone. Nothing changes in that case.
    pub fn on_remove_requested(&mut self, row: RowId) -> FormResult<&Totals> {
        let removed = self.store.remove_row(row).map_err(|e| {
            warn!(%row, "Remove for unknown row");
            FormError::from(e)
        })?;
        let from = removed.index();
        debug!(%row, index = from, remaining = self.store.len(), "Row removed");

        self.sink.row_removed(&removed);
        for shifted in &self.store.rows()[from..] {
            self.sink.row_reindexed(shifted);
        }

        Ok(self.refresh())
    }

    /// The tax type or calculation method changed.
    pub fn on_tax_config_changed(&mut self, config: TaxConfiguration) -> &Totals {
        debug!(tax = ?config.tax_type, method = ?config.calculation_method, "Tax settings changed");
        self.tax = config;
        self.show_method_control();
        self.refresh()
    }

    /// Form reset: every row goes, one blank row comes back.
    pub fn on_reset(&mut self) -> &Totals {
        for row in self.store.rows() {
            self.sink.row_removed(row);
        }
        self.store.clear();
        self.store.ensure_non_empty();
        if let Some(row) = self.store.rows().first() {
            self.sink.row_inserted(row);
        }

        debug!("Form reset");
        self.refresh()
    }

    // =========================================================================
    // Event Delegation
    // =========================================================================

    /// Single entry point for page events.
    ///
    /// Returns `false` for events no handler matched.
    pub fn dispatch(&mut self, event: &FormEvent) -> FormResult<bool> {
        let action = event.action();
        let target = event.target();

        match action {
            Action::Ignore => return Ok(false),
            Action::Reset => {
                self.on_reset();
            }
            Action::AddRow => {
                self.on_add_requested();
            }
            Action::RemoveRow => {
                let row = self.resolve_row(target)?;
                self.on_remove_requested(row)?;
            }
            Action::EditQuantity(value) => {
                let row = self.resolve_row(target)?;
                self.store.set_quantity(row, value)?;
                self.on_field_edited(row)?;
            }
            Action::EditUnitPrice(value) => {
                let row = self.resolve_row(target)?;
                self.store.set_unit_price(row, value)?;
                self.on_field_edited(row)?;
            }
            Action::EditItemName(value) => {
                let row = self.resolve_row(target)?;
                self.store.set_item_name(row, value)?;
            }
            Action::EditUnit(value) => {
                let row = self.resolve_row(target)?;
                self.store.set_unit(row, value)?;
            }
            Action::SelectCategory(value) => {
                let row = self.resolve_row(target)?;
                self.store.select_category(row, value)?;
            }
            Action::SetTaxType(value) => {
                let config = TaxConfiguration {
                    tax_type: TaxType::from_selection(&value),
                    ..self.tax
                };
                self.on_tax_config_changed(config);
            }
            Action::SetCalculationMethod(value) => {
                let config = TaxConfiguration {
                    calculation_method: CalculationMethod::from_selection(value.as_deref()),
                    ..self.tax
                };
                self.on_tax_config_changed(config);
            }
        }

        Ok(true)
    }

    /// Finds the row an event belongs to.
    fn resolve_row(&self, target: Option<&EventTarget>) -> FormResult<RowId> {
        let target =
            target.ok_or_else(|| FormError::validation("Event has no target element"))?;
        if let Some(row) = target.row {
            return Ok(row);
        }

        let index = target
            .embedded_index(self.store.field_prefix())
            .ok_or_else(|| FormError::validation("Event target does not belong to a row"))?;

        self.store
            .rows()
            .get(index)
            .map(LineItem::id)
            .ok_or_else(|| FormError::new(ErrorCode::NotFound, format!("No row at index {}", index)))
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Full recompute followed by one render pass.
    fn refresh(&mut self) -> &Totals {
        self.totals = compute(self.store.rows(), &self.tax);
        let rendered = self.format.render(&self.totals);

        for line in &rendered.line_totals {
            let Some(row) = self.store.get(line.row) else {
                continue;
            };
            if self.sink.line_total(row, &line.text) == SlotStatus::Missing {
                debug!(row = %line.row, index = line.index, "Line total slot missing, skipped");
            }
        }

        for (slot, text) in [
            (SummarySlot::Subtotal, &rendered.subtotal),
            (SummarySlot::Tax, &rendered.tax),
            (SummarySlot::Total, &rendered.total),
        ] {
            if self.sink.summary(slot, text) == SlotStatus::Missing {
                debug!(slot = slot.element_id(), "Display slot missing, skipped");
            }
        }

        &self.totals
    }

    fn show_method_control(&mut self) {
        let visible = self.tax.method_control_visible();
        if self.sink.method_control_visible(visible) == SlotStatus::Missing {
            debug!(visible, "Calculation method control missing, skipped");
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn store(&self) -> &RowStore {
        &self.store
    }

    pub fn tax(&self) -> &TaxConfiguration {
        &self.tax
    }

    /// Totals of the last recompute.
    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
