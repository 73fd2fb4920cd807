//! # Configuration State
//!
//! Settings the form is built from, loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`EXPENSE_*`)
//! 2. Defaults (this file)
//!
//! The tax rate is deliberately absent: it is fixed at 5% in the core.

use std::path::PathBuf;

use expense_core::format::DEFAULT_CURRENCY_PREFIX;
use expense_core::template::{DEFAULT_FIELD_PREFIX, DEFAULT_PLACEHOLDER};
use expense_core::validation::{
    validate_currency_prefix, validate_field_prefix, validate_index_segment,
};
use expense_core::{CategoryOption, CurrencyFormat, CoreResult, RowTemplate, RowValues};
use serde::{Deserialize, Serialize};

use crate::error::FormResult;

/// Row markup used when the page does not provide its own template.
///
/// Mirrors the page's `<template id="item-template">`: every identifier
/// carries the `items-__prefix__-` segment.
pub const DEFAULT_ROW_TEMPLATE: &str = concat!(
    r#"<div class="item-row" id="items-__prefix__-row">"#,
    r#"<label for="items-__prefix__-item_name">Item</label>"#,
    r#"<input class="item-name" id="items-__prefix__-item_name" name="items-__prefix__-item_name">"#,
    r#"<label for="items-__prefix__-quantity">Quantity</label>"#,
    r#"<input class="item-quantity" id="items-__prefix__-quantity" name="items-__prefix__-quantity" type="number">"#,
    r#"<label for="items-__prefix__-unit">Unit</label>"#,
    r#"<input class="item-unit" id="items-__prefix__-unit" name="items-__prefix__-unit">"#,
    r#"<label for="items-__prefix__-unit_price">Unit price</label>"#,
    r#"<input class="item-unit_price" id="items-__prefix__-unit_price" name="items-__prefix__-unit_price" type="number">"#,
    r#"<input class="item-line-total" id="items-__prefix__-line_total" readonly>"#,
    r#"<select class="item-category" id="items-__prefix__-category" name="items-__prefix__-category"></select>"#,
    r#"<button class="remove-item" type="button">Remove</button>"#,
    r#"</div>"#,
);

/// Form configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormConfig {
    /// Shown before every amount ("$ 1,234")
    pub currency_prefix: String,

    /// Leading segment of every per-row field name ("items" in "items-0-quantity")
    pub field_prefix: String,

    /// Token standing in for the row index inside the template
    pub placeholder: String,

    /// Row template markup
    pub row_template: String,

    /// Category choices offered when the page supplies none
    pub categories: Vec<CategoryOption>,

    /// File to read the row template from instead (driver only)
    pub row_template_path: Option<PathBuf>,

    /// File holding the initial page state (driver only)
    pub page_path: Option<PathBuf>,
}

impl Default for FormConfig {
    /// ## Default Values
    /// - Currency prefix: "$ "
    /// - Field prefix: "items"
    /// - Placeholder: "__prefix__"
    /// - Template: [`DEFAULT_ROW_TEMPLATE`]
    /// - Categories: a single empty "select" choice
    fn default() -> Self {
        FormConfig {
            currency_prefix: DEFAULT_CURRENCY_PREFIX.to_string(),
            field_prefix: DEFAULT_FIELD_PREFIX.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            row_template: DEFAULT_ROW_TEMPLATE.to_string(),
            categories: vec![CategoryOption::new("", "Select a category")],
            row_template_path: None,
            page_path: None,
        }
    }
}

impl FormConfig {
    /// Creates a FormConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `EXPENSE_CURRENCY_PREFIX`: Override the currency prefix
    /// - `EXPENSE_FIELD_PREFIX`: Override the field-name prefix
    /// - `EXPENSE_PLACEHOLDER`: Override the template placeholder
    /// - `EXPENSE_ROW_TEMPLATE`: Path of a row template file
    /// - `EXPENSE_PAGE`: Path of a JSON initial page state
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`FormConfig::from_env`] with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = FormConfig::default();

        if let Some(prefix) = lookup("EXPENSE_CURRENCY_PREFIX") {
            config.currency_prefix = prefix;
        }

        if let Some(prefix) = lookup("EXPENSE_FIELD_PREFIX") {
            config.field_prefix = prefix;
        }

        if let Some(placeholder) = lookup("EXPENSE_PLACEHOLDER") {
            config.placeholder = placeholder;
        }

        if let Some(path) = lookup("EXPENSE_ROW_TEMPLATE") {
            config.row_template_path = Some(PathBuf::from(path));
        }

        if let Some(path) = lookup("EXPENSE_PAGE") {
            config.page_path = Some(PathBuf::from(path));
        }

        config
    }

    /// Checks prefixes and the template together.
    ///
    /// The template must carry the `{field_prefix}-{placeholder}-` segment,
    /// so overriding only `EXPENSE_FIELD_PREFIX` fails here.
    pub fn validate(&self) -> FormResult<()> {
        validate_currency_prefix(&self.currency_prefix)?;
        validate_field_prefix(&self.field_prefix)?;
        self.template()?;
        validate_index_segment(&self.row_template, &self.field_prefix, &self.placeholder)?;
        Ok(())
    }

    /// Builds the row template.
    pub fn template(&self) -> CoreResult<RowTemplate> {
        RowTemplate::new(self.row_template.clone(), self.placeholder.clone())
    }

    pub fn currency_format(&self) -> CurrencyFormat {
        CurrencyFormat::new(self.currency_prefix.clone())
    }
}

/// What the server rendered into the page before any interaction.
///
/// An empty `rows` list is the "new expense" page; a non-empty one is
/// the edit page of a saved expense.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageState {
    pub rows: Vec<RowValues>,
    pub categories: Vec<CategoryOption>,
    pub tax_type: Option<String>,
    pub calculation_method: Option<String>,
}

impl PageState {
    /// Category choices for new rows, falling back to the configured ones.
    pub fn categories_or<'a>(&'a self, config: &'a FormConfig) -> &'a [CategoryOption] {
        if self.categories.is_empty() {
            &config.categories
        } else {
            &self.categories
        }
    }
}
