//! # Row Template
//!
//! Pure string templating for line-item rows. No live document involved:
//! a template goes in, a fully formed row comes out, and both can be
//! tested with plain strings.
//!
//! ## Index Encoding
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Template (from the page):                                              │
//! │    <input name="items-__prefix__-quantity" id="items-__prefix__-...">   │
//! │                        │                                                │
//! │                 render(2)                                               │
//! │                        ▼                                                │
//! │    <input name="items-2-quantity" id="items-2-...">                     │
//! │                        │                                                │
//! │          row 0 removed → reindex(.., 2, 1)                              │
//! │                        ▼                                                │
//! │    <input name="items-1-quantity" id="items-1-...">                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every identifier inside a row embeds the `{prefix}-{index}-` segment, so
//! renumbering is one substitution of that segment.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::validation::validate_row_template;

/// Placeholder token used by the page's row template.
pub const DEFAULT_PLACEHOLDER: &str = "__prefix__";

/// Prefix of every per-row field identifier.
pub const DEFAULT_FIELD_PREFIX: &str = "items";

// =============================================================================
// Row Template
// =============================================================================

/// A parameterized row with an index placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowTemplate {
    source: String,
    placeholder: String,
}

impl RowTemplate {
    /// Creates a template after checking it mentions the placeholder.
    ///
    /// ## Example
    /// ```rust
    /// use expense_core::template::RowTemplate;
    ///
    /// let template = RowTemplate::new(
    ///     r#"<label for="items-__prefix__-quantity">#__prefix__</label>"#,
    ///     "__prefix__",
    /// ).unwrap();
    ///
    /// assert_eq!(
    ///     template.render(3),
    ///     r#"<label for="items-3-quantity">#3</label>"#
    /// );
    /// ```
    pub fn new(source: impl Into<String>, placeholder: impl Into<String>) -> CoreResult<Self> {
        let source = source.into();
        let placeholder = placeholder.into();
        validate_row_template(&source, &placeholder)?;

        Ok(RowTemplate {
            source,
            placeholder,
        })
    }

    /// Substitutes every placeholder occurrence with `index`.
    pub fn render(&self, index: usize) -> String {
        self.source.replace(&self.placeholder, &index.to_string())
    }

    /// The unrendered template text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The placeholder token.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }
}

// =============================================================================
// Field Names
// =============================================================================

/// Identifiers of the fields inside one row.
///
/// Names follow the `{prefix}-{index}-{field}` convention the server-side
/// form expects when the rows are submitted as a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FieldNames {
    pub item_name: String,
    pub quantity: String,
    pub unit: String,
    pub unit_price: String,
    pub line_total: String,
    pub category: String,
}

impl FieldNames {
    /// Builds the identifiers for the row at `index`.
    ///
    /// ```rust
    /// use expense_core::template::FieldNames;
    ///
    /// let names = FieldNames::for_index("items", 4);
    /// assert_eq!(names.quantity, "items-4-quantity");
    /// assert_eq!(names.unit_price, "items-4-unit_price");
    /// ```
    pub fn for_index(prefix: &str, index: usize) -> Self {
        let field = |name: &str| format!("{}-{}-{}", prefix, index, name);
        FieldNames {
            item_name: field("item_name"),
            quantity: field("quantity"),
            unit: field("unit"),
            unit_price: field("unit_price"),
            line_total: field("line_total"),
            category: field("category"),
        }
    }

    /// Rewrites every identifier from index `from` to index `to`.
    pub fn reindex(&mut self, prefix: &str, from: usize, to: usize) {
        for name in [
            &mut self.item_name,
            &mut self.quantity,
            &mut self.unit,
            &mut self.unit_price,
            &mut self.line_total,
            &mut self.category,
        ] {
            *name = reindex(name, prefix, from, to);
        }
    }
}

// =============================================================================
// Renumbering
// =============================================================================

/// Replaces every `{prefix}-{from}-` segment in `text` with `{prefix}-{to}-`.
///
/// The trailing hyphen anchors the match, so renumbering row 1 never
/// touches `items-11-quantity`.
///
/// ## Example
/// ```rust
/// use expense_core::template::reindex;
///
/// let markup = r#"<input name="items-1-quantity"><input name="items-11-quantity">"#;
/// assert_eq!(
///     reindex(markup, "items", 1, 0),
///     r#"<input name="items-0-quantity"><input name="items-11-quantity">"#
/// );
/// ```
pub fn reindex(text: &str, prefix: &str, from: usize, to: usize) -> String {
    if from == to {
        return text.to_string();
    }
    let old = format!("{}-{}-", prefix, from);
    let new = format!("{}-{}-", prefix, to);
    text.replace(&old, &new)
}

// =============================================================================
// Unit Tests
// =============================================================================
