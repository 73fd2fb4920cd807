//! # Form Events
//!
//! Page events as they reach the form's single delegation point, and the
//! action each one maps to.
//!
//! ## Matching
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  input   .item-quantity / .item-unit_price  ──► edit amount, recompute  │
//! │  input   .item-name / .item-unit            ──► edit text               │
//! │  change  .item-category                     ──► select category         │
//! │  change  #tax_type_select                   ──► tax type                │
//! │  change  [name=tax_calculation_method]      ──► calculation method      │
//! │  click   .remove-item                       ──► remove owning row       │
//! │  click   #add-item                          ──► add row                 │
//! │  reset   (the form itself)                  ──► one blank row           │
//! │  anything else                              ──► ignored                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use expense_core::RowId;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const QUANTITY_CLASS: &str = "item-quantity";
pub const UNIT_PRICE_CLASS: &str = "item-unit_price";
pub const ITEM_NAME_CLASS: &str = "item-name";
pub const UNIT_CLASS: &str = "item-unit";
pub const CATEGORY_CLASS: &str = "item-category";
pub const REMOVE_CLASS: &str = "remove-item";
pub const ADD_ITEM_ID: &str = "add-item";
pub const TAX_TYPE_ID: &str = "tax_type_select";
pub const CALCULATION_METHOD_NAME: &str = "tax_calculation_method";

// =============================================================================
// Events
// =============================================================================

/// The element an event happened on.
///
/// `row` is set by hosts that track row identity themselves. Without it the
/// owning row is recovered from the index embedded in `name` or `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct EventTarget {
    pub id: Option<String>,
    pub class_list: Vec<String>,
    pub row: Option<RowId>,
    pub name: Option<String>,
}

impl EventTarget {
    pub fn has_class(&self, class: &str) -> bool {
        self.class_list.iter().any(|c| c == class)
    }

    fn id_is(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }

    fn name_is(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }

    /// Row index embedded in the target's name or id, e.g. `2` for
    /// `items-2-quantity`.
    pub fn embedded_index(&self, field_prefix: &str) -> Option<usize> {
        [self.name.as_deref(), self.id.as_deref()]
            .into_iter()
            .flatten()
            .find_map(|text| parse_embedded_index(text, field_prefix))
    }
}

fn parse_embedded_index(text: &str, field_prefix: &str) -> Option<usize> {
    let rest = text.strip_prefix(field_prefix)?.strip_prefix('-')?;
    let (digits, _) = rest.split_once('-')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// A page event.
///
/// ## Wire Format
/// ```json
/// { "type": "input", "target": { "classList": ["item-quantity"], "name": "items-0-quantity" }, "value": "2" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormEvent {
    Input {
        target: EventTarget,
        value: String,
    },
    Change {
        target: EventTarget,
        #[serde(default)]
        value: Option<String>,
    },
    Click {
        target: EventTarget,
    },
    Reset,
}

impl FormEvent {
    /// The element the event happened on. `None` for form-level events.
    pub fn target(&self) -> Option<&EventTarget> {
        match self {
            FormEvent::Input { target, .. }
            | FormEvent::Change { target, .. }
            | FormEvent::Click { target } => Some(target),
            FormEvent::Reset => None,
        }
    }

    /// What the event asks the form to do.
    pub fn action(&self) -> Action {
        match self {
            FormEvent::Input { target, value } => {
                let value = value.clone();
                if target.has_class(QUANTITY_CLASS) {
                    Action::EditQuantity(value)
                } else if target.has_class(UNIT_PRICE_CLASS) {
                    Action::EditUnitPrice(value)
                } else if target.has_class(ITEM_NAME_CLASS) {
                    Action::EditItemName(value)
                } else if target.has_class(UNIT_CLASS) {
                    Action::EditUnit(value)
                } else {
                    Action::Ignore
                }
            }
            FormEvent::Change { target, value } => {
                if target.has_class(CATEGORY_CLASS) {
                    Action::SelectCategory(value.clone())
                } else if target.id_is(TAX_TYPE_ID) {
                    Action::SetTaxType(value.clone().unwrap_or_default())
                } else if target.name_is(CALCULATION_METHOD_NAME) {
                    Action::SetCalculationMethod(value.clone())
                } else {
                    Action::Ignore
                }
            }
            FormEvent::Click { target } => {
                if target.has_class(REMOVE_CLASS) {
                    Action::RemoveRow
                } else if target.id_is(ADD_ITEM_ID) {
                    Action::AddRow
                } else {
                    Action::Ignore
                }
            }
            FormEvent::Reset => Action::Reset,
        }
    }
}

/// What a matched event does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    EditQuantity(String),
    EditUnitPrice(String),
    EditItemName(String),
    EditUnit(String),
    SelectCategory(Option<String>),
    RemoveRow,
    AddRow,
    SetTaxType(String),
    SetCalculationMethod(Option<String>),
    Reset,
    Ignore,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(classes: &[&str]) -> EventTarget {
        EventTarget {
            class_list: classes.iter().map(|c| c.to_string()).collect(),
            ..EventTarget::default()
        }
    }

    #[test]
    fn test_input_on_amount_fields() {
        let event = FormEvent::Input {
            target: target(&["form-control", QUANTITY_CLASS]),
            value: "3".to_string(),
        };
        assert_eq!(event.action(), Action::EditQuantity("3".to_string()));

        let event = FormEvent::Input {
            target: target(&[UNIT_PRICE_CLASS]),
            value: "12.5".to_string(),
        };
        assert_eq!(event.action(), Action::EditUnitPrice("12.5".to_string()));
    }

    #[test]
    fn test_unmatched_events_are_ignored() {
        let event = FormEvent::Input {
            target: target(&["notes"]),
            value: "x".to_string(),
        };
        assert_eq!(event.action(), Action::Ignore);

        let event = FormEvent::Click {
            target: target(&["item-quantity"]),
        };
        assert_eq!(event.action(), Action::Ignore);
    }

    #[test]
    fn test_tax_controls() {
        let select = FormEvent::Change {
            target: EventTarget {
                id: Some(TAX_TYPE_ID.to_string()),
                ..EventTarget::default()
            },
            value: Some("TAXABLE".to_string()),
        };
        assert_eq!(select.action(), Action::SetTaxType("TAXABLE".to_string()));

        let radio = FormEvent::Change {
            target: EventTarget {
                name: Some(CALCULATION_METHOD_NAME.to_string()),
                ..EventTarget::default()
            },
            value: Some("INCLUSIVE".to_string()),
        };
        assert_eq!(
            radio.action(),
            Action::SetCalculationMethod(Some("INCLUSIVE".to_string()))
        );
    }

    #[test]
    fn test_clicks() {
        let add = FormEvent::Click {
            target: EventTarget {
                id: Some(ADD_ITEM_ID.to_string()),
                ..EventTarget::default()
            },
        };
        assert_eq!(add.action(), Action::AddRow);

        let remove = FormEvent::Click {
            target: target(&[REMOVE_CLASS]),
        };
        assert_eq!(remove.action(), Action::RemoveRow);
    }

    #[test]
    fn test_embedded_index() {
        let mut t = target(&[QUANTITY_CLASS]);
        t.name = Some("items-12-quantity".to_string());
        assert_eq!(t.embedded_index("items"), Some(12));
        assert_eq!(t.embedded_index("lines"), None);

        t.name = Some("items--quantity".to_string());
        t.id = Some("items-3-quantity".to_string());
        assert_eq!(t.embedded_index("items"), Some(3));

        t.id = Some("items-x-quantity".to_string());
        assert_eq!(t.embedded_index("items"), None);
    }

    #[test]
    fn test_wire_format() {
        let json = r#"{"type":"input","target":{"classList":["item-quantity"],"name":"items-0-quantity"},"value":"2"}"#;
        let event: FormEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.action(), Action::EditQuantity("2".to_string()));
        assert_eq!(event.target().unwrap().embedded_index("items"), Some(0));

        let json = r#"{"type":"change","target":{"name":"tax_calculation_method"}}"#;
        let event: FormEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.action(), Action::SetCalculationMethod(None));

        let event: FormEvent = serde_json::from_str(r#"{"type":"reset"}"#).unwrap();
        assert_eq!(event.action(), Action::Reset);
        assert!(event.target().is_none());
    }
}
