//! End-to-end form scenarios driven purely through page events.

use expense_core::Money;
use expense_form::{
    ErrorCode, EventTarget, FormConfig, FormController, FormEvent, PageState, RenderedForm,
    SummarySlot,
};

fn event(json: &str) -> FormEvent {
    serde_json::from_str(json).unwrap()
}

fn new_form() -> FormController<RenderedForm> {
    let mut form = FormController::new(&FormConfig::default(), RenderedForm::new()).unwrap();
    form.on_init();
    form
}

fn fill_row(form: &mut FormController<RenderedForm>, index: usize, quantity: &str, price: &str) {
    form.dispatch(&event(&format!(
        r#"{{"type":"input","target":{{"classList":["item-quantity"],"name":"items-{index}-quantity"}},"value":"{quantity}"}}"#
    )))
    .unwrap();
    form.dispatch(&event(&format!(
        r#"{{"type":"input","target":{{"classList":["item-unit_price"],"name":"items-{index}-unit_price"}},"value":"{price}"}}"#
    )))
    .unwrap();
}

fn select_tax(form: &mut FormController<RenderedForm>, tax_type: &str, method: Option<&str>) {
    form.dispatch(&event(&format!(
        r#"{{"type":"change","target":{{"id":"tax_type_select"}},"value":"{tax_type}"}}"#
    )))
    .unwrap();
    if let Some(method) = method {
        form.dispatch(&event(&format!(
            r#"{{"type":"change","target":{{"name":"tax_calculation_method"}},"value":"{method}"}}"#
        )))
        .unwrap();
    }
}

fn shown(form: &FormController<RenderedForm>) -> (String, String, String) {
    let page = form.sink();
    (
        page.slot(SummarySlot::Subtotal).unwrap_or_default().to_string(),
        page.slot(SummarySlot::Tax).unwrap_or_default().to_string(),
        page.slot(SummarySlot::Total).unwrap_or_default().to_string(),
    )
}

#[test]
fn exempt_single_row() {
    let mut form = new_form();
    fill_row(&mut form, 0, "2", "100");
    select_tax(&mut form, "TAX_EXEMPT", None);

    let totals = form.totals();
    assert_eq!(totals.subtotal, Money::from_major(200));
    assert_eq!(totals.tax, Money::zero());
    assert_eq!(totals.total, Money::from_major(200));
    assert_eq!(shown(&form), ("$ 200".into(), "$ 0".into(), "$ 200".into()));
}

#[test]
fn taxable_exclusive_single_row() {
    let mut form = new_form();
    fill_row(&mut form, 0, "2", "100");
    select_tax(&mut form, "TAXABLE", Some("EXCLUSIVE"));

    assert_eq!(shown(&form), ("$ 200".into(), "$ 10".into(), "$ 210".into()));
    assert!(form.sink().method_control_visible);
}

#[test]
fn taxable_inclusive_single_row() {
    let mut form = new_form();
    fill_row(&mut form, 0, "1", "105");
    select_tax(&mut form, "TAXABLE", Some("INCLUSIVE"));

    let totals = form.totals();
    assert_eq!(totals.base_amount, Money::from_major(105));
    assert_eq!(totals.subtotal, Money::from_major(100));
    assert_eq!(totals.tax, Money::from_major(5));
    assert_eq!(totals.total, Money::from_major(105));
}

#[test]
fn remove_first_of_two_rows() {
    let mut form = new_form();
    fill_row(&mut form, 0, "1", "50");
    form.dispatch(&event(r#"{"type":"click","target":{"id":"add-item"}}"#))
        .unwrap();
    fill_row(&mut form, 1, "3", "10");
    assert_eq!(shown(&form).0, "$ 80");

    let first = form.store().rows()[0].id();
    let second = form.store().rows()[1].id();
    form.dispatch(&FormEvent::Click {
        target: EventTarget {
            class_list: vec!["remove-item".into()],
            row: Some(first),
            ..EventTarget::default()
        },
    })
    .unwrap();

    let remaining = &form.store().rows()[0];
    assert_eq!(form.store().len(), 1);
    assert_eq!(remaining.id(), second);
    assert_eq!(remaining.index(), 0);
    assert_eq!(remaining.fields().quantity, "items-0-quantity");
    assert_eq!(shown(&form), ("$ 30".into(), "$ 0".into(), "$ 30".into()));

    // the renumbered row answers to its new name
    fill_row(&mut form, 0, "4", "10");
    assert_eq!(form.totals().total, Money::from_major(40));
}

#[test]
fn first_row_on_empty_page() {
    let form = new_form();

    assert_eq!(form.store().len(), 1);
    let row = &form.store().rows()[0];
    assert_eq!(row.index(), 0);
    assert_eq!(row.line_total(), Money::zero());
    assert!(row.quantity().is_zero());
    assert!(row.unit_price().is_zero());
    assert_eq!(form.sink().rows[0].line_total.as_deref(), Some("$ 0"));
}

#[test]
fn edit_page_shows_totals_on_load() {
    let page: PageState = serde_json::from_str(
        r#"{
            "rows": [
                {"itemName": "Paper", "quantity": "10", "unitPrice": "120"},
                {"itemName": "Toner", "quantity": "1", "unitPrice": "2,000"}
            ],
            "taxType": "TAXABLE",
            "calculationMethod": "INCLUSIVE"
        }"#,
    )
    .unwrap();
    let mut form =
        FormController::from_page(&FormConfig::default(), page, RenderedForm::new()).unwrap();
    form.on_init();

    // "2,000" stops at the comma and reads as 2
    assert_eq!(form.store().len(), 2);
    assert_eq!(form.totals().base_amount, Money::from_major(1202));
    assert_eq!(form.totals().subtotal, Money::from_major(1145));
    assert_eq!(form.totals().tax, Money::from_major(57));
    assert_eq!(shown(&form).2, "$ 1,202");
}

#[test]
fn removing_an_already_removed_row_fails_cleanly() {
    let mut form = new_form();
    let row = form.store().rows()[0].id();
    let click = FormEvent::Click {
        target: EventTarget {
            class_list: vec!["remove-item".into()],
            row: Some(row),
            ..EventTarget::default()
        },
    };

    form.dispatch(&click).unwrap();
    let err = form.dispatch(&click).unwrap_err();

    assert_eq!(err.code, ErrorCode::NotFound);
    assert!(form.store().is_empty());
    assert_eq!(shown(&form).2, "$ 0");
}

#[test]
fn missing_tax_slot_still_renders_the_rest() {
    let mut form = FormController::new(
        &FormConfig::default(),
        RenderedForm::without([SummarySlot::Tax]),
    )
    .unwrap();
    form.on_init();
    fill_row(&mut form, 0, "2", "100");
    select_tax(&mut form, "TAXABLE", Some("EXCLUSIVE"));

    let page = form.sink();
    assert_eq!(page.tax, None);
    assert_eq!(page.subtotal.as_deref(), Some("$ 200"));
    assert_eq!(page.total.as_deref(), Some("$ 210"));
}

#[test]
fn rapid_add_remove_keeps_indices_contiguous() {
    let mut form = new_form();
    for _ in 0..5 {
        form.on_add_requested();
    }
    let ids: Vec<_> = form.store().rows().iter().map(|r| r.id()).collect();
    for id in [ids[1], ids[3], ids[0]] {
        form.on_remove_requested(id).unwrap();
    }
    form.on_add_requested();

    for (i, row) in form.store().rows().iter().enumerate() {
        assert_eq!(row.index(), i);
        assert_eq!(row.fields().unit_price, format!("items-{i}-unit_price"));
        assert!(form.sink().row(row.id()).unwrap().markup.contains(&format!("items-{i}-quantity")));
    }
    assert_eq!(form.store().len(), 4);
}

#[test]
fn field_prefix_must_match_the_row_template() {
    let config = FormConfig {
        field_prefix: "lines".into(),
        ..FormConfig::default()
    };
    let err = FormController::new(&config, RenderedForm::new()).err().unwrap();
    assert_eq!(err.code, ErrorCode::ValidationError);

    let config = FormConfig {
        field_prefix: "lines".into(),
        row_template: config.row_template.replace("items-", "lines-"),
        ..FormConfig::default()
    };
    let mut form = FormController::new(&config, RenderedForm::new()).unwrap();
    form.on_init();
    form.on_add_requested();
    let third = form.on_add_requested();
    let first = form.store().rows()[0].id();
    form.on_remove_requested(first).unwrap();

    let shown = form.sink().row(third).unwrap();
    assert_eq!(shown.index, 1);
    assert!(shown.markup.contains("lines-1-quantity"));
    assert!(!shown.markup.contains("lines-2-"));

    // name-based dispatch follows the renumbered row
    form.dispatch(&event(
        r#"{"type":"input","target":{"classList":["item-quantity"],"name":"lines-1-quantity"},"value":"3"}"#,
    ))
    .unwrap();
    assert_eq!(form.store().get(third).unwrap().quantity_input(), "3");
}
