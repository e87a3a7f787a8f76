// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DEFAULT_TAX_RATE, Invoice, InvoiceStatus, InvoiceTotals, LineItem, LineItemKind, NewInvoice,
    compute_totals, payment_status, round_to_cents,
};
use time::macros::datetime;

fn create_diagnostic_items() -> Vec<LineItem> {
    vec![
        LineItem::new(
            String::from("Standard Diagnostic"),
            1.0,
            49.99,
            LineItemKind::Labor,
            true,
        ),
        LineItem::new(
            String::from("Thermal Paste Re-application"),
            1.0,
            25.00,
            LineItemKind::Labor,
            true,
        ),
    ]
}

#[test]
fn test_totals_for_taxed_labor() {
    let totals: InvoiceTotals =
        compute_totals(&create_diagnostic_items(), true, DEFAULT_TAX_RATE, 0.0);

    assert_eq!(totals.subtotal, 74.99);
    assert_eq!(totals.tax, 6.19);
    assert_eq!(totals.discount, 0.0);
    assert_eq!(totals.total, 81.18);
}

#[test]
fn test_tax_applies_only_to_taxable_items() {
    let items: Vec<LineItem> = vec![
        LineItem::new(String::from("SSD"), 1.0, 100.0, LineItemKind::Part, true),
        LineItem::new(
            String::from("Data transfer"),
            1.0,
            50.0,
            LineItemKind::FlatRate,
            false,
        ),
    ];

    let totals: InvoiceTotals = compute_totals(&items, true, 0.10, 0.0);

    assert_eq!(totals.subtotal, 150.0);
    assert_eq!(totals.tax, 10.0);
    assert_eq!(totals.total, 160.0);
}

#[test]
fn test_tax_disabled_charges_no_tax() {
    let totals: InvoiceTotals =
        compute_totals(&create_diagnostic_items(), false, DEFAULT_TAX_RATE, 0.0);

    assert_eq!(totals.tax, 0.0);
    assert_eq!(totals.total, 74.99);
}

#[test]
fn test_discount_never_drives_total_negative() {
    let totals: InvoiceTotals =
        compute_totals(&create_diagnostic_items(), false, DEFAULT_TAX_RATE, 500.0);

    assert_eq!(totals.discount, 500.0);
    assert_eq!(totals.total, 0.0);
}

#[test]
fn test_quantities_multiply_unit_price() {
    let items: Vec<LineItem> = vec![LineItem::new(
        String::from("Bench hour"),
        2.5,
        80.0,
        LineItemKind::Labor,
        false,
    )];

    let totals: InvoiceTotals = compute_totals(&items, true, DEFAULT_TAX_RATE, 0.0);

    assert_eq!(totals.subtotal, 200.0);
    assert_eq!(totals.tax, 0.0);
}

#[test]
fn test_round_to_cents() {
    assert_eq!(round_to_cents(6.186_675), 6.19);
    assert_eq!(round_to_cents(10.0), 10.0);
    assert_eq!(round_to_cents(0.004), 0.0);
}

#[test]
fn test_payment_status_derivation() {
    assert_eq!(payment_status(81.18, 0.0), InvoiceStatus::Unpaid);
    assert_eq!(payment_status(81.18, 40.0), InvoiceStatus::PartiallyPaid);
    assert_eq!(payment_status(81.18, 81.18), InvoiceStatus::Paid);
    assert_eq!(payment_status(81.18, 100.0), InvoiceStatus::Paid);
    assert_eq!(payment_status(0.0, 0.0), InvoiceStatus::Paid);
}

#[test]
fn test_new_invoice_with_totals_overwrites_money_fields() {
    let new_invoice: NewInvoice = NewInvoice {
        ticket_id: String::from("t1"),
        customer_id: String::from("c1"),
        items: create_diagnostic_items(),
        subtotal: 1.0,
        total: 1.0,
        ..NewInvoice::default()
    };
    let totals: InvoiceTotals =
        compute_totals(&new_invoice.items, true, DEFAULT_TAX_RATE, 0.0);

    let invoice: Invoice = new_invoice
        .with_totals(totals)
        .into_invoice(String::from("i1"), datetime!(2024-05-15 15:00 UTC));

    assert_eq!(invoice.subtotal, 74.99);
    assert_eq!(invoice.total, 81.18);
    assert_eq!(invoice.balance_due(), 81.18);
    assert!(invoice.tax_enabled());
}

#[test]
fn test_invoice_parses_persisted_shape() {
    let json: &str = r#"{
        "id": "i1",
        "ticketId": "t1",
        "customerId": "c1",
        "status": "Partially Paid",
        "items": [
            { "id": "li1", "description": "Standard Diagnostic", "type": "Labor",
              "quantity": 1, "unitPrice": 49.99, "isTaxable": true },
            { "id": "li2", "description": "Cable", "type": "Flat Rate",
              "quantity": 1, "unitPrice": 5, "isTaxable": false }
        ],
        "subtotal": 54.99,
        "tax": 4.12,
        "isTaxEnabled": true,
        "discount": 0,
        "total": 59.11,
        "amountPaid": 20,
        "createdAt": "2024-05-15T15:00:00Z"
    }"#;

    let invoice: Invoice = serde_json::from_str(json).unwrap();

    assert_eq!(invoice.status, InvoiceStatus::PartiallyPaid);
    assert_eq!(invoice.items.len(), 2);
    assert_eq!(invoice.items[1].kind, LineItemKind::FlatRate);
    assert_eq!(invoice.balance_due(), 39.11);
}
