// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DEFAULT_TAX_RATE, DomainError, InvoiceTotals, LineItem, LineItemKind, compute_totals,
    validate_amount, validate_customer_name, validate_invoice_totals, validate_line_items,
    validate_reference, validate_user_fields,
};

#[test]
fn test_validate_user_fields_accepts_valid_user() {
    assert!(validate_user_fields("Shop Owner", "admin@cmx.com").is_ok());
}

#[test]
fn test_validate_user_fields_rejects_blank_name() {
    let result: Result<(), DomainError> = validate_user_fields("   ", "admin@cmx.com");
    assert!(matches!(result, Err(DomainError::InvalidName(_))));
}

#[test]
fn test_validate_user_fields_rejects_bad_email() {
    assert!(matches!(
        validate_user_fields("Shop Owner", ""),
        Err(DomainError::InvalidEmail(_))
    ));
    assert!(matches!(
        validate_user_fields("Shop Owner", "admin.cmx.com"),
        Err(DomainError::InvalidEmail(_))
    ));
}

#[test]
fn test_validate_customer_name_needs_one_part() {
    assert!(validate_customer_name("Alice", "").is_ok());
    assert!(validate_customer_name("", "Johnson").is_ok());
    assert!(matches!(
        validate_customer_name(" ", ""),
        Err(DomainError::InvalidName(_))
    ));
}

#[test]
fn test_validate_reference() {
    assert!(validate_reference("customerId", "c1").is_ok());
    assert_eq!(
        validate_reference("deviceId", ""),
        Err(DomainError::MissingReference { field: "deviceId" })
    );
}

#[test]
fn test_validate_amount() {
    assert!(validate_amount("amountPaid", 0.0).is_ok());
    assert!(validate_amount("amountPaid", 12.5).is_ok());
    assert!(validate_amount("amountPaid", -0.01).is_err());
    assert!(validate_amount("amountPaid", f64::NAN).is_err());
}

#[test]
fn test_validate_line_items() {
    let good: Vec<LineItem> = vec![LineItem::new(
        String::from("Screen"),
        1.0,
        120.0,
        LineItemKind::Part,
        true,
    )];
    assert!(validate_line_items(&good).is_ok());

    let bad_quantity: Vec<LineItem> = vec![LineItem::new(
        String::from("Screen"),
        -1.0,
        120.0,
        LineItemKind::Part,
        true,
    )];
    assert!(matches!(
        validate_line_items(&bad_quantity),
        Err(DomainError::InvalidLineItem { .. })
    ));

    let bad_price: Vec<LineItem> = vec![LineItem::new(
        String::from("Screen"),
        1.0,
        f64::INFINITY,
        LineItemKind::Part,
        true,
    )];
    assert!(validate_line_items(&bad_price).is_err());
}

#[test]
fn test_finite_prices_can_still_overflow_totals() {
    let items: Vec<LineItem> = vec![LineItem::new(
        String::from("Gold-plated board"),
        1.0,
        1e307,
        LineItemKind::Part,
        true,
    )];
    assert!(validate_line_items(&items).is_ok());

    let totals: InvoiceTotals = compute_totals(&items, true, DEFAULT_TAX_RATE, 0.0);

    assert!(matches!(
        validate_invoice_totals(&totals),
        Err(DomainError::InvalidAmount {
            field: "subtotal",
            ..
        })
    ));
}

#[test]
fn test_ordinary_totals_are_valid() {
    let items: Vec<LineItem> = vec![LineItem::new(
        String::from("Battery"),
        2.0,
        39.5,
        LineItemKind::Part,
        true,
    )];

    let totals: InvoiceTotals = compute_totals(&items, true, DEFAULT_TAX_RATE, 5.0);

    assert!(validate_invoice_totals(&totals).is_ok());
}
