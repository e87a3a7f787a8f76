// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::invoice::{Invoice, InvoiceTotals, LineItem};

/// Validates the fields every staff account needs.
///
/// # Arguments
///
/// * `name` - The user's display name
/// * `email` - The user's sign-in email
///
/// # Errors
///
/// Returns an error if:
/// - The name is blank
/// - The email is blank or has no `@`
pub fn validate_user_fields(name: &str, email: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }

    let email: &str = email.trim();
    if email.is_empty() {
        return Err(DomainError::InvalidEmail(String::from(
            "Email cannot be empty",
        )));
    }
    if !email.contains('@') {
        return Err(DomainError::InvalidEmail(format!(
            "'{email}' is not an email address"
        )));
    }

    Ok(())
}

/// Validates that a customer has at least one name part.
///
/// # Errors
///
/// Returns an error if both the first and last name are blank.
pub fn validate_customer_name(first_name: &str, last_name: &str) -> Result<(), DomainError> {
    if first_name.trim().is_empty() && last_name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Customer needs a first or last name",
        )));
    }
    Ok(())
}

/// Validates that a required foreign key is present.
///
/// The referenced record is not looked up.
///
/// # Errors
///
/// Returns an error if `value` is blank.
pub fn validate_reference(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::MissingReference { field });
    }
    Ok(())
}

/// Validates that a monetary amount is finite and not negative.
///
/// # Errors
///
/// Returns an error if `value` is negative, NaN or infinite.
pub fn validate_amount(field: &'static str, value: f64) -> Result<(), DomainError> {
    if !value.is_finite() || value < 0.0 {
        return Err(DomainError::InvalidAmount {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Validates invoice line items.
///
/// # Errors
///
/// Returns an error for the first item whose quantity or unit price is
/// negative or not finite.
pub fn validate_line_items(items: &[LineItem]) -> Result<(), DomainError> {
    for item in items {
        if !item.quantity.is_finite() || item.quantity < 0.0 {
            return Err(DomainError::InvalidLineItem {
                description: item.description.clone(),
                reason: "quantity must be zero or more",
            });
        }
        if !item.unit_price.is_finite() || item.unit_price < 0.0 {
            return Err(DomainError::InvalidLineItem {
                description: item.description.clone(),
                reason: "unit price must be zero or more",
            });
        }
    }
    Ok(())
}

/// Validates totals computed from line items before they are stored.
///
/// Large but finite prices can still overflow once summed, taxed or rounded.
///
/// # Errors
///
/// Returns an error naming the first figure that is negative or not finite.
pub fn validate_invoice_totals(totals: &InvoiceTotals) -> Result<(), DomainError> {
    validate_amount("subtotal", totals.subtotal)?;
    validate_amount("tax", totals.tax)?;
    validate_amount("discount", totals.discount)?;
    validate_amount("total", totals.total)
}

/// Validates every money field of a stored invoice.
///
/// # Errors
///
/// Returns an error naming the first field that is negative or not finite.
pub fn validate_invoice_amounts(invoice: &Invoice) -> Result<(), DomainError> {
    validate_amount("subtotal", invoice.subtotal)?;
    validate_amount("tax", invoice.tax)?;
    validate_amount("discount", invoice.discount)?;
    validate_amount("total", invoice.total)?;
    validate_amount("amountPaid", invoice.amount_paid)
}
