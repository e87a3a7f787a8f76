// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// User name is empty or invalid.
    #[error("Invalid name: {0}")]
    InvalidName(String),
    /// Email address is empty or malformed.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),
    /// Role string is not one of the known roles.
    #[error("Invalid role: {0}")]
    InvalidRole(String),
    /// Device type string is not one of the known device types.
    #[error("Invalid device type: {0}")]
    InvalidDeviceType(String),
    /// Ticket status string is not one of the workflow states.
    #[error("Invalid ticket status: {0}")]
    InvalidTicketStatus(String),
    /// Priority string is not one of the known priorities.
    #[error("Invalid priority: {0}")]
    InvalidPriority(String),
    /// Line item kind string is not one of the known kinds.
    #[error("Invalid line item type: {0}")]
    InvalidLineItemKind(String),
    /// Invoice status string is not one of the known statuses.
    #[error("Invalid invoice status: {0}")]
    InvalidInvoiceStatus(String),
    /// A required reference to another entity is empty.
    #[error("Missing reference: {field} must not be empty")]
    MissingReference {
        /// The field holding the reference.
        field: &'static str,
    },
    /// A line item has a negative or non-finite quantity or price.
    #[error("Invalid line item '{description}': {reason}")]
    InvalidLineItem {
        /// The description of the offending line item.
        description: String,
        /// Why it was rejected.
        reason: &'static str,
    },
    /// A monetary amount is negative or non-finite.
    #[error("Invalid amount for {field}: {value}")]
    InvalidAmount {
        /// The field holding the amount.
        field: &'static str,
        /// The rejected value.
        value: String,
    },
    /// No ticket number above the highest existing one fits in a `u32`.
    #[error("Ticket numbers exhausted: highest existing number is {highest}")]
    TicketNumbersExhausted {
        /// The highest ticket number in the shop.
        highest: u32,
    },
}
