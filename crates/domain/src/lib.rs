// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types for CMX Repair Desk.
//!
//! Field names serialize in camelCase and enum values use their display
//! spelling (`"Front Desk"`, `"Waiting for Approval"`), matching the
//! persisted snapshot format.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod entity;
mod error;
mod invoice;
mod numbering;
mod ticket;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use entity::{Entity, EntityKind};
pub use error::DomainError;
pub use invoice::{
    DEFAULT_TAX_RATE, Invoice, InvoiceStatus, InvoiceTotals, LineItem, LineItemKind, NewInvoice,
    compute_totals, payment_status, round_to_cents,
};
pub use numbering::{FIRST_TICKET_NUMBER, next_ticket_number};
pub use ticket::{NewTicket, Priority, Ticket, TicketStatus};
pub use types::{
    Appointment, Customer, Device, DeviceType, NewAppointment, NewCustomer, NewDevice, NewUser,
    Role, User,
};
pub use validation::{
    validate_amount, validate_customer_name, validate_invoice_amounts, validate_invoice_totals,
    validate_line_items, validate_reference, validate_user_fields,
};
