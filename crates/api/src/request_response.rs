// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response data transfer objects.

use cmx_domain::{InvoiceStatus, LineItem, Role, User};
use serde::{Deserialize, Serialize};

/// Sign-in request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    /// Email address, matched case-insensitively.
    pub email: String,
    /// Password, compared verbatim.
    pub password: String,
}

/// Sign-in response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponse {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Represents whether a specific action is permitted.
///
/// Serializes to JSON as true/false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    /// Returns true if the capability is allowed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Creates a capability from a boolean value.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(self.is_allowed())
    }
}

/// What the signed-in user may do across the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GlobalCapabilities {
    pub can_manage_users: Capability,
    pub can_import_data: Capability,
    pub can_delete_records: Capability,
}

/// What the signed-in user may do to one staff account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserCapabilities {
    pub can_edit: Capability,
    pub can_change_role: Capability,
    pub can_delete: Capability,
}

/// A staff account as shown to callers. Passwords are never included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub has_password: bool,
    pub capabilities: UserCapabilities,
}

impl UserInfo {
    pub(crate) fn new(user: &User, capabilities: UserCapabilities) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            has_password: user.password.as_deref().is_some_and(|p| !p.is_empty()),
            capabilities,
        }
    }
}

/// The signed-in user and what they may do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhoAmIResponse {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub capabilities: GlobalCapabilities,
}

/// Request to create a staff account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub role: Role,
    pub email: String,
    pub password: Option<String>,
}

/// Request to change a staff account. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub role: Option<Role>,
    pub email: Option<String>,
    /// `Some(None)` removes the password.
    pub password: Option<Option<String>>,
}

/// Request to move a ticket through the workflow.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangeTicketStatusRequest {
    pub ticket_id: String,
    pub status: cmx_domain::TicketStatus,
    /// Log message. Blank uses the status name.
    pub message: String,
    /// Whether the log entry is hidden from the customer.
    pub internal: bool,
}

/// Request to raise an invoice. Money totals are computed from `items`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateInvoiceRequest {
    pub ticket_id: String,
    /// Defaults to the ticket's customer.
    pub customer_id: Option<String>,
    pub items: Vec<LineItem>,
    pub tax_enabled: bool,
    pub discount: f64,
    /// Defaults to `Draft`.
    pub status: Option<InvoiceStatus>,
}

/// Request to change an invoice's billing. Totals are recomputed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UpdateInvoiceRequest {
    pub items: Option<Vec<LineItem>>,
    pub tax_enabled: Option<bool>,
    pub discount: Option<f64>,
    pub status: Option<InvoiceStatus>,
}

/// Request to record money received against an invoice.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecordPaymentRequest {
    pub invoice_id: String,
    pub amount: f64,
}

/// Record counts after an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportResponse {
    pub customers: usize,
    pub devices: usize,
    pub tickets: usize,
    pub invoices: usize,
    pub appointments: usize,
    pub users: usize,
}
