// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operations a signed-in staff member performs on the shop.
//!
//! This layer sits between a front end and [`cmx::Store`]. It signs users
//! in and out, enforces role rules, computes invoice totals and builds the
//! dashboard and search views.

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

mod auth;
mod capabilities;
mod dashboard;
mod error;
mod handlers;
mod request_response;
mod search;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService};
pub use capabilities::{compute_global_capabilities, compute_user_capabilities, is_last_admin};
pub use dashboard::{DashboardSummary, StatusCount, dashboard, summarize};
pub use error::{ApiError, AuthError, translate_core_error, translate_domain_error};
pub use handlers::{
    advance_ticket, change_ticket_status, create_appointment, create_customer, create_device, create_invoice,
    create_ticket, create_user, current_actor, delete_appointment, delete_customer, delete_device,
    delete_invoice, delete_ticket, delete_user, export_data, import_data, list_users, login,
    logout, record_payment, update_appointment, update_customer, update_device, update_invoice,
    update_ticket, update_user, whoami,
};
pub use request_response::{
    Capability, ChangeTicketStatusRequest, CreateInvoiceRequest, CreateUserRequest,
    GlobalCapabilities, ImportResponse, LoginRequest, LoginResponse, RecordPaymentRequest,
    UpdateInvoiceRequest, UpdateUserRequest, UserCapabilities, UserInfo, WhoAmIResponse,
};
pub use search::{SearchResults, quick_search, search};
