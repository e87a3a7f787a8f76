// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing operations.
//!
//! Every handler requires a signed-in user. Handlers that only Admins may
//! call check the role before touching the store.

use cmx::{
    AppointmentPatch, CustomerPatch, DevicePatch, InvoicePatch, KeyValueStore, Snapshot, Store,
    TicketPatch, UserPatch,
};
use cmx_audit::LogVisibility;
use cmx_domain::{
    Appointment, Customer, DEFAULT_TAX_RATE, Device, EntityKind, Invoice, InvoiceStatus,
    InvoiceTotals, LineItem, NewAppointment, NewCustomer, NewDevice, NewInvoice, NewTicket,
    NewUser, Role, Ticket, TicketStatus, User, compute_totals, payment_status, round_to_cents,
    validate_amount, validate_invoice_totals, validate_line_items,
};
use tracing::info;

use crate::auth::{AuthenticatedActor, AuthenticationService, AuthorizationService};
use crate::capabilities::{compute_global_capabilities, compute_user_capabilities, is_last_admin};
use crate::error::{ApiError, translate_domain_error};
use crate::request_response::{
    ChangeTicketStatusRequest, CreateInvoiceRequest, CreateUserRequest, ImportResponse,
    LoginRequest, LoginResponse, RecordPaymentRequest, UpdateInvoiceRequest, UpdateUserRequest,
    UserInfo, WhoAmIResponse,
};

fn not_found(kind: EntityKind, id: &str) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: kind.to_string(),
        message: format!("No {} with id '{id}'", kind.as_str().to_lowercase()),
    }
}

/// Fails with `ResourceNotFound` when a non-blank reference names nothing.
///
/// Blank references are left for the store's field validation.
fn require_reference(exists: bool, kind: EntityKind, id: &str) -> Result<(), ApiError> {
    if id.trim().is_empty() || exists {
        Ok(())
    } else {
        Err(not_found(kind, id))
    }
}

/// Returns the signed-in user.
///
/// # Errors
///
/// Returns `AuthenticationFailed` if nobody is signed in.
pub fn current_actor<S: KeyValueStore>(store: &Store<S>) -> Result<AuthenticatedActor, ApiError> {
    Ok(AuthenticationService::current_actor(store)?)
}

fn user_info<S: KeyValueStore>(
    store: &Store<S>,
    actor: &AuthenticatedActor,
    user: &User,
) -> UserInfo {
    UserInfo::new(user, compute_user_capabilities(actor, user, store.users()))
}

// ----------------------------------------------------------------------
// Session
// ----------------------------------------------------------------------

/// Signs a user in.
///
/// # Errors
///
/// Returns an error if the credentials do not match a user.
pub fn login<S: KeyValueStore>(
    store: &mut Store<S>,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let actor: AuthenticatedActor =
        AuthenticationService::login(store, &request.email, &request.password)?;
    let user: &User = store
        .find_user(&actor.id)
        .ok_or_else(|| not_found(EntityKind::User, &actor.id))?;

    Ok(LoginResponse {
        user_id: user.id.clone(),
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role,
    })
}

/// Signs the current user out. Signing out when nobody is signed in is not
/// an error.
///
/// # Errors
///
/// Returns an error if the session cannot be cleared.
pub fn logout<S: KeyValueStore>(store: &mut Store<S>) -> Result<(), ApiError> {
    AuthenticationService::logout(store)
}

/// Returns the signed-in user with their global capabilities.
///
/// # Errors
///
/// Returns an error if nobody is signed in.
pub fn whoami<S: KeyValueStore>(store: &Store<S>) -> Result<WhoAmIResponse, ApiError> {
    let actor: AuthenticatedActor = current_actor(store)?;
    let user: &User = store
        .find_user(&actor.id)
        .ok_or_else(|| not_found(EntityKind::User, &actor.id))?;

    Ok(WhoAmIResponse {
        user_id: user.id.clone(),
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role,
        capabilities: compute_global_capabilities(&actor),
    })
}

// ----------------------------------------------------------------------
// Users
// ----------------------------------------------------------------------

/// Lists staff accounts with what the signed-in user may do to each.
///
/// # Errors
///
/// Returns an error if nobody is signed in.
pub fn list_users<S: KeyValueStore>(store: &Store<S>) -> Result<Vec<UserInfo>, ApiError> {
    let actor: AuthenticatedActor = current_actor(store)?;
    Ok(store
        .users()
        .iter()
        .map(|user| user_info(store, &actor, user))
        .collect())
}

/// Creates a staff account.
///
/// # Errors
///
/// Returns an error if:
/// - Nobody is signed in or the actor is not an Admin
/// - The name or email is invalid
pub fn create_user<S: KeyValueStore>(
    store: &mut Store<S>,
    request: CreateUserRequest,
) -> Result<UserInfo, ApiError> {
    let actor: AuthenticatedActor = current_actor(store)?;
    AuthorizationService::authorize_manage_users(&actor)?;

    let user: User = store.add_user(NewUser {
        name: request.name,
        role: request.role,
        email: request.email,
        password: request.password,
    })?;

    info!(user = %user.name, role = %user.role, by = %actor.name, "Created user");
    Ok(user_info(store, &actor, &user))
}

/// Changes a staff account.
///
/// # Errors
///
/// Returns an error if:
/// - Nobody is signed in or the actor is not an Admin
/// - The user does not exist
/// - The change would demote the last Admin
/// - The name or email is invalid
pub fn update_user<S: KeyValueStore>(
    store: &mut Store<S>,
    user_id: &str,
    request: UpdateUserRequest,
) -> Result<UserInfo, ApiError> {
    let actor: AuthenticatedActor = current_actor(store)?;
    AuthorizationService::authorize_manage_users(&actor)?;

    let target: &User = store
        .find_user(user_id)
        .ok_or_else(|| not_found(EntityKind::User, user_id))?;
    let demotes: bool = request.role.is_some_and(|role| role != Role::Admin);
    if demotes && is_last_admin(target, store.users()) {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("last_admin"),
            message: String::from("The shop must keep at least one Admin"),
        });
    }

    let user: User = store.update_user(
        user_id,
        UserPatch {
            name: request.name,
            role: request.role,
            email: request.email,
            password: request.password,
        },
    )?;

    info!(user = %user.name, by = %actor.name, "Updated user");
    Ok(user_info(store, &actor, &user))
}

/// Deletes a staff account.
///
/// # Errors
///
/// Returns an error if:
/// - Nobody is signed in or the actor is not an Admin
/// - The user does not exist
/// - The actor is deleting their own account
/// - The user is the last Admin
pub fn delete_user<S: KeyValueStore>(
    store: &mut Store<S>,
    user_id: &str,
) -> Result<UserInfo, ApiError> {
    let actor: AuthenticatedActor = current_actor(store)?;
    AuthorizationService::authorize_manage_users(&actor)?;

    let target: &User = store
        .find_user(user_id)
        .ok_or_else(|| not_found(EntityKind::User, user_id))?;
    if target.id == actor.id {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("self_delete"),
            message: String::from("You cannot delete your own account"),
        });
    }
    if is_last_admin(target, store.users()) {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("last_admin"),
            message: String::from("The shop must keep at least one Admin"),
        });
    }

    let info: UserInfo = user_info(store, &actor, target);
    store.delete_user(user_id)?;

    info!(user = %info.name, by = %actor.name, "Deleted user");
    Ok(info)
}

// ----------------------------------------------------------------------
// Customers, devices and appointments
// ----------------------------------------------------------------------

/// # Errors
///
/// Returns an error if nobody is signed in or the customer has no name.
pub fn create_customer<S: KeyValueStore>(
    store: &mut Store<S>,
    customer: NewCustomer,
) -> Result<Customer, ApiError> {
    current_actor(store)?;
    Ok(store.add_customer(customer)?)
}

/// # Errors
///
/// Returns an error if nobody is signed in, the customer does not exist or
/// the result is invalid.
pub fn update_customer<S: KeyValueStore>(
    store: &mut Store<S>,
    customer_id: &str,
    patch: CustomerPatch,
) -> Result<Customer, ApiError> {
    current_actor(store)?;
    Ok(store.update_customer(customer_id, patch)?)
}

/// # Errors
///
/// Returns an error if the actor is not an Admin or the customer does not
/// exist.
pub fn delete_customer<S: KeyValueStore>(
    store: &mut Store<S>,
    customer_id: &str,
) -> Result<Customer, ApiError> {
    let actor: AuthenticatedActor = current_actor(store)?;
    AuthorizationService::authorize_delete(&actor, "delete_customer")?;
    Ok(store.delete_customer(customer_id)?)
}

/// Registers a device for an existing customer.
///
/// # Errors
///
/// Returns an error if nobody is signed in or the customer does not exist.
pub fn create_device<S: KeyValueStore>(
    store: &mut Store<S>,
    device: NewDevice,
) -> Result<Device, ApiError> {
    current_actor(store)?;
    require_reference(
        store.find_customer(&device.customer_id).is_some(),
        EntityKind::Customer,
        &device.customer_id,
    )?;
    Ok(store.add_device(device)?)
}

/// # Errors
///
/// Returns an error if nobody is signed in, the device does not exist or
/// the result is invalid.
pub fn update_device<S: KeyValueStore>(
    store: &mut Store<S>,
    device_id: &str,
    patch: DevicePatch,
) -> Result<Device, ApiError> {
    current_actor(store)?;
    Ok(store.update_device(device_id, patch)?)
}

/// # Errors
///
/// Returns an error if the actor is not an Admin or the device does not
/// exist.
pub fn delete_device<S: KeyValueStore>(
    store: &mut Store<S>,
    device_id: &str,
) -> Result<Device, ApiError> {
    let actor: AuthenticatedActor = current_actor(store)?;
    AuthorizationService::authorize_delete(&actor, "delete_device")?;
    Ok(store.delete_device(device_id)?)
}

/// Books an appointment for an existing customer.
///
/// # Errors
///
/// Returns an error if nobody is signed in or a referenced customer or
/// ticket does not exist.
pub fn create_appointment<S: KeyValueStore>(
    store: &mut Store<S>,
    appointment: NewAppointment,
) -> Result<Appointment, ApiError> {
    current_actor(store)?;
    require_reference(
        store.find_customer(&appointment.customer_id).is_some(),
        EntityKind::Customer,
        &appointment.customer_id,
    )?;
    if let Some(ticket_id) = appointment.ticket_id.as_deref() {
        require_reference(
            store.find_ticket(ticket_id).is_some(),
            EntityKind::Ticket,
            ticket_id,
        )?;
    }
    Ok(store.add_appointment(appointment)?)
}

/// # Errors
///
/// Returns an error if nobody is signed in, the appointment does not exist
/// or the result is invalid.
pub fn update_appointment<S: KeyValueStore>(
    store: &mut Store<S>,
    appointment_id: &str,
    patch: AppointmentPatch,
) -> Result<Appointment, ApiError> {
    current_actor(store)?;
    Ok(store.update_appointment(appointment_id, patch)?)
}

/// # Errors
///
/// Returns an error if the actor is not an Admin or the appointment does
/// not exist.
pub fn delete_appointment<S: KeyValueStore>(
    store: &mut Store<S>,
    appointment_id: &str,
) -> Result<Appointment, ApiError> {
    let actor: AuthenticatedActor = current_actor(store)?;
    AuthorizationService::authorize_delete(&actor, "delete_appointment")?;
    Ok(store.delete_appointment(appointment_id)?)
}

// ----------------------------------------------------------------------
// Tickets
// ----------------------------------------------------------------------

/// Checks in a ticket for an existing customer and device.
///
/// # Errors
///
/// Returns an error if nobody is signed in or the customer or device does
/// not exist.
pub fn create_ticket<S: KeyValueStore>(
    store: &mut Store<S>,
    ticket: NewTicket,
) -> Result<Ticket, ApiError> {
    let actor: AuthenticatedActor = current_actor(store)?;
    require_reference(
        store.find_customer(&ticket.customer_id).is_some(),
        EntityKind::Customer,
        &ticket.customer_id,
    )?;
    require_reference(
        store.find_device(&ticket.device_id).is_some(),
        EntityKind::Device,
        &ticket.device_id,
    )?;

    let ticket: Ticket = store.add_ticket(ticket)?;
    info!(ticket_number = ticket.ticket_number, by = %actor.name, "Ticket checked in");
    Ok(ticket)
}

/// # Errors
///
/// Returns an error if nobody is signed in, the ticket does not exist or
/// the result is invalid.
pub fn update_ticket<S: KeyValueStore>(
    store: &mut Store<S>,
    ticket_id: &str,
    patch: TicketPatch,
) -> Result<Ticket, ApiError> {
    current_actor(store)?;
    Ok(store.update_ticket(ticket_id, patch)?)
}

/// Moves a ticket to a new status, logging the change.
///
/// # Errors
///
/// Returns an error if nobody is signed in or the ticket does not exist.
pub fn change_ticket_status<S: KeyValueStore>(
    store: &mut Store<S>,
    request: &ChangeTicketStatusRequest,
) -> Result<Ticket, ApiError> {
    current_actor(store)?;
    Ok(store.change_ticket_status(
        &request.ticket_id,
        request.status,
        &request.message,
        LogVisibility::from_internal_flag(request.internal),
    )?)
}

/// Moves a ticket one step along the repair workflow, logging the change.
///
/// # Errors
///
/// Returns an error if nobody is signed in, the ticket does not exist, or
/// it has already been picked up.
pub fn advance_ticket<S: KeyValueStore>(
    store: &mut Store<S>,
    ticket_id: &str,
    message: &str,
    internal: bool,
) -> Result<Ticket, ApiError> {
    current_actor(store)?;
    let ticket: &Ticket = store
        .find_ticket(ticket_id)
        .ok_or_else(|| not_found(EntityKind::Ticket, ticket_id))?;
    let status: TicketStatus = ticket
        .status
        .next()
        .ok_or_else(|| ApiError::DomainRuleViolation {
            rule: String::from("ticket_workflow"),
            message: format!("Ticket #{} is already {}", ticket.ticket_number, ticket.status),
        })?;

    change_ticket_status(
        store,
        &ChangeTicketStatusRequest {
            ticket_id: ticket_id.to_string(),
            status,
            message: message.to_string(),
            internal,
        },
    )
}

/// # Errors
///
/// Returns an error if the actor is not an Admin or the ticket does not
/// exist.
pub fn delete_ticket<S: KeyValueStore>(
    store: &mut Store<S>,
    ticket_id: &str,
) -> Result<Ticket, ApiError> {
    let actor: AuthenticatedActor = current_actor(store)?;
    AuthorizationService::authorize_delete(&actor, "delete_ticket")?;
    Ok(store.delete_ticket(ticket_id)?)
}

// ----------------------------------------------------------------------
// Invoices
// ----------------------------------------------------------------------

/// Validates billing input and computes totals that are safe to store.
fn billing_totals(
    items: &[LineItem],
    tax_enabled: bool,
    discount: f64,
) -> Result<InvoiceTotals, ApiError> {
    validate_line_items(items).map_err(translate_domain_error)?;
    validate_amount("discount", discount).map_err(translate_domain_error)?;

    let totals: InvoiceTotals = compute_totals(items, tax_enabled, DEFAULT_TAX_RATE, discount);
    validate_invoice_totals(&totals).map_err(translate_domain_error)?;
    Ok(totals)
}

/// Raises an invoice for a ticket, computing its totals from the items.
///
/// # Errors
///
/// Returns an error if:
/// - Nobody is signed in
/// - The ticket does not exist
/// - A line item or the discount is invalid
/// - The computed totals are too large to represent
pub fn create_invoice<S: KeyValueStore>(
    store: &mut Store<S>,
    request: CreateInvoiceRequest,
) -> Result<Invoice, ApiError> {
    current_actor(store)?;
    let ticket: &Ticket = store
        .find_ticket(&request.ticket_id)
        .ok_or_else(|| not_found(EntityKind::Ticket, &request.ticket_id))?;
    let customer_id: String = request
        .customer_id
        .unwrap_or_else(|| ticket.customer_id.clone());
    let totals: InvoiceTotals =
        billing_totals(&request.items, request.tax_enabled, request.discount)?;
    let invoice: NewInvoice = NewInvoice {
        ticket_id: request.ticket_id,
        customer_id,
        items: request.items,
        is_tax_enabled: Some(request.tax_enabled),
        status: request.status.unwrap_or_default(),
        ..NewInvoice::default()
    }
    .with_totals(totals);

    let invoice: Invoice = store.add_invoice(invoice)?;
    info!(invoice = %invoice.id, total = invoice.total, "Invoice created");
    Ok(invoice)
}

/// Changes an invoice's items, tax or discount and recomputes its totals.
///
/// When no status is given and money has already been collected, the
/// status is derived from the new total.
///
/// # Errors
///
/// Returns an error if nobody is signed in, the invoice does not exist, or
/// a line item or the discount is invalid.
pub fn update_invoice<S: KeyValueStore>(
    store: &mut Store<S>,
    invoice_id: &str,
    request: UpdateInvoiceRequest,
) -> Result<Invoice, ApiError> {
    current_actor(store)?;
    let existing: &Invoice = store
        .find_invoice(invoice_id)
        .ok_or_else(|| not_found(EntityKind::Invoice, invoice_id))?;

    let items: Vec<LineItem> = request.items.unwrap_or_else(|| existing.items.clone());
    let tax_enabled: bool = request.tax_enabled.unwrap_or_else(|| existing.tax_enabled());
    let discount: f64 = request.discount.unwrap_or(existing.discount);
    let totals: InvoiceTotals = billing_totals(&items, tax_enabled, discount)?;
    let status: Option<InvoiceStatus> = request.status.or_else(|| {
        (existing.amount_paid > 0.0).then(|| payment_status(totals.total, existing.amount_paid))
    });

    Ok(store.update_invoice(
        invoice_id,
        InvoicePatch {
            items: Some(items),
            subtotal: Some(totals.subtotal),
            tax: Some(totals.tax),
            is_tax_enabled: Some(Some(tax_enabled)),
            discount: Some(totals.discount),
            total: Some(totals.total),
            status,
            ..InvoicePatch::default()
        },
    )?)
}

/// Records money received against an invoice and updates its status.
///
/// # Errors
///
/// Returns an error if nobody is signed in, the invoice does not exist, or
/// the amount is not a positive number, or the running total paid
/// overflows.
pub fn record_payment<S: KeyValueStore>(
    store: &mut Store<S>,
    request: &RecordPaymentRequest,
) -> Result<Invoice, ApiError> {
    let actor: AuthenticatedActor = current_actor(store)?;
    if !request.amount.is_finite() || request.amount <= 0.0 {
        return Err(ApiError::InvalidInput {
            field: String::from("amount"),
            message: format!("Payment must be a positive amount, got {}", request.amount),
        });
    }

    let existing: &Invoice = store
        .find_invoice(&request.invoice_id)
        .ok_or_else(|| not_found(EntityKind::Invoice, &request.invoice_id))?;
    let amount_paid: f64 = round_to_cents(existing.amount_paid + request.amount);
    validate_amount("amountPaid", amount_paid).map_err(translate_domain_error)?;
    let status: InvoiceStatus = payment_status(existing.total, amount_paid);

    let invoice: Invoice = store.update_invoice(
        &request.invoice_id,
        InvoicePatch {
            amount_paid: Some(amount_paid),
            status: Some(status),
            ..InvoicePatch::default()
        },
    )?;

    info!(
        invoice = %invoice.id,
        amount = request.amount,
        status = %invoice.status,
        by = %actor.name,
        "Payment recorded"
    );
    Ok(invoice)
}

/// # Errors
///
/// Returns an error if the actor is not an Admin or the invoice does not
/// exist.
pub fn delete_invoice<S: KeyValueStore>(
    store: &mut Store<S>,
    invoice_id: &str,
) -> Result<Invoice, ApiError> {
    let actor: AuthenticatedActor = current_actor(store)?;
    AuthorizationService::authorize_delete(&actor, "delete_invoice")?;
    Ok(store.delete_invoice(invoice_id)?)
}

// ----------------------------------------------------------------------
// Import / export
// ----------------------------------------------------------------------

/// Replaces all shop data with an exported document.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin or the document cannot be
/// parsed. A rejected document changes nothing.
pub fn import_data<S: KeyValueStore>(
    store: &mut Store<S>,
    json: &str,
) -> Result<ImportResponse, ApiError> {
    let actor: AuthenticatedActor = current_actor(store)?;
    AuthorizationService::authorize_import(&actor)?;

    let snapshot: &Snapshot = store.import(json)?;
    Ok(ImportResponse {
        customers: snapshot.customers.len(),
        devices: snapshot.devices.len(),
        tickets: snapshot.tickets.len(),
        invoices: snapshot.invoices.len(),
        appointments: snapshot.appointments.len(),
        users: snapshot.users.len(),
    })
}

/// Exports all shop data as indented JSON.
///
/// # Errors
///
/// Returns an error if nobody is signed in.
pub fn export_data<S: KeyValueStore>(store: &Store<S>) -> Result<String, ApiError> {
    current_actor(store)?;
    Ok(store.export()?)
}
