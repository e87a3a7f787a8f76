// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Command dispatch.
//!
//! Each command yields the text to print on stdout, normally pretty JSON.

use cmx::{AppointmentPatch, CustomerPatch, DevicePatch, KeyValueStore, Store, TicketPatch};
use cmx_api::{
    ApiError, ChangeTicketStatusRequest, CreateInvoiceRequest, CreateUserRequest, ImportResponse,
    LoginRequest, RecordPaymentRequest, UpdateInvoiceRequest, UpdateUserRequest, UserInfo,
};
use cmx_assist::DiagnosticClient;
use cmx_domain::{
    Appointment, Device, EntityKind, Invoice, NewAppointment, NewCustomer, NewDevice, NewTicket,
    Ticket,
};
use color_eyre::Result;
use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::cli::{
    AppointmentCommand, AppointmentFields, Command, CustomerCommand, CustomerFields,
    DeviceCommand, DeviceFields, InvoiceCommand, TicketCommand, UserCommand,
};

fn render<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn not_found(kind: EntityKind, id: &str) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: kind.to_string(),
        message: format!("No {} with id '{id}'", kind.as_str().to_lowercase()),
    }
}

fn found<'a, T>(
    record: Option<&'a T>,
    kind: EntityKind,
    id: &str,
) -> Result<&'a T, ApiError> {
    record.ok_or_else(|| not_found(kind, id))
}

/// Looks a ticket up by id, or by number when written as `#1001` or `1001`.
pub fn resolve_ticket<'a, S: KeyValueStore>(
    store: &'a Store<S>,
    reference: &str,
) -> Result<&'a Ticket, ApiError> {
    let reference: &str = reference.trim();
    let by_number: Option<&Ticket> = reference
        .strip_prefix('#')
        .unwrap_or(reference)
        .parse::<u32>()
        .ok()
        .and_then(|number| store.find_ticket_by_number(number));

    by_number
        .or_else(|| store.find_ticket(reference))
        .ok_or_else(|| not_found(EntityKind::Ticket, reference))
}

/// What a command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text to print as is.
    Text(String),
    /// A ticket to send to the assistant.
    Diagnose(DiagnosisRequest),
}

/// Runs a command against the store.
///
/// `today` is the default dashboard date. `diagnose` only gathers the
/// ticket details; the caller makes the network call.
///
/// # Errors
///
/// Returns the first error raised by the command.
pub fn run<S: KeyValueStore>(
    store: &mut Store<S>,
    command: Command,
    today: &str,
) -> Result<Outcome> {
    let text: String = match command {
        Command::Login { email, password } => {
            render(&cmx_api::login(store, &LoginRequest { email, password })?)?
        }
        Command::Logout => {
            cmx_api::logout(store)?;
            render(&json!({ "signedOut": true }))?
        }
        Command::Whoami => render(&cmx_api::whoami(store)?)?,
        Command::Customer(command) => run_customer(store, command)?,
        Command::Device(command) => run_device(store, command)?,
        Command::Ticket(command) => run_ticket(store, command)?,
        Command::Invoice(command) => run_invoice(store, command)?,
        Command::Appointment(command) => run_appointment(store, command)?,
        Command::User(command) => run_user(store, command)?,
        Command::Import { file } => {
            let json: String = std::fs::read_to_string(&file)?;
            let counts: ImportResponse = cmx_api::import_data(store, &json)?;
            info!(file = %file.display(), "Imported data");
            render(&counts)?
        }
        Command::Export { file } => {
            let json: String = cmx_api::export_data(store)?;
            match file {
                Some(path) => {
                    std::fs::write(&path, &json)?;
                    info!(file = %path.display(), "Exported data");
                    render(&json!({ "exported": path.display().to_string() }))?
                }
                None => json,
            }
        }
        Command::Dashboard { date } => {
            render(&cmx_api::dashboard(store, date.as_deref().unwrap_or(today))?)?
        }
        Command::Search { query } => render(&cmx_api::quick_search(store, &query)?)?,
        Command::Diagnose { ticket } => {
            return Ok(Outcome::Diagnose(diagnosis_request(store, &ticket)?));
        }
    };
    Ok(Outcome::Text(text))
}

fn run_customer<S: KeyValueStore>(
    store: &mut Store<S>,
    command: CustomerCommand,
) -> Result<String> {
    match command {
        CustomerCommand::Add(fields) => render(&cmx_api::create_customer(
            store,
            NewCustomer {
                first_name: fields.first_name.unwrap_or_default(),
                last_name: fields.last_name.unwrap_or_default(),
                email: fields.email.unwrap_or_default(),
                phone: fields.phone.unwrap_or_default(),
                address: fields.address.unwrap_or_default(),
                notes: fields.notes.unwrap_or_default(),
                tags: fields.tags,
                membership_id: fields.membership_id,
            },
        )?),
        CustomerCommand::List => {
            cmx_api::current_actor(store)?;
            render(&store.customers())
        }
        CustomerCommand::Show { id } => {
            cmx_api::current_actor(store)?;
            render(found(store.find_customer(&id), EntityKind::Customer, &id)?)
        }
        CustomerCommand::Update { id, fields } => {
            render(&cmx_api::update_customer(store, &id, customer_patch(fields))?)
        }
        CustomerCommand::Delete { id } => render(&cmx_api::delete_customer(store, &id)?),
    }
}

fn customer_patch(fields: CustomerFields) -> CustomerPatch {
    CustomerPatch {
        first_name: fields.first_name,
        last_name: fields.last_name,
        email: fields.email,
        phone: fields.phone,
        address: fields.address,
        notes: fields.notes,
        tags: (!fields.tags.is_empty()).then_some(fields.tags),
        membership_id: fields.membership_id.map(Some),
    }
}

fn run_device<S: KeyValueStore>(store: &mut Store<S>, command: DeviceCommand) -> Result<String> {
    match command {
        DeviceCommand::Add { customer, fields } => render(&cmx_api::create_device(
            store,
            NewDevice {
                customer_id: customer,
                device_type: fields.device_type.unwrap_or_default(),
                brand: fields.brand.unwrap_or_default(),
                model: fields.model.unwrap_or_default(),
                serial_number: fields.serial.unwrap_or_default(),
                os: fields.os.unwrap_or_default(),
                password: fields.password,
                accessories: fields.accessories.unwrap_or_default(),
                notes: fields.notes.unwrap_or_default(),
            },
        )?),
        DeviceCommand::List { customer } => {
            cmx_api::current_actor(store)?;
            let devices: Vec<&Device> = store
                .devices()
                .iter()
                .filter(|d| customer.as_deref().is_none_or(|id| d.customer_id == id))
                .collect();
            render(&devices)
        }
        DeviceCommand::Show { id } => {
            cmx_api::current_actor(store)?;
            render(found(store.find_device(&id), EntityKind::Device, &id)?)
        }
        DeviceCommand::Update { id, fields } => {
            render(&cmx_api::update_device(store, &id, device_patch(fields))?)
        }
        DeviceCommand::Delete { id } => render(&cmx_api::delete_device(store, &id)?),
    }
}

fn device_patch(fields: DeviceFields) -> DevicePatch {
    DevicePatch {
        customer_id: None,
        device_type: fields.device_type,
        brand: fields.brand,
        model: fields.model,
        serial_number: fields.serial,
        os: fields.os,
        password: fields.password.map(Some),
        accessories: fields.accessories,
        notes: fields.notes,
    }
}

fn run_ticket<S: KeyValueStore>(store: &mut Store<S>, command: TicketCommand) -> Result<String> {
    match command {
        TicketCommand::Add {
            customer,
            device,
            problem,
            priority,
            technician,
            internal_notes,
            customer_notes,
        } => render(&cmx_api::create_ticket(
            store,
            NewTicket {
                customer_id: customer,
                device_id: device,
                problem_description: problem,
                technician_id: technician,
                priority,
                internal_notes,
                customer_notes,
                ..NewTicket::default()
            },
        )?),
        TicketCommand::List {
            status,
            customer,
            open,
        } => {
            cmx_api::current_actor(store)?;
            let tickets: Vec<&Ticket> = store
                .tickets()
                .iter()
                .filter(|t| status.is_none_or(|s| t.status == s))
                .filter(|t| customer.as_deref().is_none_or(|id| t.customer_id == id))
                .filter(|t| !open || t.status.is_open())
                .collect();
            render(&tickets)
        }
        TicketCommand::Show { ticket } => {
            cmx_api::current_actor(store)?;
            render(resolve_ticket(store, &ticket)?)
        }
        TicketCommand::Update {
            ticket,
            problem,
            priority,
            technician,
            unassign,
            internal_notes,
            customer_notes,
        } => {
            let id: String = resolve_ticket(store, &ticket)?.id.clone();
            let technician_id: Option<Option<String>> = if unassign {
                Some(None)
            } else {
                technician.map(Some)
            };
            render(&cmx_api::update_ticket(
                store,
                &id,
                TicketPatch {
                    problem_description: problem,
                    technician_id,
                    priority,
                    internal_notes,
                    customer_notes,
                    ..TicketPatch::default()
                },
            )?)
        }
        TicketCommand::Status {
            ticket,
            status,
            message,
            internal,
        } => {
            let ticket_id: String = resolve_ticket(store, &ticket)?.id.clone();
            render(&cmx_api::change_ticket_status(
                store,
                &ChangeTicketStatusRequest {
                    ticket_id,
                    status,
                    message,
                    internal,
                },
            )?)
        }
        TicketCommand::Advance {
            ticket,
            message,
            internal,
        } => {
            let id: String = resolve_ticket(store, &ticket)?.id.clone();
            render(&cmx_api::advance_ticket(store, &id, &message, internal)?)
        }
        TicketCommand::Delete { ticket } => {
            let id: String = resolve_ticket(store, &ticket)?.id.clone();
            render(&cmx_api::delete_ticket(store, &id)?)
        }
    }
}

fn run_invoice<S: KeyValueStore>(store: &mut Store<S>, command: InvoiceCommand) -> Result<String> {
    match command {
        InvoiceCommand::Add {
            ticket,
            customer,
            items,
            no_tax,
            discount,
            status,
        } => {
            let ticket_id: String = resolve_ticket(store, &ticket)?.id.clone();
            render(&cmx_api::create_invoice(
                store,
                CreateInvoiceRequest {
                    ticket_id,
                    customer_id: customer,
                    items,
                    tax_enabled: !no_tax,
                    discount,
                    status,
                },
            )?)
        }
        InvoiceCommand::List { ticket, status } => {
            cmx_api::current_actor(store)?;
            let ticket_id: Option<String> = match ticket {
                Some(reference) => Some(resolve_ticket(store, &reference)?.id.clone()),
                None => None,
            };
            let invoices: Vec<&Invoice> = store
                .invoices()
                .iter()
                .filter(|i| ticket_id.as_deref().is_none_or(|id| i.ticket_id == id))
                .filter(|i| status.is_none_or(|s| i.status == s))
                .collect();
            render(&invoices)
        }
        InvoiceCommand::Show { id } => {
            cmx_api::current_actor(store)?;
            render(found(store.find_invoice(&id), EntityKind::Invoice, &id)?)
        }
        InvoiceCommand::Update {
            id,
            items,
            tax,
            discount,
            status,
        } => render(&cmx_api::update_invoice(
            store,
            &id,
            UpdateInvoiceRequest {
                items: (!items.is_empty()).then_some(items),
                tax_enabled: tax,
                discount,
                status,
            },
        )?),
        InvoiceCommand::Pay { id, amount } => render(&cmx_api::record_payment(
            store,
            &RecordPaymentRequest {
                invoice_id: id,
                amount,
            },
        )?),
        InvoiceCommand::Delete { id } => render(&cmx_api::delete_invoice(store, &id)?),
    }
}

fn run_appointment<S: KeyValueStore>(
    store: &mut Store<S>,
    command: AppointmentCommand,
) -> Result<String> {
    match command {
        AppointmentCommand::Add { customer, fields } => render(&cmx_api::create_appointment(
            store,
            NewAppointment {
                customer_id: customer,
                ticket_id: fields.ticket,
                title: fields.title.unwrap_or_default(),
                date: fields.date.unwrap_or_default(),
                time: fields.time.unwrap_or_default(),
                notes: fields.notes.unwrap_or_default(),
            },
        )?),
        AppointmentCommand::List { date } => {
            cmx_api::current_actor(store)?;
            let mut appointments: Vec<&Appointment> = store
                .appointments()
                .iter()
                .filter(|a| date.as_deref().is_none_or(|d| a.date == d))
                .collect();
            appointments.sort_by(|a, b| (&a.date, &a.time).cmp(&(&b.date, &b.time)));
            render(&appointments)
        }
        AppointmentCommand::Show { id } => {
            cmx_api::current_actor(store)?;
            render(found(
                store.find_appointment(&id),
                EntityKind::Appointment,
                &id,
            )?)
        }
        AppointmentCommand::Update { id, fields } => {
            render(&cmx_api::update_appointment(store, &id, appointment_patch(fields))?)
        }
        AppointmentCommand::Delete { id } => render(&cmx_api::delete_appointment(store, &id)?),
    }
}

fn appointment_patch(fields: AppointmentFields) -> AppointmentPatch {
    AppointmentPatch {
        customer_id: None,
        ticket_id: fields.ticket.map(Some),
        title: fields.title,
        date: fields.date,
        time: fields.time,
        notes: fields.notes,
    }
}

fn run_user<S: KeyValueStore>(store: &mut Store<S>, command: UserCommand) -> Result<String> {
    match command {
        UserCommand::Add {
            name,
            email,
            role,
            password,
        } => render(&cmx_api::create_user(
            store,
            CreateUserRequest {
                name,
                role,
                email,
                password,
            },
        )?),
        UserCommand::List => render(&cmx_api::list_users(store)?),
        UserCommand::Show { id } => {
            let users: Vec<UserInfo> = cmx_api::list_users(store)?;
            let user: &UserInfo =
                found(users.iter().find(|u| u.id == id), EntityKind::User, &id)?;
            render(user)
        }
        UserCommand::Update {
            id,
            name,
            email,
            role,
            password,
            clear_password,
        } => render(&cmx_api::update_user(
            store,
            &id,
            UpdateUserRequest {
                name,
                role,
                email,
                password: if clear_password {
                    Some(None)
                } else {
                    password.map(Some)
                },
            },
        )?),
        UserCommand::Delete { id } => render(&cmx_api::delete_user(store, &id)?),
    }
}

/// The problem to send to the assistant, taken from a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisRequest {
    pub ticket_id: String,
    pub ticket_number: u32,
    pub device_type: String,
    pub description: String,
}

/// Collects what the assistant needs to know about a ticket.
///
/// # Errors
///
/// Returns an error if nobody is signed in or the ticket does not exist.
pub fn diagnosis_request<S: KeyValueStore>(
    store: &Store<S>,
    reference: &str,
) -> Result<DiagnosisRequest, ApiError> {
    cmx_api::current_actor(store)?;
    let ticket: &Ticket = resolve_ticket(store, reference)?;
    let device_type: String = store
        .find_device(&ticket.device_id)
        .map_or_else(|| String::from("device"), |d| d.device_type.to_string());

    Ok(DiagnosisRequest {
        ticket_id: ticket.id.clone(),
        ticket_number: ticket.ticket_number,
        device_type,
        description: ticket.problem_description.clone(),
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Diagnosis {
    #[serde(flatten)]
    request: DiagnosisRequest,
    suggestion: String,
}

/// Asks the assistant about a ticket's problem.
///
/// # Errors
///
/// Returns an error only if the result cannot be rendered.
pub async fn diagnose(client: &DiagnosticClient, request: DiagnosisRequest) -> Result<String> {
    let suggestion: String = client
        .suggest(&request.description, &request.device_type)
        .await;
    render(&Diagnosis {
        request,
        suggestion,
    })
}
