// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Command-line arguments.

use clap::{Args as ClapArgs, Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use cmx_domain::{DeviceType, InvoiceStatus, LineItem, Priority, Role, TicketStatus};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

use crate::line_item::parse_line_item;

/// CMX Repair Desk - customers, tickets and invoices for a repair shop
#[derive(Debug, Parser)]
#[command(name = "cmx", author, version, about, long_about = None)]
pub struct Args {
    /// Path to the `SQLite` database file.
    #[arg(long, env = "CMX_DATABASE", default_value = "cmx.db", global = true)]
    pub database: PathBuf,

    /// Use a throwaway in-memory database instead of a file.
    #[arg(long, global = true)]
    pub in_memory: bool,

    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Sign in as a staff member
    Login {
        email: String,
        #[arg(long, default_value = "")]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Manage customers
    #[command(subcommand)]
    Customer(CustomerCommand),
    /// Manage devices
    #[command(subcommand)]
    Device(DeviceCommand),
    /// Manage repair tickets
    #[command(subcommand)]
    Ticket(TicketCommand),
    /// Manage invoices and payments
    #[command(subcommand)]
    Invoice(InvoiceCommand),
    /// Manage appointments
    #[command(subcommand)]
    Appointment(AppointmentCommand),
    /// Manage staff accounts
    #[command(subcommand)]
    User(UserCommand),
    /// Replace all data with an exported JSON file
    Import { file: PathBuf },
    /// Write all data as JSON to a file, or stdout when omitted
    Export { file: Option<PathBuf> },
    /// Show shop totals and the day's appointments
    Dashboard {
        /// Day to list appointments for (`YYYY-MM-DD`). Defaults to today.
        #[arg(long)]
        date: Option<String>,
    },
    /// Search customers, tickets and devices
    Search { query: String },
    /// Ask the AI assistant for likely causes of a ticket's problem
    Diagnose {
        /// Ticket id or `#number`
        ticket: String,
    },
}

#[derive(Debug, Clone, ClapArgs, Default)]
pub struct CustomerFields {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
    /// May be repeated.
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    #[arg(long)]
    pub membership_id: Option<String>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CustomerCommand {
    Add(CustomerFields),
    List,
    Show { id: String },
    Update {
        id: String,
        #[command(flatten)]
        fields: CustomerFields,
    },
    Delete { id: String },
}

#[derive(Debug, Clone, ClapArgs, Default)]
pub struct DeviceFields {
    #[arg(long = "type")]
    pub device_type: Option<DeviceType>,
    #[arg(long)]
    pub brand: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long)]
    pub serial: Option<String>,
    #[arg(long)]
    pub os: Option<String>,
    /// Unlock code or password for the device.
    #[arg(long)]
    pub password: Option<String>,
    #[arg(long)]
    pub accessories: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum DeviceCommand {
    Add {
        #[arg(long)]
        customer: String,
        #[command(flatten)]
        fields: DeviceFields,
    },
    List {
        /// Only devices owned by this customer.
        #[arg(long)]
        customer: Option<String>,
    },
    Show { id: String },
    Update {
        id: String,
        #[command(flatten)]
        fields: DeviceFields,
    },
    Delete { id: String },
}

#[derive(Debug, Clone, Subcommand)]
pub enum TicketCommand {
    /// Check a device in for repair
    Add {
        #[arg(long)]
        customer: String,
        #[arg(long)]
        device: String,
        #[arg(long)]
        problem: String,
        #[arg(long, default_value = "Medium")]
        priority: Priority,
        #[arg(long)]
        technician: Option<String>,
        #[arg(long, default_value = "")]
        internal_notes: String,
        #[arg(long, default_value = "")]
        customer_notes: String,
    },
    List {
        #[arg(long)]
        status: Option<TicketStatus>,
        #[arg(long)]
        customer: Option<String>,
        /// Only tickets that are not completed or picked up.
        #[arg(long)]
        open: bool,
    },
    /// Show a ticket by id or `#number`
    Show { ticket: String },
    Update {
        ticket: String,
        #[arg(long)]
        problem: Option<String>,
        #[arg(long)]
        priority: Option<Priority>,
        #[arg(long, conflicts_with = "unassign")]
        technician: Option<String>,
        #[arg(long)]
        unassign: bool,
        #[arg(long)]
        internal_notes: Option<String>,
        #[arg(long)]
        customer_notes: Option<String>,
    },
    /// Move a ticket to a new status
    Status {
        ticket: String,
        status: TicketStatus,
        #[arg(long, short, default_value = "")]
        message: String,
        /// Hide the log entry from the customer.
        #[arg(long)]
        internal: bool,
    },
    /// Move a ticket to the next step of the repair workflow
    Advance {
        ticket: String,
        #[arg(long, short, default_value = "")]
        message: String,
        /// Hide the log entry from the customer.
        #[arg(long)]
        internal: bool,
    },
    Delete { ticket: String },
}

#[derive(Debug, Clone, Subcommand)]
pub enum InvoiceCommand {
    /// Raise an invoice for a ticket
    Add {
        #[arg(long)]
        ticket: String,
        /// Bill a customer other than the ticket's.
        #[arg(long)]
        customer: Option<String>,
        /// `KIND:QTY:PRICE:TAX:DESCRIPTION`, where TAX is `taxable` or
        /// `exempt`. May be repeated.
        #[arg(long = "item", value_parser = parse_line_item)]
        items: Vec<LineItem>,
        #[arg(long)]
        no_tax: bool,
        #[arg(long, default_value_t = 0.0)]
        discount: f64,
        #[arg(long)]
        status: Option<InvoiceStatus>,
    },
    List {
        #[arg(long)]
        ticket: Option<String>,
        #[arg(long)]
        status: Option<InvoiceStatus>,
    },
    Show { id: String },
    /// Replace items, tax or discount and recompute totals
    Update {
        id: String,
        /// Replaces every item when given. May be repeated.
        #[arg(long = "item", value_parser = parse_line_item)]
        items: Vec<LineItem>,
        #[arg(long)]
        tax: Option<bool>,
        #[arg(long)]
        discount: Option<f64>,
        #[arg(long)]
        status: Option<InvoiceStatus>,
    },
    /// Record money received
    Pay { id: String, amount: f64 },
    Delete { id: String },
}

#[derive(Debug, Clone, ClapArgs, Default)]
pub struct AppointmentFields {
    #[arg(long)]
    pub title: Option<String>,
    /// `YYYY-MM-DD`
    #[arg(long)]
    pub date: Option<String>,
    /// `HH:MM`
    #[arg(long)]
    pub time: Option<String>,
    #[arg(long)]
    pub ticket: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum AppointmentCommand {
    Add {
        #[arg(long)]
        customer: String,
        #[command(flatten)]
        fields: AppointmentFields,
    },
    List {
        #[arg(long)]
        date: Option<String>,
    },
    Show { id: String },
    Update {
        id: String,
        #[command(flatten)]
        fields: AppointmentFields,
    },
    Delete { id: String },
}

#[derive(Debug, Clone, Subcommand)]
pub enum UserCommand {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        role: Role,
        #[arg(long)]
        password: Option<String>,
    },
    List,
    Show { id: String },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        role: Option<Role>,
        #[arg(long, conflicts_with = "clear_password")]
        password: Option<String>,
        #[arg(long)]
        clear_password: bool,
    },
    Delete { id: String },
}
