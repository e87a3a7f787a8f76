// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Partial updates.
//!
//! Every field of a patch is optional; `None` leaves the stored value alone.
//! Fields that are themselves optional on the record use `Option<Option<T>>`
//! so a patch can distinguish "leave as is" from "clear".
//!
//! Identity and creation time are not patchable. Ticket status is changed
//! only through [`crate::Store::change_ticket_status`] so that every
//! transition is logged.

use cmx_domain::{
    Appointment, Customer, Device, DeviceType, Invoice, InvoiceStatus, LineItem, Priority, Role,
    Ticket, User,
};

/// A partial update for a record of type `T`.
pub trait Patch<T> {
    /// Writes the present fields over `target`.
    fn apply(self, target: &mut T);

    /// Returns whether the patch carries no fields.
    fn is_empty(&self) -> bool;
}

fn set<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

/// Changes to a customer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
    pub membership_id: Option<Option<String>>,
}

impl Patch<Customer> for CustomerPatch {
    fn apply(self, target: &mut Customer) {
        set(&mut target.first_name, self.first_name);
        set(&mut target.last_name, self.last_name);
        set(&mut target.email, self.email);
        set(&mut target.phone, self.phone);
        set(&mut target.address, self.address);
        set(&mut target.notes, self.notes);
        set(&mut target.tags, self.tags);
        set(&mut target.membership_id, self.membership_id);
    }

    fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Changes to a device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DevicePatch {
    pub customer_id: Option<String>,
    pub device_type: Option<DeviceType>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub os: Option<String>,
    pub password: Option<Option<String>>,
    pub accessories: Option<String>,
    pub notes: Option<String>,
}

impl Patch<Device> for DevicePatch {
    fn apply(self, target: &mut Device) {
        set(&mut target.customer_id, self.customer_id);
        set(&mut target.device_type, self.device_type);
        set(&mut target.brand, self.brand);
        set(&mut target.model, self.model);
        set(&mut target.serial_number, self.serial_number);
        set(&mut target.os, self.os);
        set(&mut target.password, self.password);
        set(&mut target.accessories, self.accessories);
        set(&mut target.notes, self.notes);
    }

    fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Changes to a ticket's details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketPatch {
    pub customer_id: Option<String>,
    pub device_id: Option<String>,
    pub problem_description: Option<String>,
    pub technician_id: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub internal_notes: Option<String>,
    pub customer_notes: Option<String>,
}

impl Patch<Ticket> for TicketPatch {
    fn apply(self, target: &mut Ticket) {
        set(&mut target.customer_id, self.customer_id);
        set(&mut target.device_id, self.device_id);
        set(&mut target.problem_description, self.problem_description);
        set(&mut target.technician_id, self.technician_id);
        set(&mut target.priority, self.priority);
        set(&mut target.internal_notes, self.internal_notes);
        set(&mut target.customer_notes, self.customer_notes);
    }

    fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Changes to an invoice.
///
/// Money fields are stored as given. Recompute them with
/// [`cmx_domain::compute_totals`] when `items` change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvoicePatch {
    pub ticket_id: Option<String>,
    pub customer_id: Option<String>,
    pub items: Option<Vec<LineItem>>,
    pub subtotal: Option<f64>,
    pub tax: Option<f64>,
    pub is_tax_enabled: Option<Option<bool>>,
    pub discount: Option<f64>,
    pub total: Option<f64>,
    pub status: Option<InvoiceStatus>,
    pub amount_paid: Option<f64>,
}

impl Patch<Invoice> for InvoicePatch {
    fn apply(self, target: &mut Invoice) {
        set(&mut target.ticket_id, self.ticket_id);
        set(&mut target.customer_id, self.customer_id);
        set(&mut target.items, self.items);
        set(&mut target.subtotal, self.subtotal);
        set(&mut target.tax, self.tax);
        set(&mut target.is_tax_enabled, self.is_tax_enabled);
        set(&mut target.discount, self.discount);
        set(&mut target.total, self.total);
        set(&mut target.status, self.status);
        set(&mut target.amount_paid, self.amount_paid);
    }

    fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Changes to an appointment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentPatch {
    pub customer_id: Option<String>,
    pub ticket_id: Option<Option<String>>,
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub notes: Option<String>,
}

impl Patch<Appointment> for AppointmentPatch {
    fn apply(self, target: &mut Appointment) {
        set(&mut target.customer_id, self.customer_id);
        set(&mut target.ticket_id, self.ticket_id);
        set(&mut target.title, self.title);
        set(&mut target.date, self.date);
        set(&mut target.time, self.time);
        set(&mut target.notes, self.notes);
    }

    fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Changes to a staff account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub role: Option<Role>,
    pub email: Option<String>,
    pub password: Option<Option<String>>,
}

impl Patch<User> for UserPatch {
    fn apply(self, target: &mut User) {
        set(&mut target.name, self.name);
        set(&mut target.role, self.role);
        set(&mut target.email, self.email);
        set(&mut target.password, self.password);
    }

    fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
