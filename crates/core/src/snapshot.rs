// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use cmx_domain::{
    Appointment, Customer, Device, DomainError, Entity, Invoice, Ticket, User,
    validate_customer_name, validate_invoice_amounts, validate_line_items, validate_reference,
    validate_user_fields,
};
use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

/// Every persisted collection, stored as a single JSON document.
///
/// Missing or `null` arrays load as empty, so partial exports and blobs
/// written by older versions still open.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub customers: Vec<Customer>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub devices: Vec<Device>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tickets: Vec<Ticket>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub invoices: Vec<Invoice>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub appointments: Vec<Appointment>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub users: Vec<User>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Snapshot {
    /// Parses a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns the parser error if `json` is not a snapshot document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes to compact JSON, the form written to storage.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes to indented JSON, the form used for exports.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Returns the total number of records across every collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.customers.len()
            + self.devices.len()
            + self.tickets.len()
            + self.invoices.len()
            + self.appointments.len()
            + self.users.len()
    }

    /// Returns whether every collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A record kept in one of the snapshot's collections.
///
/// Lets the store add, update and delete every entity family with one set
/// of generic routines.
pub trait Record: Entity + Clone {
    /// The collection holding records of this type.
    fn records(snapshot: &Snapshot) -> &[Self];

    /// The mutable collection holding records of this type.
    fn records_mut(snapshot: &mut Snapshot) -> &mut Vec<Self>;

    /// Checks the fields the store refuses to persist blank or malformed.
    ///
    /// # Errors
    ///
    /// Returns the first domain rule the record breaks.
    fn validate(&self) -> Result<(), DomainError> {
        Ok(())
    }

    /// Stamps modification time after an update.
    fn touch(&mut self, _now: OffsetDateTime) {}
}

impl Record for Customer {
    fn records(snapshot: &Snapshot) -> &[Self] {
        &snapshot.customers
    }

    fn records_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.customers
    }

    fn validate(&self) -> Result<(), DomainError> {
        validate_customer_name(&self.first_name, &self.last_name)
    }
}

impl Record for Device {
    fn records(snapshot: &Snapshot) -> &[Self] {
        &snapshot.devices
    }

    fn records_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.devices
    }

    fn validate(&self) -> Result<(), DomainError> {
        validate_reference("customerId", &self.customer_id)
    }
}

impl Record for Ticket {
    fn records(snapshot: &Snapshot) -> &[Self] {
        &snapshot.tickets
    }

    fn records_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.tickets
    }

    fn validate(&self) -> Result<(), DomainError> {
        validate_reference("customerId", &self.customer_id)?;
        validate_reference("deviceId", &self.device_id)
    }

    fn touch(&mut self, now: OffsetDateTime) {
        // updatedAt never moves backwards, even if the clock does.
        self.updated_at = self.updated_at.max(now);
    }
}

impl Record for Invoice {
    fn records(snapshot: &Snapshot) -> &[Self] {
        &snapshot.invoices
    }

    fn records_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.invoices
    }

    fn validate(&self) -> Result<(), DomainError> {
        validate_reference("ticketId", &self.ticket_id)?;
        validate_reference("customerId", &self.customer_id)?;
        validate_line_items(&self.items)?;
        validate_invoice_amounts(self)
    }
}

impl Record for Appointment {
    fn records(snapshot: &Snapshot) -> &[Self] {
        &snapshot.appointments
    }

    fn records_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.appointments
    }

    fn validate(&self) -> Result<(), DomainError> {
        validate_reference("customerId", &self.customer_id)
    }
}

impl Record for User {
    fn records(snapshot: &Snapshot) -> &[Self] {
        &snapshot.users
    }

    fn records_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.users
    }

    fn validate(&self) -> Result<(), DomainError> {
        validate_user_fields(&self.name, &self.email)
    }
}
