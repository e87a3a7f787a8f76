// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::ids::{LINE_ITEM_ID_PREFIX, LOG_ID_PREFIX, new_id};
use crate::patch::{
    AppointmentPatch, CustomerPatch, DevicePatch, InvoicePatch, Patch, TicketPatch, UserPatch,
};
use crate::snapshot::{Record, Snapshot};
use crate::storage::{DATA_KEY, KeyValueStore, SESSION_KEY};
use cmx_audit::{Actor, LogVisibility, TicketLog};
use cmx_domain::{
    Appointment, Customer, Device, Entity, EntityKind, Invoice, LineItem, NewAppointment,
    NewCustomer, NewDevice, NewInvoice, NewTicket, NewUser, Role, Ticket, TicketStatus, User,
    next_ticket_number,
};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

/// Id of the administrator seeded into an empty store.
pub const SEED_ADMIN_ID: &str = "u1";

/// Message of the log entry every new ticket starts with.
pub const CHECK_IN_MESSAGE: &str = "Checked In";

/// Returns the account created when a store opens with no users.
///
/// The password is a well-known default and must be changed after first
/// sign-in.
#[must_use]
pub fn seed_admin() -> User {
    User {
        id: String::from(SEED_ADMIN_ID),
        name: String::from("Shop Owner"),
        role: Role::Admin,
        email: String::from("admin@cmx.com"),
        password: Some(String::from("1234")),
    }
}

fn now() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

/// The in-memory state of the shop and the gateway for every change to it.
///
/// Every mutating call writes the full snapshot to the backing
/// [`KeyValueStore`] before returning. The session pointer is stored under a
/// separate key and is written only when the session changes.
///
/// If a write fails the in-memory change is kept and the error is returned;
/// the next successful write persists it.
#[derive(Debug)]
pub struct Store<S: KeyValueStore> {
    storage: S,
    snapshot: Snapshot,
    session: Option<String>,
}

impl<S: KeyValueStore> Store<S> {
    /// Loads the store from `storage`.
    ///
    /// A missing or unreadable snapshot is treated as an empty shop. If no
    /// users exist afterwards the default administrator is seeded and
    /// persisted. A saved session is restored when it names an existing
    /// user and discarded otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read or written.
    pub fn open(mut storage: S) -> Result<Self, CoreError> {
        let snapshot: Snapshot = match storage.get(DATA_KEY).map_err(CoreError::storage)? {
            Some(blob) => Snapshot::from_json(&blob).unwrap_or_else(|e| {
                warn!(error = %e, "Stored data could not be parsed, starting empty");
                Snapshot::default()
            }),
            None => Snapshot::default(),
        };

        let mut store: Self = Self {
            storage,
            snapshot,
            session: None,
        };

        if store.snapshot.users.is_empty() {
            info!("No users found, seeding default administrator");
            store.snapshot.users.push(seed_admin());
            store.persist()?;
        }

        if let Some(user_id) = store
            .storage
            .get(SESSION_KEY)
            .map_err(CoreError::storage)?
        {
            if store.find_user(&user_id).is_some() {
                store.session = Some(user_id);
            } else {
                warn!(user_id = %user_id, "Saved session names an unknown user, clearing it");
                store.storage.remove(SESSION_KEY).map_err(CoreError::storage)?;
            }
        }

        info!(
            records = store.snapshot.len(),
            signed_in = store.session.is_some(),
            "Store opened"
        );
        Ok(store)
    }

    /// Returns the backing storage.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Consumes the store, returning the backing storage.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Returns every collection.
    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn customers(&self) -> &[Customer] {
        &self.snapshot.customers
    }

    #[must_use]
    pub fn devices(&self) -> &[Device] {
        &self.snapshot.devices
    }

    #[must_use]
    pub fn tickets(&self) -> &[Ticket] {
        &self.snapshot.tickets
    }

    #[must_use]
    pub fn invoices(&self) -> &[Invoice] {
        &self.snapshot.invoices
    }

    #[must_use]
    pub fn appointments(&self) -> &[Appointment] {
        &self.snapshot.appointments
    }

    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.snapshot.users
    }

    #[must_use]
    pub fn find_customer(&self, id: &str) -> Option<&Customer> {
        self.find(id)
    }

    #[must_use]
    pub fn find_device(&self, id: &str) -> Option<&Device> {
        self.find(id)
    }

    #[must_use]
    pub fn find_ticket(&self, id: &str) -> Option<&Ticket> {
        self.find(id)
    }

    /// Finds a ticket by the number printed on its claim tag.
    #[must_use]
    pub fn find_ticket_by_number(&self, ticket_number: u32) -> Option<&Ticket> {
        self.snapshot
            .tickets
            .iter()
            .find(|ticket| ticket.ticket_number == ticket_number)
    }

    #[must_use]
    pub fn find_invoice(&self, id: &str) -> Option<&Invoice> {
        self.find(id)
    }

    #[must_use]
    pub fn find_appointment(&self, id: &str) -> Option<&Appointment> {
        self.find(id)
    }

    #[must_use]
    pub fn find_user(&self, id: &str) -> Option<&User> {
        self.find(id)
    }

    // ------------------------------------------------------------------
    // Customers
    // ------------------------------------------------------------------

    /// Adds a customer, stamping its id and creation time.
    ///
    /// # Errors
    ///
    /// Returns an error if both name parts are blank or the write fails.
    pub fn add_customer(&mut self, customer: NewCustomer) -> Result<Customer, CoreError> {
        let record: Customer =
            customer.into_customer(new_id(EntityKind::Customer.id_prefix()), now());
        self.insert_record(record)
    }

    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, or an error if the result is
    /// invalid or the write fails.
    pub fn update_customer(
        &mut self,
        id: &str,
        patch: CustomerPatch,
    ) -> Result<Customer, CoreError> {
        self.update_record(id, patch)
    }

    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, or an error if the write fails.
    pub fn delete_customer(&mut self, id: &str) -> Result<Customer, CoreError> {
        self.delete_record(id)
    }

    // ------------------------------------------------------------------
    // Devices
    // ------------------------------------------------------------------

    /// Adds a device.
    ///
    /// # Errors
    ///
    /// Returns an error if the owning customer id is blank or the write fails.
    pub fn add_device(&mut self, device: NewDevice) -> Result<Device, CoreError> {
        let record: Device = device.into_device(new_id(EntityKind::Device.id_prefix()));
        self.insert_record(record)
    }

    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, or an error if the result is
    /// invalid or the write fails.
    pub fn update_device(&mut self, id: &str, patch: DevicePatch) -> Result<Device, CoreError> {
        self.update_record(id, patch)
    }

    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, or an error if the write fails.
    pub fn delete_device(&mut self, id: &str) -> Result<Device, CoreError> {
        self.delete_record(id)
    }

    // ------------------------------------------------------------------
    // Tickets
    // ------------------------------------------------------------------

    /// Checks in a new ticket.
    ///
    /// The ticket gets the next ticket number, `created_at == updated_at`,
    /// and a single internal `"Checked In"` log entry attributed to the
    /// signed-in user (or the system actor).
    ///
    /// # Errors
    ///
    /// Returns an error if the customer or device id is blank, no ticket
    /// number is left above the highest existing one, or the write fails.
    pub fn add_ticket(&mut self, ticket: NewTicket) -> Result<Ticket, CoreError> {
        let timestamp: OffsetDateTime = now();
        let ticket_number: u32 = next_ticket_number(&self.snapshot.tickets)?;
        let initial_log: TicketLog = TicketLog::new(
            new_id(LOG_ID_PREFIX),
            &self.actor(),
            String::from(CHECK_IN_MESSAGE),
            LogVisibility::Internal,
            timestamp,
        );
        let record: Ticket = ticket.into_ticket(
            new_id(EntityKind::Ticket.id_prefix()),
            ticket_number,
            initial_log,
            timestamp,
        );
        self.insert_record(record)
    }

    /// Updates a ticket's details. Status is changed with
    /// [`Self::change_ticket_status`].
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, or an error if the result is
    /// invalid or the write fails.
    pub fn update_ticket(&mut self, id: &str, patch: TicketPatch) -> Result<Ticket, CoreError> {
        self.update_record(id, patch)
    }

    /// Moves a ticket to `status` and appends one log entry.
    ///
    /// Any status may follow any other. A blank `message` is replaced with
    /// the status name.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, or an error if the write fails.
    pub fn change_ticket_status(
        &mut self,
        id: &str,
        status: TicketStatus,
        message: &str,
        visibility: LogVisibility,
    ) -> Result<Ticket, CoreError> {
        let actor: Actor = self.actor();
        let timestamp: OffsetDateTime = now();
        let message: String = if message.trim().is_empty() {
            String::from(status.as_str())
        } else {
            message.to_string()
        };

        let ticket: &mut Ticket = self
            .snapshot
            .tickets
            .iter_mut()
            .find(|ticket| ticket.id == id)
            .ok_or_else(|| CoreError::not_found(EntityKind::Ticket, id))?;

        let previous: TicketStatus = ticket.status;
        ticket.status = status;
        ticket.touch(timestamp);
        ticket.logs.push(TicketLog::new(
            new_id(LOG_ID_PREFIX),
            &actor,
            message,
            visibility,
            ticket.updated_at,
        ));
        let updated: Ticket = ticket.clone();

        self.persist()?;
        debug!(
            ticket_number = updated.ticket_number,
            from = %previous,
            to = %status,
            actor = %actor.name,
            "Ticket status changed"
        );
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, or an error if the write fails.
    pub fn delete_ticket(&mut self, id: &str) -> Result<Ticket, CoreError> {
        self.delete_record(id)
    }

    // ------------------------------------------------------------------
    // Invoices
    // ------------------------------------------------------------------

    /// Adds an invoice as given. Line items without an id get one.
    ///
    /// # Errors
    ///
    /// Returns an error if a reference is blank, a line item is invalid or
    /// the write fails.
    pub fn add_invoice(&mut self, invoice: NewInvoice) -> Result<Invoice, CoreError> {
        let mut record: Invoice =
            invoice.into_invoice(new_id(EntityKind::Invoice.id_prefix()), now());
        assign_line_item_ids(&mut record.items);
        self.insert_record(record)
    }

    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, or an error if the result is
    /// invalid or the write fails.
    pub fn update_invoice(
        &mut self,
        id: &str,
        mut patch: InvoicePatch,
    ) -> Result<Invoice, CoreError> {
        if let Some(items) = patch.items.as_mut() {
            assign_line_item_ids(items);
        }
        self.update_record(id, patch)
    }

    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, or an error if the write fails.
    pub fn delete_invoice(&mut self, id: &str) -> Result<Invoice, CoreError> {
        self.delete_record(id)
    }

    // ------------------------------------------------------------------
    // Appointments
    // ------------------------------------------------------------------

    /// Books an appointment.
    ///
    /// # Errors
    ///
    /// Returns an error if the customer id is blank or the write fails.
    pub fn add_appointment(
        &mut self,
        appointment: NewAppointment,
    ) -> Result<Appointment, CoreError> {
        let record: Appointment =
            appointment.into_appointment(new_id(EntityKind::Appointment.id_prefix()));
        self.insert_record(record)
    }

    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, or an error if the result is
    /// invalid or the write fails.
    pub fn update_appointment(
        &mut self,
        id: &str,
        patch: AppointmentPatch,
    ) -> Result<Appointment, CoreError> {
        self.update_record(id, patch)
    }

    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, or an error if the write fails.
    pub fn delete_appointment(&mut self, id: &str) -> Result<Appointment, CoreError> {
        self.delete_record(id)
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    /// Adds a staff account. Role rules are enforced by the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or email is invalid or the write fails.
    pub fn add_user(&mut self, user: NewUser) -> Result<User, CoreError> {
        let record: User = user.into_user(new_id(EntityKind::User.id_prefix()));
        self.insert_record(record)
    }

    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, or an error if the result is
    /// invalid or the write fails.
    pub fn update_user(&mut self, id: &str, patch: UserPatch) -> Result<User, CoreError> {
        self.update_record(id, patch)
    }

    /// Deletes a staff account, signing it out if it holds the session.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id, or an error if the write fails.
    pub fn delete_user(&mut self, id: &str) -> Result<User, CoreError> {
        let removed: User = self.delete_record(id)?;
        if self.session.as_deref() == Some(id) {
            self.set_current_user(None)?;
        }
        Ok(removed)
    }

    // ------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------

    /// Signs a user in, or out with `None`.
    ///
    /// Only the session key is written. Returns the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `user_id` names no user, or an error if the
    /// write fails.
    pub fn set_current_user(&mut self, user_id: Option<&str>) -> Result<Option<User>, CoreError> {
        match user_id {
            Some(id) => {
                let user: User = self
                    .find_user(id)
                    .cloned()
                    .ok_or_else(|| CoreError::not_found(EntityKind::User, id))?;
                self.storage
                    .set(SESSION_KEY, id)
                    .map_err(CoreError::storage)?;
                self.session = Some(user.id.clone());
                info!(user = %user.name, "Signed in");
                Ok(Some(user))
            }
            None => {
                self.storage
                    .remove(SESSION_KEY)
                    .map_err(CoreError::storage)?;
                if self.session.take().is_some() {
                    info!("Signed out");
                }
                Ok(None)
            }
        }
    }

    /// Returns the signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.session.as_deref().and_then(|id| self.find_user(id))
    }

    /// Returns who new log entries are attributed to.
    #[must_use]
    pub fn actor(&self) -> Actor {
        self.current_user().map_or_else(Actor::system, |user| {
            Actor::new(user.id.clone(), user.name.clone())
        })
    }

    // ------------------------------------------------------------------
    // Import / export
    // ------------------------------------------------------------------

    /// Replaces every collection with the contents of `json`.
    ///
    /// Records are taken as they are, without validation. On a parse
    /// failure nothing changes. A session whose user is not in the imported
    /// data is cleared.
    ///
    /// # Errors
    ///
    /// Returns `ImportFailed` if `json` is not a snapshot document, or an
    /// error if the write fails.
    pub fn import(&mut self, json: &str) -> Result<&Snapshot, CoreError> {
        let snapshot: Snapshot = Snapshot::from_json(json).map_err(|e| {
            warn!(error = %e, "Import rejected");
            CoreError::ImportFailed {
                reason: e.to_string(),
            }
        })?;

        self.snapshot = snapshot;
        self.persist()?;
        info!(records = self.snapshot.len(), "Data imported");

        if self.session.is_some() && self.current_user().is_none() {
            self.set_current_user(None)?;
        }
        Ok(&self.snapshot)
    }

    /// Serializes every collection as indented JSON, in the stored shape.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export(&self) -> Result<String, CoreError> {
        Ok(self.snapshot.to_json_pretty()?)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn persist(&mut self) -> Result<(), CoreError> {
        let blob: String = self.snapshot.to_json()?;
        self.storage
            .set(DATA_KEY, &blob)
            .map_err(CoreError::storage)
    }

    fn find<T: Record>(&self, id: &str) -> Option<&T> {
        T::records(&self.snapshot)
            .iter()
            .find(|record| record.id() == id)
    }

    fn insert_record<T: Record>(&mut self, record: T) -> Result<T, CoreError> {
        record.validate()?;
        T::records_mut(&mut self.snapshot).push(record.clone());
        self.persist()?;
        debug!(kind = %T::KIND, id = record.id(), "Added");
        Ok(record)
    }

    fn update_record<T, P>(&mut self, id: &str, patch: P) -> Result<T, CoreError>
    where
        T: Record,
        P: Patch<T>,
    {
        let existing: &mut T = T::records_mut(&mut self.snapshot)
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or_else(|| CoreError::not_found(T::KIND, id))?;

        let mut updated: T = existing.clone();
        if !patch.is_empty() {
            patch.apply(&mut updated);
            updated.validate()?;
            updated.touch(now());
        }
        existing.clone_from(&updated);

        self.persist()?;
        debug!(kind = %T::KIND, id, "Updated");
        Ok(updated)
    }

    fn delete_record<T: Record>(&mut self, id: &str) -> Result<T, CoreError> {
        let records: &mut Vec<T> = T::records_mut(&mut self.snapshot);
        let index: usize = records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| CoreError::not_found(T::KIND, id))?;
        let removed: T = records.remove(index);

        self.persist()?;
        debug!(kind = %T::KIND, id, "Deleted");
        Ok(removed)
    }
}

fn assign_line_item_ids(items: &mut [LineItem]) {
    for item in items.iter_mut().filter(|item| item.id.is_empty()) {
        item.id = new_id(LINE_ITEM_ID_PREFIX);
    }
}
