// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The shop-floor summary shown after sign-in.

use cmx::{KeyValueStore, Snapshot, Store};
use cmx_domain::{Appointment, Priority, Ticket, TicketStatus, round_to_cents};
use serde::Serialize;

use crate::auth::AuthenticationService;
use crate::error::ApiError;

/// Tickets currently in one workflow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: TicketStatus,
    pub count: usize,
}

/// Headline numbers for the shop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub customer_count: usize,
    /// Tickets that are neither `Completed` nor `Picked Up`.
    pub open_ticket_count: usize,
    /// One entry per status, in workflow order, including zero counts.
    pub tickets_by_status: Vec<StatusCount>,
    pub urgent_open_ticket_count: usize,
    /// Sum of `amountPaid` over all invoices.
    pub revenue_collected: f64,
    /// Sum of what is still owed on all invoices.
    pub outstanding_balance: f64,
    /// The date the appointment list was taken for (`YYYY-MM-DD`).
    pub date: String,
    pub appointments: Vec<Appointment>,
}

/// Computes the summary from a snapshot.
///
/// `date` selects appointments by exact match on their `date` field.
#[must_use]
pub fn summarize(snapshot: &Snapshot, date: &str) -> DashboardSummary {
    let open: Vec<&Ticket> = snapshot
        .tickets
        .iter()
        .filter(|ticket| ticket.status.is_open())
        .collect();

    let tickets_by_status: Vec<StatusCount> = TicketStatus::ALL
        .iter()
        .map(|status| StatusCount {
            status: *status,
            count: snapshot
                .tickets
                .iter()
                .filter(|ticket| ticket.status == *status)
                .count(),
        })
        .collect();

    let mut appointments: Vec<Appointment> = snapshot
        .appointments
        .iter()
        .filter(|appointment| appointment.date == date)
        .cloned()
        .collect();
    appointments.sort_by(|a, b| a.time.cmp(&b.time));

    DashboardSummary {
        customer_count: snapshot.customers.len(),
        open_ticket_count: open.len(),
        tickets_by_status,
        urgent_open_ticket_count: open
            .iter()
            .filter(|ticket| ticket.priority == Priority::Urgent)
            .count(),
        revenue_collected: round_to_cents(
            snapshot.invoices.iter().map(|invoice| invoice.amount_paid).sum(),
        ),
        outstanding_balance: round_to_cents(
            snapshot
                .invoices
                .iter()
                .map(cmx_domain::Invoice::balance_due)
                .sum(),
        ),
        date: date.to_string(),
        appointments,
    }
}

/// Returns the dashboard for the signed-in user.
///
/// # Errors
///
/// Returns an error if nobody is signed in.
pub fn dashboard<S: KeyValueStore>(
    store: &Store<S>,
    date: &str,
) -> Result<DashboardSummary, ApiError> {
    AuthenticationService::current_actor(store)?;
    Ok(summarize(store.snapshot(), date))
}
