// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Quick search across customers, tickets and devices.

use cmx::{KeyValueStore, Snapshot, Store};
use cmx_domain::{Customer, Device, Ticket};
use serde::Serialize;

use crate::auth::AuthenticationService;
use crate::error::ApiError;

/// Records matching a search term, each list in stored order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub customers: Vec<Customer>,
    pub tickets: Vec<Ticket>,
    pub devices: Vec<Device>,
}

impl SearchResults {
    /// Returns whether nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty() && self.tickets.is_empty() && self.devices.is_empty()
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Finds records whose text contains `query`, ignoring case.
///
/// Customers match on full name, email and phone. Tickets match on ticket
/// number (a leading `#` is ignored) and problem description. Devices match
/// on brand, model and serial number. A blank query matches nothing.
#[must_use]
pub fn search(snapshot: &Snapshot, query: &str) -> SearchResults {
    let needle: String = query.trim().to_lowercase();
    if needle.is_empty() {
        return SearchResults::default();
    }
    let number: &str = needle.strip_prefix('#').unwrap_or(&needle);

    SearchResults {
        customers: snapshot
            .customers
            .iter()
            .filter(|c| {
                contains(&c.full_name(), &needle)
                    || contains(&c.email, &needle)
                    || contains(&c.phone, &needle)
            })
            .cloned()
            .collect(),
        tickets: snapshot
            .tickets
            .iter()
            .filter(|t| {
                (!number.is_empty() && t.ticket_number.to_string().contains(number))
                    || contains(&t.problem_description, &needle)
            })
            .cloned()
            .collect(),
        devices: snapshot
            .devices
            .iter()
            .filter(|d| {
                contains(&d.brand, &needle)
                    || contains(&d.model, &needle)
                    || contains(&d.serial_number, &needle)
            })
            .cloned()
            .collect(),
    }
}

/// Searches the shop on behalf of the signed-in user.
///
/// # Errors
///
/// Returns an error if nobody is signed in.
pub fn quick_search<S: KeyValueStore>(
    store: &Store<S>,
    query: &str,
) -> Result<SearchResults, ApiError> {
    AuthenticationService::current_actor(store)?;
    Ok(search(store.snapshot(), query))
}
