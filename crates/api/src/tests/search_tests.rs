// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use cmx::{MemoryStore, Store};
use cmx_domain::Ticket;

use crate::tests::helpers::{create_signed_in_admin_store, create_test_store, seed_ticket};
use crate::{ApiError, SearchResults, quick_search, search};

#[test]
fn test_search_matches_customer_case_insensitively() {
    let mut store: Store<MemoryStore> = create_signed_in_admin_store();
    seed_ticket(&mut store);

    let results: SearchResults = search(store.snapshot(), "sarah CON");

    assert_eq!(results.customers.len(), 1);
    assert!(results.tickets.is_empty());
    assert!(results.devices.is_empty());
}

#[test]
fn test_search_matches_ticket_number_with_hash() {
    let mut store: Store<MemoryStore> = create_signed_in_admin_store();
    let ticket: Ticket = seed_ticket(&mut store);

    let results: SearchResults = search(store.snapshot(), &format!("#{}", ticket.ticket_number));

    assert_eq!(results.tickets.len(), 1);
    assert_eq!(results.tickets[0].id, ticket.id);
}

#[test]
fn test_search_matches_device_serial_and_problem() {
    let mut store: Store<MemoryStore> = create_signed_in_admin_store();
    seed_ticket(&mut store);

    assert_eq!(search(store.snapshot(), "f2lx").devices.len(), 1);
    assert_eq!(search(store.snapshot(), "cracked").tickets.len(), 1);
}

#[test]
fn test_blank_query_matches_nothing() {
    let mut store: Store<MemoryStore> = create_signed_in_admin_store();
    seed_ticket(&mut store);

    assert!(search(store.snapshot(), "   ").is_empty());
    assert!(search(store.snapshot(), "#").tickets.is_empty());
}

#[test]
fn test_quick_search_requires_sign_in() {
    let store: Store<MemoryStore> = create_test_store();

    assert!(matches!(
        quick_search(&store, "sarah"),
        Err(ApiError::AuthenticationFailed { .. })
    ));
}
