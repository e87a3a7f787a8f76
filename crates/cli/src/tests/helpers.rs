// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use clap::Parser;
use cmx::{MemoryStore, Store};
use serde_json::Value;

use crate::cli::{Args, Command};
use crate::commands::{Outcome, run};

pub const TODAY: &str = "2026-10-19";

/// Parses a command line the way `cmx` would.
pub fn parse(line: &[&str]) -> Args {
    Args::try_parse_from(std::iter::once("cmx").chain(line.iter().copied())).unwrap()
}

pub fn command(line: &[&str]) -> Command {
    parse(line).command
}

pub fn create_test_store() -> Store<MemoryStore> {
    Store::open(MemoryStore::new()).unwrap()
}

/// Runs a command line and parses its JSON output.
pub fn run_json(store: &mut Store<MemoryStore>, line: &[&str]) -> Value {
    match run(store, command(line), TODAY).unwrap() {
        Outcome::Text(text) => serde_json::from_str(&text).unwrap(),
        Outcome::Diagnose(request) => panic!("unexpected diagnosis request {request:?}"),
    }
}

/// Runs a command line that is expected to fail and returns the error text.
pub fn run_err(store: &mut Store<MemoryStore>, line: &[&str]) -> String {
    run(store, command(line), TODAY).unwrap_err().to_string()
}

pub fn signed_in_store() -> Store<MemoryStore> {
    let mut store: Store<MemoryStore> = create_test_store();
    run_json(&mut store, &["login", "admin@cmx.com", "--password", "1234"]);
    store
}

/// Creates a customer, a laptop and a ticket; returns `(customer, device, ticket)` ids.
pub fn seed_ticket(store: &mut Store<MemoryStore>) -> (String, String, String) {
    let customer: Value = run_json(
        store,
        &["customer", "add", "--first-name", "Sarah", "--last-name", "Connor"],
    );
    let customer_id: String = customer["id"].as_str().unwrap().to_string();
    let device: Value = run_json(
        store,
        &[
            "device", "add", "--customer", &customer_id, "--type", "laptop", "--brand", "Dell",
            "--model", "XPS 13",
        ],
    );
    let device_id: String = device["id"].as_str().unwrap().to_string();
    let ticket: Value = run_json(
        store,
        &[
            "ticket",
            "add",
            "--customer",
            &customer_id,
            "--device",
            &device_id,
            "--problem",
            "Fan grinding",
            "--priority",
            "urgent",
        ],
    );
    let ticket_id: String = ticket["id"].as_str().unwrap().to_string();
    (customer_id, device_id, ticket_id)
}
