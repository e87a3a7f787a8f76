// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use cmx::{MemoryStore, Store};
use cmx_assist::{DiagnosticClient, DiagnosticConfig, NOT_CONFIGURED_MESSAGE};
use serde_json::Value;
use std::path::PathBuf;

use crate::commands::{DiagnosisRequest, Outcome, diagnose, run};
use crate::tests::helpers::{
    TODAY, command, create_test_store, run_err, run_json, seed_ticket, signed_in_store,
};

#[test]
fn test_login_and_whoami() {
    let mut store: Store<MemoryStore> = create_test_store();

    let login: Value = run_json(&mut store, &["login", "ADMIN@cmx.com", "--password", "1234"]);
    let whoami: Value = run_json(&mut store, &["whoami"]);

    assert_eq!(login["user_id"], "u1");
    assert_eq!(whoami["role"], "Admin");
    assert_eq!(whoami["capabilities"]["can_manage_users"], true);
}

#[test]
fn test_wrong_password_is_reported() {
    let mut store: Store<MemoryStore> = create_test_store();

    let err: String = run_err(&mut store, &["login", "admin@cmx.com", "--password", "nope"]);

    assert!(err.contains("Invalid email or password"));
}

#[test]
fn test_commands_require_sign_in() {
    let mut store: Store<MemoryStore> = create_test_store();

    for line in [
        &["customer", "list"][..],
        &["ticket", "list"][..],
        &["dashboard"][..],
        &["export"][..],
    ] {
        assert!(run(&mut store, command(line), TODAY).is_err(), "{line:?}");
    }
}

#[test]
fn test_ticket_workflow_by_number() {
    let mut store: Store<MemoryStore> = signed_in_store();
    let (_, _, ticket_id) = seed_ticket(&mut store);

    let shown: Value = run_json(&mut store, &["ticket", "show", "#1001"]);
    assert_eq!(shown["id"], ticket_id.as_str());
    assert_eq!(shown["status"], "Checked In");

    let moved: Value = run_json(
        &mut store,
        &["ticket", "status", "1001", "diagnosing", "--internal"],
    );
    assert_eq!(moved["status"], "Diagnosing");
    let logs: &Vec<Value> = moved["logs"].as_array().unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[1]["message"], "Diagnosing");
    assert_eq!(logs[1]["isInternal"], true);

    let open: Value = run_json(&mut store, &["ticket", "list", "--open"]);
    assert_eq!(open.as_array().unwrap().len(), 1);
    let done: Value = run_json(&mut store, &["ticket", "list", "--status", "completed"]);
    assert!(done.as_array().unwrap().is_empty());
}

#[test]
fn test_ticket_advance_moves_to_next_status() {
    let mut store: Store<MemoryStore> = signed_in_store();
    seed_ticket(&mut store);

    let moved: Value = run_json(&mut store, &["ticket", "advance", "#1001", "-m", "On the bench"]);
    assert_eq!(moved["status"], "Diagnosing");
    assert_eq!(moved["logs"][1]["message"], "On the bench");

    for _ in 0..4 {
        run_json(&mut store, &["ticket", "advance", "1001"]);
    }
    let err: String = run_err(&mut store, &["ticket", "advance", "1001"]);
    assert!(err.contains("already Picked Up"), "{err}");
}

#[test]
fn test_ticket_update_assigns_and_unassigns() {
    let mut store: Store<MemoryStore> = signed_in_store();
    let (_, _, ticket_id) = seed_ticket(&mut store);

    let assigned: Value = run_json(
        &mut store,
        &["ticket", "update", &ticket_id, "--technician", "u1"],
    );
    assert_eq!(assigned["technicianId"], "u1");

    let unassigned: Value = run_json(&mut store, &["ticket", "update", &ticket_id, "--unassign"]);
    assert!(unassigned.get("technicianId").is_none_or(Value::is_null));
}

#[test]
fn test_invoice_and_payment() {
    let mut store: Store<MemoryStore> = signed_in_store();
    seed_ticket(&mut store);

    let invoice: Value = run_json(
        &mut store,
        &[
            "invoice",
            "add",
            "--ticket",
            "#1001",
            "--item",
            "labor:1:49.99:exempt:Fan replacement",
            "--item",
            "part:1:25:taxable:Fan",
        ],
    );
    assert_eq!(invoice["total"], 77.05);
    assert_eq!(invoice["status"], "Draft");

    let id: &str = invoice["id"].as_str().unwrap();
    let paid: Value = run_json(&mut store, &["invoice", "pay", id, "77.05"]);
    assert_eq!(paid["status"], "Paid");

    let listed: Value = run_json(&mut store, &["invoice", "list", "--status", "paid"]);
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[test]
fn test_missing_records_are_reported() {
    let mut store: Store<MemoryStore> = signed_in_store();

    let err: String = run_err(&mut store, &["customer", "show", "c-nope"]);
    assert!(err.contains("c-nope"));

    let err: String = run_err(&mut store, &["ticket", "show", "#4242"]);
    assert!(err.contains("#4242"));
}

#[test]
fn test_appointments_listed_in_order() {
    let mut store: Store<MemoryStore> = signed_in_store();
    let (customer_id, _, _) = seed_ticket(&mut store);
    for (date, time, title) in [
        ("2026-10-20", "09:00", "Follow-up"),
        (TODAY, "14:00", "Pickup"),
        (TODAY, "08:30", "Drop-off"),
    ] {
        run_json(
            &mut store,
            &[
                "appointment", "add", "--customer", &customer_id, "--title", title, "--date",
                date, "--time", time,
            ],
        );
    }

    let all: Value = run_json(&mut store, &["appointment", "list"]);
    let titles: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Drop-off", "Pickup", "Follow-up"]);

    let dashboard: Value = run_json(&mut store, &["dashboard"]);
    assert_eq!(dashboard["date"], TODAY);
    assert_eq!(dashboard["appointments"].as_array().unwrap().len(), 2);
    assert_eq!(dashboard["urgent_open_ticket_count"], 1);
}

#[test]
fn test_user_management() {
    let mut store: Store<MemoryStore> = signed_in_store();

    let tech: Value = run_json(
        &mut store,
        &[
            "user", "add", "--name", "John Tech", "--email", "john@cmx.com", "--role", "tech",
        ],
    );
    let id: &str = tech["id"].as_str().unwrap();
    assert_eq!(tech["role"], "Technician");
    assert_eq!(tech["has_password"], false);

    let updated: Value = run_json(&mut store, &["user", "update", id, "--password", "pw"]);
    assert_eq!(updated["has_password"], true);

    let err: String = run_err(&mut store, &["user", "delete", "u1"]);
    assert!(err.contains("own account"));

    run_json(&mut store, &["user", "delete", id]);
    let users: Value = run_json(&mut store, &["user", "list"]);
    assert_eq!(users.as_array().unwrap().len(), 1);
}

#[test]
fn test_export_then_import_through_files() {
    let dir: tempfile::TempDir = tempfile::tempdir().unwrap();
    let path: PathBuf = dir.path().join("backup.json");
    let path_arg: &str = path.to_str().unwrap();

    let mut source: Store<MemoryStore> = signed_in_store();
    seed_ticket(&mut source);
    let exported: Value = run_json(&mut source, &["export", path_arg]);
    assert_eq!(exported["exported"], path_arg);

    let mut target: Store<MemoryStore> = signed_in_store();
    let counts: Value = run_json(&mut target, &["import", path_arg]);

    assert_eq!(counts["customers"], 1);
    assert_eq!(counts["tickets"], 1);
    assert_eq!(target.snapshot(), source.snapshot());
}

#[test]
fn test_search_finds_ticket_by_problem() {
    let mut store: Store<MemoryStore> = signed_in_store();
    seed_ticket(&mut store);

    let results: Value = run_json(&mut store, &["search", "grinding"]);

    assert_eq!(results["tickets"].as_array().unwrap().len(), 1);
    assert!(results["customers"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_diagnose_without_key() {
    let mut store: Store<MemoryStore> = signed_in_store();
    let (_, _, ticket_id) = seed_ticket(&mut store);

    let outcome: Outcome = run(&mut store, command(&["diagnose", "#1001"]), TODAY).unwrap();
    let request: DiagnosisRequest = match outcome {
        Outcome::Diagnose(request) => request,
        Outcome::Text(text) => panic!("unexpected output {text}"),
    };
    assert_eq!(request.ticket_id, ticket_id);
    assert_eq!(request.device_type, "Laptop");
    assert_eq!(request.description, "Fan grinding");

    let client: DiagnosticClient = DiagnosticClient::new(DiagnosticConfig::default()).unwrap();
    let text: String = diagnose(&client, request).await.unwrap();
    let value: Value = serde_json::from_str(&text).unwrap();

    assert_eq!(value["suggestion"], NOT_CONFIGURED_MESSAGE);
    assert_eq!(value["ticketNumber"], 1001);
}
