// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Customer, Device, DeviceType, DomainError, InvoiceStatus, LineItemKind, NewCustomer, Priority,
    Role, TicketStatus, User,
};
use time::macros::datetime;

#[test]
fn test_role_parses_display_and_cli_spellings() {
    assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
    assert_eq!("technician".parse::<Role>().unwrap(), Role::Technician);
    assert_eq!("Front Desk".parse::<Role>().unwrap(), Role::FrontDesk);
    assert_eq!("front-desk".parse::<Role>().unwrap(), Role::FrontDesk);
    assert!(matches!(
        "Owner".parse::<Role>(),
        Err(DomainError::InvalidRole(_))
    ));
}

#[test]
fn test_role_serializes_with_space() {
    let json: String = serde_json::to_string(&Role::FrontDesk).unwrap();
    assert_eq!(json, "\"Front Desk\"");
    assert_eq!(Role::FrontDesk.to_string(), "Front Desk");
}

#[test]
fn test_ticket_status_workflow_order() {
    assert_eq!(TicketStatus::ALL.len(), 6);
    assert_eq!(TicketStatus::ALL[0], TicketStatus::CheckedIn);
    assert_eq!(TicketStatus::ALL[5], TicketStatus::PickedUp);

    for pair in TicketStatus::ALL.windows(2) {
        assert!(pair[0] < pair[1]);
        assert_eq!(pair[0].next(), Some(pair[1]));
    }
    assert_eq!(TicketStatus::PickedUp.next(), None);
}

#[test]
fn test_ticket_status_open_states() {
    assert!(TicketStatus::CheckedIn.is_open());
    assert!(TicketStatus::WaitingForApproval.is_open());
    assert!(TicketStatus::InProgress.is_open());
    assert!(!TicketStatus::Completed.is_open());
    assert!(!TicketStatus::PickedUp.is_open());
}

#[test]
fn test_ticket_status_string_forms() {
    for status in TicketStatus::ALL {
        assert_eq!(status.as_str().parse::<TicketStatus>().unwrap(), status);
        let json: String = serde_json::to_string(&status).unwrap();
        assert_eq!(json, format!("\"{}\"", status.as_str()));
    }
    assert_eq!(
        "waiting-for-approval".parse::<TicketStatus>().unwrap(),
        TicketStatus::WaitingForApproval
    );
}

#[test]
fn test_priority_and_kinds_parse() {
    assert_eq!("urgent".parse::<Priority>().unwrap(), Priority::Urgent);
    assert!(Priority::Urgent > Priority::High);
    assert_eq!("laptop".parse::<DeviceType>().unwrap(), DeviceType::Laptop);
    assert_eq!(
        "flat-rate".parse::<LineItemKind>().unwrap(),
        LineItemKind::FlatRate
    );
    assert_eq!(
        "Partially Paid".parse::<InvoiceStatus>().unwrap(),
        InvoiceStatus::PartiallyPaid
    );
    assert!("Fridge".parse::<DeviceType>().is_err());
}

#[test]
fn test_user_password_is_optional_on_the_wire() {
    let user: User = serde_json::from_str(
        r#"{ "id": "u2", "name": "John Tech", "role": "Technician", "email": "john@cmx.com" }"#,
    )
    .unwrap();

    assert_eq!(user.password, None);
    let json: serde_json::Value = serde_json::to_value(&user).unwrap();
    assert!(json.get("password").is_none());
}

#[test]
fn test_customer_defaults_missing_text_fields() {
    let customer: Customer = serde_json::from_str(
        r#"{ "id": "c1", "firstName": "Alice", "createdAt": "2023-01-10T00:00:00Z" }"#,
    )
    .unwrap();

    assert_eq!(customer.last_name, "");
    assert!(customer.tags.is_empty());
    assert_eq!(customer.full_name(), "Alice");
}

#[test]
fn test_new_customer_keeps_fields() {
    let customer: Customer = NewCustomer {
        first_name: String::from("Alice"),
        last_name: String::from("Johnson"),
        tags: vec![String::from("vip")],
        ..NewCustomer::default()
    }
    .into_customer(String::from("c-1"), datetime!(2023-01-10 00:00 UTC));

    assert_eq!(customer.id, "c-1");
    assert_eq!(customer.full_name(), "Alice Johnson");
    assert_eq!(customer.tags, vec![String::from("vip")]);
}

#[test]
fn test_device_type_field_is_named_type() {
    let device: Device = serde_json::from_str(
        r#"{ "id": "d1", "customerId": "c1", "type": "Laptop", "brand": "Dell",
             "model": "XPS 15 9500", "serialNumber": "ABC-123-XYZ", "os": "Windows 11",
             "password": "password123", "accessories": "Charger, Mouse",
             "notes": "Battery seems to be swelling." }"#,
    )
    .unwrap();

    assert_eq!(device.device_type, DeviceType::Laptop);
    assert_eq!(device.label(), "Dell XPS 15 9500");
    let json: serde_json::Value = serde_json::to_value(&device).unwrap();
    assert_eq!(json["type"], "Laptop");
    assert_eq!(json["serialNumber"], "ABC-123-XYZ");
}
