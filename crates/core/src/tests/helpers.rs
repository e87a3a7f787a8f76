// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{MemoryStore, Store};
use cmx_domain::{
    Customer, Device, DeviceType, LineItem, LineItemKind, NewCustomer, NewDevice, NewInvoice,
    NewTicket, NewUser, Priority, Role, Ticket, User,
};

pub fn open_empty_store() -> Store<MemoryStore> {
    Store::open(MemoryStore::new()).unwrap()
}

pub fn create_test_customer(store: &mut Store<MemoryStore>) -> Customer {
    store
        .add_customer(NewCustomer {
            first_name: String::from("Ada"),
            last_name: String::from("Lovelace"),
            email: String::from("ada@example.com"),
            phone: String::from("555-0100"),
            ..NewCustomer::default()
        })
        .unwrap()
}

pub fn create_test_device(store: &mut Store<MemoryStore>, customer_id: &str) -> Device {
    store
        .add_device(NewDevice {
            customer_id: customer_id.to_string(),
            device_type: DeviceType::Laptop,
            brand: String::from("Lenovo"),
            model: String::from("ThinkPad T14"),
            serial_number: String::from("PF-12345"),
            ..NewDevice::default()
        })
        .unwrap()
}

pub fn create_test_ticket(store: &mut Store<MemoryStore>) -> Ticket {
    let customer: Customer = create_test_customer(store);
    let device: Device = create_test_device(store, &customer.id);
    store
        .add_ticket(NewTicket {
            customer_id: customer.id,
            device_id: device.id,
            problem_description: String::from("No power"),
            priority: Priority::High,
            ..NewTicket::default()
        })
        .unwrap()
}

pub fn create_test_technician(store: &mut Store<MemoryStore>) -> User {
    store
        .add_user(NewUser {
            name: String::from("John Tech"),
            role: Role::Technician,
            email: String::from("john@cmx.com"),
            password: Some(String::from("pw")),
        })
        .unwrap()
}

pub fn create_test_invoice(ticket: &Ticket) -> NewInvoice {
    NewInvoice {
        ticket_id: ticket.id.clone(),
        customer_id: ticket.customer_id.clone(),
        items: vec![
            LineItem::new(
                String::from("Diagnostic"),
                1.0,
                49.99,
                LineItemKind::Labor,
                false,
            ),
            LineItem::new(String::from("Charger"), 1.0, 25.0, LineItemKind::Part, true),
        ],
        ..NewInvoice::default()
    }
}
