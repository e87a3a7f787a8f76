// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use cmx::{MemoryStore, SEED_ADMIN_ID, Store};
use cmx_domain::{
    Customer, Device, DeviceType, NewCustomer, NewDevice, NewTicket, Priority, Role, Ticket, User,
};

use crate::{CreateUserRequest, LoginRequest, UserInfo, create_user, login};

pub fn create_test_store() -> Store<MemoryStore> {
    Store::open(MemoryStore::new()).unwrap()
}

pub fn create_signed_in_admin_store() -> Store<MemoryStore> {
    let mut store: Store<MemoryStore> = create_test_store();
    store.set_current_user(Some(SEED_ADMIN_ID)).unwrap();
    store
}

pub fn create_test_user(store: &mut Store<MemoryStore>, name: &str, role: Role) -> UserInfo {
    create_user(
        store,
        CreateUserRequest {
            name: name.to_string(),
            role,
            email: format!("{}@cmx.com", name.to_lowercase().replace(' ', ".")),
            password: Some(String::from("pw")),
        },
    )
    .unwrap()
}

pub fn sign_in_as(store: &mut Store<MemoryStore>, user: &UserInfo) {
    login(
        store,
        &LoginRequest {
            email: user.email.clone(),
            password: String::from("pw"),
        },
    )
    .unwrap();
}

pub fn create_technician_store() -> Store<MemoryStore> {
    let mut store: Store<MemoryStore> = create_signed_in_admin_store();
    let tech: UserInfo = create_test_user(&mut store, "John Tech", Role::Technician);
    sign_in_as(&mut store, &tech);
    store
}

pub fn seed_ticket(store: &mut Store<MemoryStore>) -> Ticket {
    let customer: Customer = store
        .add_customer(NewCustomer {
            first_name: String::from("Sarah"),
            last_name: String::from("Connor"),
            email: String::from("sarah@example.com"),
            phone: String::from("555-0142"),
            ..NewCustomer::default()
        })
        .unwrap();
    let device: Device = store
        .add_device(NewDevice {
            customer_id: customer.id.clone(),
            device_type: DeviceType::Phone,
            brand: String::from("Apple"),
            model: String::from("iPhone 13"),
            serial_number: String::from("F2LXK9"),
            ..NewDevice::default()
        })
        .unwrap();
    store
        .add_ticket(NewTicket {
            customer_id: customer.id,
            device_id: device.id,
            problem_description: String::from("Cracked screen"),
            priority: Priority::Medium,
            ..NewTicket::default()
        })
        .unwrap()
}

pub fn find_admin(store: &Store<MemoryStore>) -> User {
    store.find_user(SEED_ADMIN_ID).unwrap().clone()
}
