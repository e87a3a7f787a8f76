// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_customer, create_test_technician, open_empty_store};
use crate::{DATA_KEY, KeyValueStore, MemoryStore, SEED_ADMIN_ID, SESSION_KEY, Snapshot, Store};
use cmx_domain::{Role, User};

#[test]
fn test_empty_storage_seeds_single_admin() {
    let store: Store<MemoryStore> = open_empty_store();

    assert_eq!(store.users().len(), 1);
    let admin: &User = &store.users()[0];
    assert_eq!(admin.id, SEED_ADMIN_ID);
    assert_eq!(admin.name, "Shop Owner");
    assert_eq!(admin.role, Role::Admin);
    assert_eq!(admin.email, "admin@cmx.com");
    assert_eq!(admin.password.as_deref(), Some("1234"));
    assert!(store.current_user().is_none());
}

#[test]
fn test_seeded_admin_is_persisted() {
    let store: Store<MemoryStore> = open_empty_store();
    let storage: MemoryStore = store.into_storage();

    let blob: &str = storage.value(DATA_KEY).unwrap();
    let snapshot: Snapshot = Snapshot::from_json(blob).unwrap();
    assert_eq!(snapshot.users.len(), 1);
    assert_eq!(snapshot.users[0].id, SEED_ADMIN_ID);
}

#[test]
fn test_unparsable_blob_is_treated_as_empty() {
    let mut storage: MemoryStore = MemoryStore::new();
    storage.set(DATA_KEY, "{not json").unwrap();

    let store: Store<MemoryStore> = Store::open(storage).unwrap();

    assert!(store.customers().is_empty());
    assert_eq!(store.users().len(), 1);
    assert_eq!(store.users()[0].id, SEED_ADMIN_ID);
}

#[test]
fn test_existing_users_are_not_reseeded() {
    let mut storage: MemoryStore = MemoryStore::new();
    storage
        .set(
            DATA_KEY,
            r#"{"users":[{"id":"u-9","name":"Pat","role":"Front Desk","email":"pat@cmx.com"}]}"#,
        )
        .unwrap();

    let store: Store<MemoryStore> = Store::open(storage).unwrap();

    assert_eq!(store.users().len(), 1);
    assert_eq!(store.users()[0].id, "u-9");
    assert_eq!(store.users()[0].role, Role::FrontDesk);
    assert_eq!(store.storage().write_count(DATA_KEY), 1);
}

#[test]
fn test_null_and_missing_collections_load_as_empty() {
    let mut storage: MemoryStore = MemoryStore::new();
    storage
        .set(
            DATA_KEY,
            r#"{"customers":null,"users":[{"id":"u1","name":"Owner","role":"Admin","email":"a@b.c","password":"x"}]}"#,
        )
        .unwrap();

    let store: Store<MemoryStore> = Store::open(storage).unwrap();

    assert!(store.customers().is_empty());
    assert!(store.tickets().is_empty());
    assert_eq!(store.users().len(), 1);
}

#[test]
fn test_reopen_restores_data_and_session() {
    let mut store: Store<MemoryStore> = open_empty_store();
    let customer_id: String = create_test_customer(&mut store).id;
    let tech: User = create_test_technician(&mut store);
    store.set_current_user(Some(&tech.id)).unwrap();
    let before: Snapshot = store.snapshot().clone();

    let reopened: Store<MemoryStore> = Store::open(store.into_storage()).unwrap();

    assert_eq!(reopened.snapshot(), &before);
    assert!(reopened.find_customer(&customer_id).is_some());
    assert_eq!(reopened.current_user().unwrap().id, tech.id);
}

#[test]
fn test_stale_session_is_removed_on_open() {
    let mut storage: MemoryStore = MemoryStore::new();
    storage.set(SESSION_KEY, "u-gone").unwrap();

    let store: Store<MemoryStore> = Store::open(storage).unwrap();

    assert!(store.current_user().is_none());
    assert!(store.storage().value(SESSION_KEY).is_none());
}
