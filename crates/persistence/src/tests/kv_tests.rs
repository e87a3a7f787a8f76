// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Persistence, PersistenceError};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_absent_key_reads_none() {
    let mut db: Persistence = Persistence::new_in_memory().unwrap();

    assert_eq!(db.get_value("CMX_DATA").unwrap(), None);
    assert_eq!(db.get_updated_at("CMX_DATA").unwrap(), None);
}

#[test]
fn test_put_then_get() {
    let mut db: Persistence = Persistence::new_in_memory().unwrap();

    db.put_value("CMX_SESSION", "u1").unwrap();

    assert_eq!(db.get_value("CMX_SESSION").unwrap().as_deref(), Some("u1"));
}

#[test]
fn test_put_overwrites_existing_value() {
    let mut db: Persistence = Persistence::new_in_memory().unwrap();
    db.put_value("CMX_SESSION", "u1").unwrap();

    db.put_value("CMX_SESSION", "u-2").unwrap();

    assert_eq!(db.get_value("CMX_SESSION").unwrap().as_deref(), Some("u-2"));
    assert_eq!(db.list_keys().unwrap(), vec![String::from("CMX_SESSION")]);
}

#[test]
fn test_updated_at_is_rfc3339() {
    let mut db: Persistence = Persistence::new_in_memory().unwrap();
    db.put_value("CMX_DATA", "{}").unwrap();

    let stamp: String = db.get_updated_at("CMX_DATA").unwrap().unwrap();

    assert!(OffsetDateTime::parse(&stamp, &Rfc3339).is_ok());
}

#[test]
fn test_delete_reports_whether_key_existed() {
    let mut db: Persistence = Persistence::new_in_memory().unwrap();
    db.put_value("CMX_SESSION", "u1").unwrap();

    assert!(db.delete_value("CMX_SESSION").unwrap());
    assert!(!db.delete_value("CMX_SESSION").unwrap());
    assert_eq!(db.get_value("CMX_SESSION").unwrap(), None);
}

#[test]
fn test_list_keys_is_sorted() {
    let mut db: Persistence = Persistence::new_in_memory().unwrap();
    db.put_value("CMX_SESSION", "u1").unwrap();
    db.put_value("CMX_DATA", "{}").unwrap();

    assert_eq!(
        db.list_keys().unwrap(),
        vec![String::from("CMX_DATA"), String::from("CMX_SESSION")]
    );
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1: Persistence = Persistence::new_in_memory().unwrap();
    let mut db2: Persistence = Persistence::new_in_memory().unwrap();

    db1.put_value("CMX_DATA", "{}").unwrap();

    assert_eq!(db1.list_keys().unwrap().len(), 1, "db1 should have 1 key");
    assert!(db2.list_keys().unwrap().is_empty(), "db2 should be isolated");
}

#[test]
fn test_file_database_survives_reopen() {
    let dir: tempfile::TempDir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cmx.db");

    {
        let mut db: Persistence = Persistence::new_with_file(&path).unwrap();
        db.put_value("CMX_DATA", "{\"customers\":[]}").unwrap();
    }

    let mut reopened: Persistence = Persistence::new_with_file(&path).unwrap();
    assert_eq!(
        reopened.get_value("CMX_DATA").unwrap().as_deref(),
        Some("{\"customers\":[]}")
    );
}
