// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! SQLite storage for CMX Repair Desk.
//!
//! The store keeps its state under two keys, the full data snapshot and the
//! session pointer. This crate persists those keys in a single Diesel-managed
//! `kv_store` table and plugs into [`cmx::Store`] through
//! [`cmx::KeyValueStore`].
//!
//! ## Databases
//!
//! - **In-memory**: each [`Persistence::new_in_memory`] call gets its own
//!   shared-cache database, so tests never see each other's data.
//! - **File**: [`Persistence::new_with_file`] opens (or creates) a database
//!   file and switches it to WAL journaling.
//!
//! Migrations are embedded and run on every open.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod backend;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Key-value persistence backed by `SQLite`.
pub struct Persistence {
    conn: SqliteConnection,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence").finish_non_exhaustive()
    }
}

impl Persistence {
    /// Creates a persistence adapter over a fresh in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:cmx_memdb_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        Ok(Self { conn })
    }

    /// Creates a persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError(String::from("Invalid database path"))
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;

        Ok(Self { conn })
    }

    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_value(&mut self, key: &str) -> Result<Option<String>, PersistenceError> {
        queries::get_value(&mut self.conn, key)
    }

    /// Reads when `key` was last written.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    #[cfg(test)]
    pub(crate) fn get_updated_at(&mut self, key: &str) -> Result<Option<String>, PersistenceError> {
        queries::get_updated_at(&mut self.conn, key)
    }

    /// Lists every stored key.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    #[cfg(test)]
    pub(crate) fn list_keys(&mut self) -> Result<Vec<String>, PersistenceError> {
        queries::list_keys(&mut self.conn)
    }

    /// Writes `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn put_value(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        mutations::put_value(&mut self.conn, key, value)
    }

    /// Deletes `key`, returning whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_value(&mut self, key: &str) -> Result<bool, PersistenceError> {
        mutations::delete_value(&mut self.conn, key)
    }
}

impl cmx::KeyValueStore for Persistence {
    type Error = PersistenceError;

    fn get(&mut self, key: &str) -> Result<Option<String>, Self::Error> {
        self.get_value(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.put_value(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), Self::Error> {
        self.delete_value(key).map(|_| ())
    }
}
