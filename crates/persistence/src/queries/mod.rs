// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Key-value queries.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::diesel_schema::kv_store;
use crate::error::PersistenceError;

/// Reads the value stored under `key`.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the key is absent.
pub fn get_value(conn: &mut SqliteConnection, key: &str) -> Result<Option<String>, PersistenceError> {
    let value: Option<String> = kv_store::table
        .filter(kv_store::key.eq(key))
        .select(kv_store::value)
        .first::<String>(conn)
        .optional()?;
    Ok(value)
}

/// Reads when `key` was last written, as an RFC 3339 timestamp.
///
/// # Errors
///
/// Returns an error if the database query fails.
#[cfg(test)]
pub fn get_updated_at(
    conn: &mut SqliteConnection,
    key: &str,
) -> Result<Option<String>, PersistenceError> {
    let updated_at: Option<String> = kv_store::table
        .filter(kv_store::key.eq(key))
        .select(kv_store::updated_at)
        .first::<String>(conn)
        .optional()?;
    Ok(updated_at)
}

/// Lists every stored key in ascending order.
///
/// # Errors
///
/// Returns an error if the database query fails.
#[cfg(test)]
pub fn list_keys(conn: &mut SqliteConnection) -> Result<Vec<String>, PersistenceError> {
    let keys: Vec<String> = kv_store::table
        .select(kv_store::key)
        .order(kv_store::key.asc())
        .load::<String>(conn)?;
    Ok(keys)
}
