// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Key-value mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::debug;

use crate::diesel_schema::kv_store;
use crate::error::PersistenceError;

/// Writes `value` under `key`, replacing any previous value.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted or the write fails.
pub fn put_value(
    conn: &mut SqliteConnection,
    key: &str,
    value: &str,
) -> Result<(), PersistenceError> {
    let updated_at: String = OffsetDateTime::now_utc().format(&Rfc3339)?;

    diesel::insert_into(kv_store::table)
        .values((
            kv_store::key.eq(key),
            kv_store::value.eq(value),
            kv_store::updated_at.eq(&updated_at),
        ))
        .on_conflict(kv_store::key)
        .do_update()
        .set((
            kv_store::value.eq(value),
            kv_store::updated_at.eq(&updated_at),
        ))
        .execute(conn)?;

    debug!(key, bytes = value.len(), "Stored value");
    Ok(())
}

/// Deletes the value under `key`.
///
/// Returns whether a row was removed. Deleting an absent key is not an
/// error.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_value(conn: &mut SqliteConnection, key: &str) -> Result<bool, PersistenceError> {
    let removed: usize =
        diesel::delete(kv_store::table.filter(kv_store::key.eq(key))).execute(conn)?;
    debug!(key, removed, "Deleted value");
    Ok(removed > 0)
}
