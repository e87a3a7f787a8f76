// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The CMX Repair Desk data store.
//!
//! [`Store`] owns every collection, assigns ids and timestamps, numbers
//! tickets and keeps each ticket's activity log. It persists through any
//! [`KeyValueStore`]; [`MemoryStore`] keeps everything in process.

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

mod error;
mod ids;
mod patch;
mod snapshot;
mod storage;
mod store;

#[cfg(test)]
mod tests;

pub use error::CoreError;
pub use patch::{
    AppointmentPatch, CustomerPatch, DevicePatch, InvoicePatch, Patch, TicketPatch, UserPatch,
};
pub use snapshot::{Record, Snapshot};
pub use storage::{DATA_KEY, KeyValueStore, MemoryStore, SESSION_KEY};
pub use store::{CHECK_IN_MESSAGE, SEED_ADMIN_ID, Store, seed_admin};
