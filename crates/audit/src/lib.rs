// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actor attribution and the ticket activity log.
//!
//! Every ticket carries an append-only list of [`TicketLog`] entries. Each
//! entry records who acted, what happened, when, and whether the entry is
//! meant for staff only or may be shown to the customer.

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

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[cfg(test)]
mod tests;

/// Identifier recorded for actions taken while nobody is signed in.
pub const SYSTEM_ACTOR_ID: &str = "sys";

/// Display name recorded for actions taken while nobody is signed in.
pub const SYSTEM_ACTOR_NAME: &str = "System";

/// Represents the entity performing an action.
///
/// Actors are snapshots: the name is captured at the time of the action and
/// is not updated if the user is later renamed or deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The user id, or [`SYSTEM_ACTOR_ID`].
    pub id: String,
    /// The user's display name, or [`SYSTEM_ACTOR_NAME`].
    pub name: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `name` - The display name recorded in log entries
    #[must_use]
    pub const fn new(id: String, name: String) -> Self {
        Self { id, name }
    }

    /// The pseudo-actor used when no session is active.
    #[must_use]
    pub fn system() -> Self {
        Self::new(
            String::from(SYSTEM_ACTOR_ID),
            String::from(SYSTEM_ACTOR_NAME),
        )
    }

    /// Returns whether this is the system pseudo-actor.
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.id == SYSTEM_ACTOR_ID
    }
}

/// Who may see a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogVisibility {
    /// Staff only.
    Internal,
    /// May be shown to the customer.
    External,
}

impl LogVisibility {
    /// Maps the persisted `isInternal` flag to a visibility.
    #[must_use]
    pub const fn from_internal_flag(is_internal: bool) -> Self {
        if is_internal {
            Self::Internal
        } else {
            Self::External
        }
    }

    /// Returns the persisted `isInternal` flag.
    #[must_use]
    pub const fn is_internal(self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// An immutable entry in a ticket's activity log.
///
/// Entries are only ever appended. The persisted shape is the camelCase
/// JSON object `{ id, timestamp, userId, userName, message, isInternal }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketLog {
    /// Unique log entry id.
    pub id: String,
    /// When the entry was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// The acting user's id at the time of the entry.
    pub user_id: String,
    /// The acting user's name at the time of the entry.
    pub user_name: String,
    /// Free-text description of what happened.
    pub message: String,
    /// Whether the entry is staff only.
    pub is_internal: bool,
}

impl TicketLog {
    /// Creates a new log entry attributed to `actor`.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique id for this entry
    /// * `actor` - Who performed the action
    /// * `message` - What happened
    /// * `visibility` - Whether the entry is internal or customer facing
    /// * `timestamp` - When it happened
    #[must_use]
    pub fn new(
        id: String,
        actor: &Actor,
        message: String,
        visibility: LogVisibility,
        timestamp: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            timestamp,
            user_id: actor.id.clone(),
            user_name: actor.name.clone(),
            message,
            is_internal: visibility.is_internal(),
        }
    }

    /// Returns the actor recorded on this entry.
    #[must_use]
    pub fn actor(&self) -> Actor {
        Actor::new(self.user_id.clone(), self.user_name.clone())
    }

    /// Returns the visibility of this entry.
    #[must_use]
    pub const fn visibility(&self) -> LogVisibility {
        LogVisibility::from_internal_flag(self.is_internal)
    }
}
