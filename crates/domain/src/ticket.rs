// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::entity::{Entity, EntityKind};
use crate::error::DomainError;
use crate::types::normalize_token;
use cmx_audit::TicketLog;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// The repair workflow states, in order.
///
/// The ordering is the order a ticket normally moves through the bench.
/// Transitions are not restricted to the next state; staff may move a
/// ticket backwards (for example from `Completed` back to `In Progress`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum TicketStatus {
    #[default]
    #[serde(rename = "Checked In")]
    CheckedIn,
    Diagnosing,
    #[serde(rename = "Waiting for Approval")]
    WaitingForApproval,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    #[serde(rename = "Picked Up")]
    PickedUp,
}

impl TicketStatus {
    /// All states in workflow order.
    pub const ALL: [Self; 6] = [
        Self::CheckedIn,
        Self::Diagnosing,
        Self::WaitingForApproval,
        Self::InProgress,
        Self::Completed,
        Self::PickedUp,
    ];

    /// Converts this status to its persisted string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CheckedIn => "Checked In",
            Self::Diagnosing => "Diagnosing",
            Self::WaitingForApproval => "Waiting for Approval",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::PickedUp => "Picked Up",
        }
    }

    /// Returns the following workflow state, or `None` at the end.
    #[must_use]
    pub const fn next(&self) -> Option<Self> {
        match self {
            Self::CheckedIn => Some(Self::Diagnosing),
            Self::Diagnosing => Some(Self::WaitingForApproval),
            Self::WaitingForApproval => Some(Self::InProgress),
            Self::InProgress => Some(Self::Completed),
            Self::Completed => Some(Self::PickedUp),
            Self::PickedUp => None,
        }
    }

    /// Returns whether the device is still in the shop's hands.
    ///
    /// `Completed` and `Picked Up` tickets are closed.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Completed | Self::PickedUp)
    }
}

impl FromStr for TicketStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "checkedin" => Ok(Self::CheckedIn),
            "diagnosing" => Ok(Self::Diagnosing),
            "waitingforapproval" => Ok(Self::WaitingForApproval),
            "inprogress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "pickedup" => Ok(Self::PickedUp),
            _ => Err(DomainError::InvalidTicketStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ticket urgency.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Converts this priority to its persisted string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Urgent => "Urgent",
        }
    }
}

impl FromStr for Priority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" => Ok(Self::Urgent),
            _ => Err(DomainError::InvalidPriority(s.to_string())),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A repair job.
///
/// `ticket_number` is the human-facing number printed on claim tags and is
/// distinct from the internal `id`. `logs` only ever grows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub ticket_number: u32,
    pub customer_id: String,
    pub device_id: String,
    #[serde(default)]
    pub problem_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technician_id: Option<String>,
    pub status: TicketStatus,
    pub priority: Priority,
    #[serde(default)]
    pub internal_notes: String,
    #[serde(default)]
    pub customer_notes: String,
    #[serde(default)]
    pub logs: Vec<TicketLog>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Entity for Ticket {
    const KIND: EntityKind = EntityKind::Ticket;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Fields supplied when checking in a ticket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTicket {
    pub customer_id: String,
    pub device_id: String,
    pub problem_description: String,
    pub technician_id: Option<String>,
    pub status: TicketStatus,
    pub priority: Priority,
    pub internal_notes: String,
    pub customer_notes: String,
}

impl NewTicket {
    /// Produces the stored record with an initial log.
    ///
    /// `created_at` and `updated_at` are both set to `now`.
    #[must_use]
    pub fn into_ticket(
        self,
        id: String,
        ticket_number: u32,
        initial_log: TicketLog,
        now: OffsetDateTime,
    ) -> Ticket {
        Ticket {
            id,
            ticket_number,
            customer_id: self.customer_id,
            device_id: self.device_id,
            problem_description: self.problem_description,
            technician_id: self.technician_id,
            status: self.status,
            priority: self.priority,
            internal_notes: self.internal_notes,
            customer_notes: self.customer_notes,
            logs: vec![initial_log],
            created_at: now,
            updated_at: now,
        }
    }
}
