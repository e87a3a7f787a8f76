// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// The six persisted entity families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Customer,
    Device,
    Ticket,
    Invoice,
    Appointment,
    User,
}

impl EntityKind {
    /// Returns the display name of this entity kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::Device => "Device",
            Self::Ticket => "Ticket",
            Self::Invoice => "Invoice",
            Self::Appointment => "Appointment",
            Self::User => "User",
        }
    }

    /// Returns the prefix used for generated ids of this kind.
    #[must_use]
    pub const fn id_prefix(&self) -> &'static str {
        match self {
            Self::Customer => "c",
            Self::Device => "d",
            Self::Ticket => "t",
            Self::Invoice => "i",
            Self::Appointment => "a",
            Self::User => "u",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted record addressable by its opaque string id.
pub trait Entity {
    /// The family this record belongs to.
    const KIND: EntityKind;

    /// Returns the record's id.
    fn id(&self) -> &str;
}
