// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::entity::{Entity, EntityKind};
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Lowercases and strips separators so `"Front Desk"`, `"front-desk"` and
/// `"FRONT_DESK"` all parse the same way.
pub(crate) fn normalize_token(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Staff roles.
///
/// Roles govern which administrative operations a signed-in user may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Shop owner or manager. May manage staff, import data and delete records.
    Admin,
    /// Bench technician.
    Technician,
    /// Counter staff handling intake, billing and scheduling.
    #[serde(rename = "Front Desk")]
    FrontDesk,
}

impl Role {
    /// Converts this role to its persisted string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Technician => "Technician",
            Self::FrontDesk => "Front Desk",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "admin" => Ok(Self::Admin),
            "technician" | "tech" => Ok(Self::Technician),
            "frontdesk" => Ok(Self::FrontDesk),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A staff member who can sign in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub email: String,
    /// Sign-in password, stored as entered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Entity for User {
    const KIND: EntityKind = EntityKind::User;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Fields supplied when creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub role: Role,
    pub email: String,
    pub password: Option<String>,
}

impl NewUser {
    /// Attaches an id, producing the stored record.
    #[must_use]
    pub fn into_user(self, id: String) -> User {
        User {
            id,
            name: self.name,
            role: self.role,
            email: self.email,
            password: self.password,
        }
    }
}

/// A customer of the shop.
///
/// `id` and `created_at` never change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub membership_id: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Customer {
    /// Returns `"First Last"`, trimmed when either part is empty.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl Entity for Customer {
    const KIND: EntityKind = EntityKind::Customer;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Fields supplied when creating a customer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub notes: String,
    pub tags: Vec<String>,
    pub membership_id: Option<String>,
}

impl NewCustomer {
    /// Attaches an id and creation time, producing the stored record.
    #[must_use]
    pub fn into_customer(self, id: String, created_at: OffsetDateTime) -> Customer {
        Customer {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            notes: self.notes,
            tags: self.tags,
            membership_id: self.membership_id,
            created_at,
        }
    }
}

/// Kinds of device the shop repairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DeviceType {
    Laptop,
    Desktop,
    Phone,
    Tablet,
    Console,
    #[default]
    Other,
}

impl DeviceType {
    /// Converts this device type to its persisted string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Laptop => "Laptop",
            Self::Desktop => "Desktop",
            Self::Phone => "Phone",
            Self::Tablet => "Tablet",
            Self::Console => "Console",
            Self::Other => "Other",
        }
    }
}

impl FromStr for DeviceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "laptop" => Ok(Self::Laptop),
            "desktop" => Ok(Self::Desktop),
            "phone" => Ok(Self::Phone),
            "tablet" => Ok(Self::Tablet),
            "console" => Ok(Self::Console),
            "other" => Ok(Self::Other),
            _ => Err(DomainError::InvalidDeviceType(s.to_string())),
        }
    }
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A customer-owned device.
///
/// `customer_id` is not checked against the customer list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub customer_id: String,
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub serial_number: String,
    #[serde(default)]
    pub os: String,
    /// Unlock code or login the customer left with the device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub accessories: String,
    #[serde(default)]
    pub notes: String,
}

impl Device {
    /// Returns `"Brand Model"`, trimmed when either part is empty.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.brand, self.model).trim().to_string()
    }
}

impl Entity for Device {
    const KIND: EntityKind = EntityKind::Device;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Fields supplied when registering a device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewDevice {
    pub customer_id: String,
    pub device_type: DeviceType,
    pub brand: String,
    pub model: String,
    pub serial_number: String,
    pub os: String,
    pub password: Option<String>,
    pub accessories: String,
    pub notes: String,
}

impl NewDevice {
    /// Attaches an id, producing the stored record.
    #[must_use]
    pub fn into_device(self, id: String) -> Device {
        Device {
            id,
            customer_id: self.customer_id,
            device_type: self.device_type,
            brand: self.brand,
            model: self.model,
            serial_number: self.serial_number,
            os: self.os,
            password: self.password,
            accessories: self.accessories,
            notes: self.notes,
        }
    }
}

/// A scheduled visit.
///
/// `date` and `time` are kept as entered (`YYYY-MM-DD`, `HH:MM`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub customer_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub notes: String,
}

impl Entity for Appointment {
    const KIND: EntityKind = EntityKind::Appointment;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Fields supplied when booking an appointment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewAppointment {
    pub customer_id: String,
    pub ticket_id: Option<String>,
    pub title: String,
    pub date: String,
    pub time: String,
    pub notes: String,
}

impl NewAppointment {
    /// Attaches an id, producing the stored record.
    #[must_use]
    pub fn into_appointment(self, id: String) -> Appointment {
        Appointment {
            id,
            customer_id: self.customer_id,
            ticket_id: self.ticket_id,
            title: self.title,
            date: self.date,
            time: self.time,
            notes: self.notes,
        }
    }
}
