// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::entity::{Entity, EntityKind};
use crate::error::DomainError;
use crate::types::normalize_token;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Sales tax applied to taxable line items when tax is enabled.
pub const DEFAULT_TAX_RATE: f64 = 0.0825;

/// Differences smaller than half a cent are treated as settled.
const CENT_TOLERANCE: f64 = 0.005;

/// How a line item is billed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LineItemKind {
    #[default]
    Labor,
    Part,
    #[serde(rename = "Flat Rate")]
    FlatRate,
}

impl LineItemKind {
    /// Converts this kind to its persisted string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Labor => "Labor",
            Self::Part => "Part",
            Self::FlatRate => "Flat Rate",
        }
    }
}

impl FromStr for LineItemKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "labor" | "labour" => Ok(Self::Labor),
            "part" => Ok(Self::Part),
            "flatrate" | "flat" => Ok(Self::FlatRate),
            _ => Err(DomainError::InvalidLineItemKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for LineItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A billable unit on an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Line item id. Left empty by callers; the store fills it in.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    #[serde(rename = "type")]
    pub kind: LineItemKind,
    #[serde(default)]
    pub is_taxable: bool,
}

impl LineItem {
    /// Creates a line item without an id.
    #[must_use]
    pub const fn new(
        description: String,
        quantity: f64,
        unit_price: f64,
        kind: LineItemKind,
        is_taxable: bool,
    ) -> Self {
        Self {
            id: String::new(),
            description,
            quantity,
            unit_price,
            kind,
            is_taxable,
        }
    }

    /// Returns `quantity * unit_price`.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

/// Invoice lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
    #[serde(rename = "Partially Paid")]
    PartiallyPaid,
    Unpaid,
}

impl InvoiceStatus {
    /// Converts this status to its persisted string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Sent => "Sent",
            Self::Paid => "Paid",
            Self::PartiallyPaid => "Partially Paid",
            Self::Unpaid => "Unpaid",
        }
    }
}

impl FromStr for InvoiceStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "draft" => Ok(Self::Draft),
            "sent" => Ok(Self::Sent),
            "paid" => Ok(Self::Paid),
            "partiallypaid" | "partial" => Ok(Self::PartiallyPaid),
            "unpaid" => Ok(Self::Unpaid),
            _ => Err(DomainError::InvalidInvoiceStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A bill for a ticket.
///
/// `subtotal`, `tax`, `discount` and `total` are stored as given. The store
/// does not reconcile them with `items`; use [`compute_totals`] to derive them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub ticket_id: String,
    pub customer_id: String,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub tax: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_tax_enabled: Option<bool>,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub total: f64,
    pub status: InvoiceStatus,
    #[serde(default)]
    pub amount_paid: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Invoice {
    /// Returns the unpaid remainder, never negative.
    #[must_use]
    pub fn balance_due(&self) -> f64 {
        round_to_cents((self.total - self.amount_paid).max(0.0))
    }

    /// Whether tax applies. Invoices that predate the flag are taxed.
    #[must_use]
    pub fn tax_enabled(&self) -> bool {
        self.is_tax_enabled.unwrap_or(true)
    }
}

impl Entity for Invoice {
    const KIND: EntityKind = EntityKind::Invoice;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Fields supplied when raising an invoice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewInvoice {
    pub ticket_id: String,
    pub customer_id: String,
    pub items: Vec<LineItem>,
    pub subtotal: f64,
    pub tax: f64,
    pub is_tax_enabled: Option<bool>,
    pub discount: f64,
    pub total: f64,
    pub status: InvoiceStatus,
    pub amount_paid: f64,
}

impl NewInvoice {
    /// Overwrites the derived money fields with totals computed from the items.
    #[must_use]
    pub fn with_totals(mut self, totals: InvoiceTotals) -> Self {
        self.subtotal = totals.subtotal;
        self.tax = totals.tax;
        self.discount = totals.discount;
        self.total = totals.total;
        self
    }

    /// Attaches an id and creation time, producing the stored record.
    #[must_use]
    pub fn into_invoice(self, id: String, created_at: OffsetDateTime) -> Invoice {
        Invoice {
            id,
            ticket_id: self.ticket_id,
            customer_id: self.customer_id,
            items: self.items,
            subtotal: self.subtotal,
            tax: self.tax,
            is_tax_enabled: self.is_tax_enabled,
            discount: self.discount,
            total: self.total,
            status: self.status,
            amount_paid: self.amount_paid,
            created_at,
        }
    }
}

/// Money fields derived from an invoice's line items.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvoiceTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub discount: f64,
    pub total: f64,
}

/// Rounds to the nearest cent.
#[must_use]
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Computes invoice totals from line items.
///
/// Tax is charged on taxable items only and only when `tax_enabled`. The
/// total is `subtotal + tax - discount`, floored at zero. Every figure is
/// rounded to cents.
///
/// # Arguments
///
/// * `items` - The invoice line items
/// * `tax_enabled` - Whether tax applies to this invoice
/// * `tax_rate` - The rate applied to the taxable base (e.g. `0.0825`)
/// * `discount` - A flat amount taken off the total
#[must_use]
pub fn compute_totals(
    items: &[LineItem],
    tax_enabled: bool,
    tax_rate: f64,
    discount: f64,
) -> InvoiceTotals {
    let subtotal: f64 = round_to_cents(items.iter().map(LineItem::amount).sum());
    let taxable: f64 = items
        .iter()
        .filter(|item| item.is_taxable)
        .map(LineItem::amount)
        .sum();
    let tax: f64 = if tax_enabled {
        round_to_cents(taxable * tax_rate)
    } else {
        0.0
    };
    let discount: f64 = round_to_cents(discount.max(0.0));
    let total: f64 = round_to_cents((subtotal + tax - discount).max(0.0));

    InvoiceTotals {
        subtotal,
        tax,
        discount,
        total,
    }
}

/// Derives the payment status from what has been collected so far.
#[must_use]
pub fn payment_status(total: f64, amount_paid: f64) -> InvoiceStatus {
    if amount_paid >= total - CENT_TOLERANCE && (amount_paid > 0.0 || total <= 0.0) {
        InvoiceStatus::Paid
    } else if amount_paid > 0.0 {
        InvoiceStatus::PartiallyPaid
    } else {
        InvoiceStatus::Unpaid
    }
}
