use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A tenant-scoped invoice.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub status: InvoiceStatus,
    pub amount_cents: i64,
    pub issued_at: DateTime<Utc>,
}

/// Closed set of invoice states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Issued,
    Paid,
    Archived,
}

impl InvoiceStatus {
    /// Storage name of the status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Issued => "issued",
            Self::Paid => "paid",
            Self::Archived => "archived",
        }
    }

    /// Parses a storage value; `None` for anything outside the closed set.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(Self::Draft),
            "issued" => Some(Self::Issued),
            "paid" => Some(Self::Paid),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }
}

/// Payload for creating an invoice. The tenant id is part of the payload
/// and validated against the caller's scope before the insert; the guard
/// itself never rewrites creation payloads.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct CreateInvoice {
    pub tenant_id: Uuid,
    pub amount_cents: i64,
}

/// A subscription plan from the global catalog. No tenant column; never
/// filtered.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Plan {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub monthly_cents: i64,
}

/// One row of the revenue-by-status aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StatusRevenue {
    pub status: InvoiceStatus,
    pub total_cents: i64,
    pub invoices: u64,
}
