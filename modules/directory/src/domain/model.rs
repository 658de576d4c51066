use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A customer organization. The row is the tenant: `id` is the value every
/// tenant-scoped entity stores in its tenant column.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub status: OrgStatus,
    pub created_at: DateTime<Utc>,
}

/// Lifecycle state of an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrgStatus {
    Active,
    Suspended,
}

impl OrgStatus {
    /// Storage name of the status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
        }
    }

    /// Parses a storage value; `None` for anything outside the closed set.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "suspended" => Some(Self::Suspended),
            _ => None,
        }
    }
}

/// Payload for creating an organization.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateOrganization {
    pub name: String,
    /// Agent granted a delegation into the new organization, if any.
    #[serde(default)]
    pub initial_agent_id: Option<Uuid>,
}

/// An agent principal's standing grant into one organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Delegation {
    pub tenant_id: Uuid,
    pub agent_id: Uuid,
    pub granted_at: DateTime<Utc>,
}
