use uuid::Uuid;

/// Role attached to an authenticated caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Operator-side administrator with console-wide reach.
    OwnerAdmin,
    /// Support agent acting on explicitly delegated tenants.
    DelegatedAgent,
    /// Regular user belonging to a single tenant.
    TenantMember,
}

impl Role {
    /// Parses the wire form of a role; unknown strings yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "owner-admin" => Some(Self::OwnerAdmin),
            "delegated-agent" => Some(Self::DelegatedAgent),
            "tenant-member" => Some(Self::TenantMember),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OwnerAdmin => "owner-admin",
            Self::DelegatedAgent => "delegated-agent",
            Self::TenantMember => "tenant-member",
        }
    }
}

/// Raw claims carried by an authenticated session.
///
/// The role arrives as a free-form string; turning it into a [`Role`]
/// happens in [`Principal::from_claims`] so that unknown or missing values
/// degrade to a deny-all principal instead of an error.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SessionClaims {
    pub subject_id: Uuid,
    pub role: String,
    #[serde(default)]
    pub home_tenant_id: Option<Uuid>,
}

/// An authenticated caller as seen by the access-control layer.
///
/// Construction is total: malformed sessions produce a principal with no
/// recognized role, which the scope resolver maps to deny-all. Nothing in
/// this type can fail or panic.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Principal {
    pub(crate) id: Uuid,
    pub(crate) role: Option<Role>,
    pub(crate) home_tenant_id: Option<Uuid>,
}

impl Principal {
    #[must_use]
    pub fn new(id: Uuid, role: Role) -> Self {
        Self {
            id,
            role: Some(role),
            home_tenant_id: None,
        }
    }

    /// A principal whose session carried no recognizable role.
    #[must_use]
    pub fn without_role(id: Uuid) -> Self {
        Self {
            id,
            role: None,
            home_tenant_id: None,
        }
    }

    /// Attaches the home tenant recorded for this caller.
    #[must_use]
    pub fn with_home_tenant(mut self, tenant_id: Uuid) -> Self {
        self.home_tenant_id = Some(tenant_id);
        self
    }

    /// Builds a principal from raw session claims.
    ///
    /// An unknown role string is kept as "no role" rather than rejected;
    /// the resolver treats such principals as deny-all.
    #[must_use]
    pub fn from_claims(claims: &SessionClaims) -> Self {
        Self {
            id: claims.subject_id,
            role: Role::parse(&claims.role),
            home_tenant_id: claims.home_tenant_id,
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    #[inline]
    #[must_use]
    pub fn home_tenant_id(&self) -> Option<Uuid> {
        self.home_tenant_id
    }
}
