use std::collections::BTreeSet;

use uuid::Uuid;

/// The set of tenants a request is allowed to touch.
///
/// A scope is computed once per request and never widens afterwards. The
/// `RestrictedTo` variant carries an explicit tenant set; when that set is
/// empty the scope matches no tenant at all, so every scoped query returns
/// nothing instead of failing.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AccessScope {
    /// No tenant filtering. Reserved for operator-side administrators.
    Unrestricted,
    /// Access limited to the given tenants. An empty set denies everything.
    RestrictedTo(BTreeSet<Uuid>),
}

impl Default for AccessScope {
    /// Defaults to denying everything.
    fn default() -> Self {
        Self::deny_all()
    }
}

impl AccessScope {
    /// Scope covering a single tenant.
    #[must_use]
    pub fn tenant(tenant_id: Uuid) -> Self {
        Self::RestrictedTo(BTreeSet::from([tenant_id]))
    }

    /// Scope covering the given tenants. Duplicates collapse.
    #[must_use]
    pub fn tenants<I>(tenant_ids: I) -> Self
    where
        I: IntoIterator<Item = Uuid>,
    {
        Self::RestrictedTo(tenant_ids.into_iter().collect())
    }

    /// Scope matching no tenant at all.
    #[must_use]
    pub fn deny_all() -> Self {
        Self::RestrictedTo(BTreeSet::new())
    }

    #[inline]
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Self::Unrestricted)
    }

    /// Returns true if this scope cannot match any tenant.
    #[must_use]
    pub fn is_deny_all(&self) -> bool {
        matches!(self, Self::RestrictedTo(tenants) if tenants.is_empty())
    }

    /// Returns true if `tenant_id` falls inside this scope.
    #[must_use]
    pub fn allows_tenant(&self, tenant_id: Uuid) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::RestrictedTo(tenants) => tenants.contains(&tenant_id),
        }
    }

    /// The explicit tenant set, or `None` when unrestricted.
    #[must_use]
    pub fn tenant_ids(&self) -> Option<&BTreeSet<Uuid>> {
        match self {
            Self::Unrestricted => None,
            Self::RestrictedTo(tenants) => Some(tenants),
        }
    }
}
