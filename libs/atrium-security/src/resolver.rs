use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;
use uuid::Uuid;

use crate::{AccessScope, Principal, Role};

/// Source of delegation grants for support agents.
///
/// The resolver stays storage-agnostic behind this port; the directory
/// module provides the SeaORM-backed implementation.
#[async_trait]
pub trait DelegationLookup: Send + Sync {
    /// All tenant ids currently delegated to `agent_id`.
    ///
    /// An agent with no grants yields an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::DelegationLookup`] when the underlying
    /// store cannot be queried.
    async fn delegated_tenant_ids(&self, agent_id: Uuid) -> Result<Vec<Uuid>, ResolveError>;
}

/// Failure while resolving the scope of a principal.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The delegation store could not be queried.
    #[error("delegation lookup failed: {0}")]
    DelegationLookup(String),
}

/// Maps an authenticated principal to its tenant scope.
///
/// This is the only place where roles translate into data visibility.
/// Everything downstream consumes the returned [`AccessScope`] and never
/// inspects roles again.
#[derive(Clone)]
pub struct ScopeResolver {
    delegations: Arc<dyn DelegationLookup>,
}

impl ScopeResolver {
    #[must_use]
    pub fn new(delegations: Arc<dyn DelegationLookup>) -> Self {
        Self { delegations }
    }

    /// Resolves the scope for `principal`.
    ///
    /// Anomalous principals (no recognized role, or a member without a
    /// home tenant) resolve to deny-all rather than an error. The only
    /// failure mode is the delegation store being unavailable.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::DelegationLookup`] when delegation grants
    /// cannot be read for a delegated agent.
    #[instrument(
        skip(self, principal),
        fields(
            principal_id = %principal.id(),
            role = principal.role().map_or("none", Role::as_str),
        )
    )]
    pub async fn resolve(&self, principal: &Principal) -> Result<AccessScope, ResolveError> {
        match principal.role() {
            Some(Role::OwnerAdmin) => Ok(AccessScope::Unrestricted),
            Some(Role::DelegatedAgent) => {
                let tenants = self
                    .delegations
                    .delegated_tenant_ids(principal.id())
                    .await?;
                tracing::debug!(count = tenants.len(), "resolved delegated tenants");
                Ok(AccessScope::tenants(tenants))
            }
            Some(Role::TenantMember) => match principal.home_tenant_id() {
                Some(home) => Ok(AccessScope::tenant(home)),
                None => {
                    tracing::warn!("tenant member has no home tenant, denying all access");
                    Ok(AccessScope::deny_all())
                }
            },
            None => {
                tracing::warn!("principal carries no recognized role, denying all access");
                Ok(AccessScope::deny_all())
            }
        }
    }
}
