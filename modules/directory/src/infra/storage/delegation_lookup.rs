use async_trait::async_trait;
use atrium_security::{DelegationLookup, ResolveError};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect};
use uuid::Uuid;

use super::entity::delegation;

/// Delegation query behind the scope resolver.
///
/// Runs on the raw connection: the resolver executes before any
/// [`atrium_security::AccessScope`] exists, so there is nothing to scope by
/// yet. This is the documented exception to facade-only data access.
pub struct SeaOrmDelegationLookup {
    conn: DatabaseConnection,
}

impl SeaOrmDelegationLookup {
    #[must_use]
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl DelegationLookup for SeaOrmDelegationLookup {
    async fn delegated_tenant_ids(&self, agent_id: Uuid) -> Result<Vec<Uuid>, ResolveError> {
        delegation::Entity::find()
            .select_only()
            .column(delegation::Column::TenantId)
            .filter(delegation::Column::AgentId.eq(agent_id))
            .into_tuple::<Uuid>()
            .all(&self.conn)
            .await
            .map_err(|e| ResolveError::DelegationLookup(e.to_string()))
    }
}
