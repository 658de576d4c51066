use async_trait::async_trait;
use atrium_db::ScopedDb;
use sea_orm::ConnectionTrait;
use uuid::Uuid;

use super::model::{Delegation, Organization};

/// Persistence port for the directory domain.
///
/// Every method runs through the caller's [`ScopedDb`] handle; the
/// repository never widens or replaces the scope it is handed. Methods are
/// generic over the connection so the same port works inside a transaction.
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    /// Stores a new organization row.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures.
    async fn insert_organization<C>(
        &self,
        db: &ScopedDb<C>,
        org: &Organization,
    ) -> anyhow::Result<()>
    where
        C: ConnectionTrait + Send + Sync;

    /// Loads one organization if it is visible to the handle's scope.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures.
    async fn get_organization<C>(
        &self,
        db: &ScopedDb<C>,
        id: Uuid,
    ) -> anyhow::Result<Option<Organization>>
    where
        C: ConnectionTrait + Send + Sync;

    /// Lists visible organizations ordered by name.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures.
    async fn list_organizations<C>(
        &self,
        db: &ScopedDb<C>,
        limit: u64,
    ) -> anyhow::Result<Vec<Organization>>
    where
        C: ConnectionTrait + Send + Sync;

    /// Applies `org`'s name and status to its row.
    ///
    /// Returns `None` when the row is not visible to the handle's scope.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures.
    async fn update_organization<C>(
        &self,
        db: &ScopedDb<C>,
        org: &Organization,
    ) -> anyhow::Result<Option<Organization>>
    where
        C: ConnectionTrait + Send + Sync;

    /// Upserts a delegation grant and returns it.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures.
    async fn grant_delegation<C>(
        &self,
        db: &ScopedDb<C>,
        tenant_id: Uuid,
        agent_id: Uuid,
    ) -> anyhow::Result<Delegation>
    where
        C: ConnectionTrait + Send + Sync;

    /// Removes a delegation grant; `false` when none was visible.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures.
    async fn revoke_delegation<C>(
        &self,
        db: &ScopedDb<C>,
        tenant_id: Uuid,
        agent_id: Uuid,
    ) -> anyhow::Result<bool>
    where
        C: ConnectionTrait + Send + Sync;

    /// Lists grants into one tenant, oldest first.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures.
    async fn list_delegations_for_tenant<C>(
        &self,
        db: &ScopedDb<C>,
        tenant_id: Uuid,
    ) -> anyhow::Result<Vec<Delegation>>
    where
        C: ConnectionTrait + Send + Sync;
}
