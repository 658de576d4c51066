use atrium_db::ScopedDb;
use sea_orm::ConnectionTrait;
use tracing::instrument;
use uuid::Uuid;

use crate::config::DirectoryConfig;

use super::error::DomainError;
use super::model::{CreateOrganization, Delegation, OrgStatus, Organization};
use super::repo::DirectoryRepository;

/// Directory domain service.
///
/// Mutations that shape the tenant roster itself (create, suspend, grant,
/// revoke) demand an unrestricted scope: only the owner-admin console runs
/// them. Reads and renames flow through the caller's scope like any other
/// guarded operation, so a tenant member can rename their own organization
/// but never sees anyone else's.
pub struct DirectoryService<R> {
    repo: R,
    config: DirectoryConfig,
}

impl<R> DirectoryService<R>
where
    R: DirectoryRepository,
{
    #[must_use]
    pub fn new(repo: R, config: DirectoryConfig) -> Self {
        Self { repo, config }
    }

    /// Creates an organization and, when requested, its first delegation,
    /// atomically.
    ///
    /// # Errors
    ///
    /// [`DomainError::AdminRequired`] without an unrestricted scope,
    /// [`DomainError::Validation`] for a rejected name, otherwise
    /// persistence failures.
    #[instrument(skip(self, db, req))]
    pub async fn create_organization(
        &self,
        db: &ScopedDb,
        req: CreateOrganization,
    ) -> Result<Organization, DomainError> {
        if !db.scope().is_unrestricted() {
            return Err(DomainError::admin_required("create an organization"));
        }
        self.validate_name(&req.name)?;

        let org = Organization {
            id: Uuid::new_v4(),
            name: req.name,
            status: OrgStatus::Active,
            created_at: chrono::Utc::now(),
        };

        let tx = db.begin().await?;
        self.repo.insert_organization(&tx, &org).await?;
        if let Some(agent_id) = req.initial_agent_id {
            self.repo.grant_delegation(&tx, org.id, agent_id).await?;
        }
        tx.commit().await?;

        tracing::info!(organization = %org.id, "organization created");
        Ok(org)
    }

    /// Loads one organization visible to the caller.
    ///
    /// # Errors
    ///
    /// [`DomainError::OrganizationNotFound`] when the row does not exist or
    /// sits outside the caller's scope; otherwise persistence failures.
    pub async fn get_organization<C>(
        &self,
        db: &ScopedDb<C>,
        id: Uuid,
    ) -> Result<Organization, DomainError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        self.repo
            .get_organization(db, id)
            .await?
            .ok_or(DomainError::OrganizationNotFound { id })
    }

    /// Lists organizations visible to the caller, name-ordered.
    ///
    /// `limit` defaults to the configured page size and is clamped to the
    /// configured maximum.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures.
    pub async fn list_organizations<C>(
        &self,
        db: &ScopedDb<C>,
        limit: Option<u64>,
    ) -> Result<Vec<Organization>, DomainError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let limit = limit
            .unwrap_or(self.config.default_page_size)
            .min(self.config.max_page_size);
        Ok(self.repo.list_organizations(db, limit).await?)
    }

    /// Renames an organization the caller can see.
    ///
    /// # Errors
    ///
    /// [`DomainError::Validation`] for a rejected name,
    /// [`DomainError::OrganizationNotFound`] for an invisible row,
    /// otherwise persistence failures.
    #[instrument(skip(self, db, new_name), fields(organization = %id))]
    pub async fn rename_organization<C>(
        &self,
        db: &ScopedDb<C>,
        id: Uuid,
        new_name: String,
    ) -> Result<Organization, DomainError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        self.validate_name(&new_name)?;

        let mut org = self.get_organization(db, id).await?;
        org.name = new_name;
        let Some(updated) = self.repo.update_organization(db, &org).await? else {
            return Err(DomainError::not_found(id));
        };
        tracing::debug!("organization renamed");
        Ok(updated)
    }

    /// Suspends an organization. Admin-only.
    ///
    /// # Errors
    ///
    /// [`DomainError::AdminRequired`] without an unrestricted scope,
    /// [`DomainError::OrganizationNotFound`] for a missing row, otherwise
    /// persistence failures.
    #[instrument(skip(self, db), fields(organization = %id))]
    pub async fn suspend_organization<C>(
        &self,
        db: &ScopedDb<C>,
        id: Uuid,
    ) -> Result<Organization, DomainError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        if !db.scope().is_unrestricted() {
            return Err(DomainError::admin_required("suspend an organization"));
        }

        let mut org = self.get_organization(db, id).await?;
        org.status = OrgStatus::Suspended;
        let Some(updated) = self.repo.update_organization(db, &org).await? else {
            return Err(DomainError::not_found(id));
        };
        tracing::info!("organization suspended");
        Ok(updated)
    }

    /// Grants `agent_id` a delegation into `tenant_id`. Admin-only.
    ///
    /// # Errors
    ///
    /// [`DomainError::AdminRequired`] without an unrestricted scope,
    /// [`DomainError::OrganizationNotFound`] when the tenant does not
    /// exist, otherwise persistence failures.
    #[instrument(skip(self, db), fields(tenant = %tenant_id, agent = %agent_id))]
    pub async fn grant_delegation<C>(
        &self,
        db: &ScopedDb<C>,
        tenant_id: Uuid,
        agent_id: Uuid,
    ) -> Result<Delegation, DomainError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        if !db.scope().is_unrestricted() {
            return Err(DomainError::admin_required("grant a delegation"));
        }

        self.get_organization(db, tenant_id).await?;
        let grant = self.repo.grant_delegation(db, tenant_id, agent_id).await?;
        tracing::info!("delegation granted");
        Ok(grant)
    }

    /// Revokes a delegation; `false` when none existed. Admin-only.
    ///
    /// # Errors
    ///
    /// [`DomainError::AdminRequired`] without an unrestricted scope,
    /// otherwise persistence failures.
    #[instrument(skip(self, db), fields(tenant = %tenant_id, agent = %agent_id))]
    pub async fn revoke_delegation<C>(
        &self,
        db: &ScopedDb<C>,
        tenant_id: Uuid,
        agent_id: Uuid,
    ) -> Result<bool, DomainError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        if !db.scope().is_unrestricted() {
            return Err(DomainError::admin_required("revoke a delegation"));
        }

        let removed = self.repo.revoke_delegation(db, tenant_id, agent_id).await?;
        if removed {
            tracing::info!("delegation revoked");
        }
        Ok(removed)
    }

    /// Lists the delegations granted into one tenant.
    ///
    /// Scope-governed: asking about a tenant outside the caller's scope
    /// yields an empty list, indistinguishable from a tenant with no
    /// grants.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures.
    pub async fn list_delegations_for_tenant<C>(
        &self,
        db: &ScopedDb<C>,
        tenant_id: Uuid,
    ) -> Result<Vec<Delegation>, DomainError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        Ok(self.repo.list_delegations_for_tenant(db, tenant_id).await?)
    }

    fn validate_name(&self, name: &str) -> Result<(), DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::validation("name", "must not be empty"));
        }
        if name.len() > self.config.max_name_length {
            return Err(DomainError::validation(
                "name",
                format!("exceeds maximum length of {}", self.config.max_name_length),
            ));
        }
        Ok(())
    }
}
