use async_trait::async_trait;
use atrium_db::ScopedDb;
use chrono::Utc;
use sea_orm::{
    ActiveValue, ColumnTrait, Condition, ConnectionTrait, EntityTrait, Order,
    sea_query::OnConflict,
};
use uuid::Uuid;

use crate::domain::model::{Delegation, OrgStatus, Organization};
use crate::domain::repo::DirectoryRepository;

use super::entity::{delegation, organization};

/// `SeaORM` implementation of the directory persistence port.
#[derive(Clone, Copy, Debug, Default)]
pub struct SeaOrmDirectoryRepository;

impl SeaOrmDirectoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DirectoryRepository for SeaOrmDirectoryRepository {
    async fn insert_organization<C>(
        &self,
        db: &ScopedDb<C>,
        org: &Organization,
    ) -> anyhow::Result<()>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let active_model = organization::ActiveModel {
            id: ActiveValue::Set(org.id),
            name: ActiveValue::Set(org.name.clone()),
            status: ActiveValue::Set(org.status.as_str().to_owned()),
            created_at: ActiveValue::Set(org.created_at),
        };
        db.insert(active_model).await?;
        Ok(())
    }

    async fn get_organization<C>(
        &self,
        db: &ScopedDb<C>,
        id: Uuid,
    ) -> anyhow::Result<Option<Organization>>
    where
        C: ConnectionTrait + Send + Sync,
    {
        db.find_by_id::<organization::Entity>(id)
            .one()
            .await?
            .map(organization_from_row)
            .transpose()
    }

    async fn list_organizations<C>(
        &self,
        db: &ScopedDb<C>,
        limit: u64,
    ) -> anyhow::Result<Vec<Organization>>
    where
        C: ConnectionTrait + Send + Sync,
    {
        db.find::<organization::Entity>()
            .order_by(organization::Column::Name, Order::Asc)
            .limit(limit)
            .all()
            .await?
            .into_iter()
            .map(organization_from_row)
            .collect()
    }

    async fn update_organization<C>(
        &self,
        db: &ScopedDb<C>,
        org: &Organization,
    ) -> anyhow::Result<Option<Organization>>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let active_model = organization::ActiveModel {
            id: ActiveValue::Set(org.id),
            name: ActiveValue::Set(org.name.clone()),
            status: ActiveValue::Set(org.status.as_str().to_owned()),
            created_at: ActiveValue::NotSet,
        };
        db.update_one(org.id, active_model)
            .await?
            .map(organization_from_row)
            .transpose()
    }

    async fn grant_delegation<C>(
        &self,
        db: &ScopedDb<C>,
        tenant_id: Uuid,
        agent_id: Uuid,
    ) -> anyhow::Result<Delegation>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let active_model = delegation::ActiveModel {
            tenant_id: ActiveValue::Set(tenant_id),
            agent_id: ActiveValue::Set(agent_id),
            granted_at: ActiveValue::Set(Utc::now()),
        };

        // Creates are never filtered; the on-conflict form runs on the raw
        // connection because upserts are not part of the facade surface.
        delegation::Entity::insert(active_model)
            .on_conflict(
                OnConflict::columns([delegation::Column::TenantId, delegation::Column::AgentId])
                    .update_column(delegation::Column::GrantedAt)
                    .to_owned(),
            )
            .exec(db.conn())
            .await?;

        let row = db
            .find_by_id::<delegation::Entity>((tenant_id, agent_id))
            .one()
            .await?
            .ok_or_else(|| anyhow::anyhow!("delegation should exist after upsert"))?;

        Ok(delegation_from_row(row))
    }

    async fn revoke_delegation<C>(
        &self,
        db: &ScopedDb<C>,
        tenant_id: Uuid,
        agent_id: Uuid,
    ) -> anyhow::Result<bool>
    where
        C: ConnectionTrait + Send + Sync,
    {
        Ok(db
            .delete_by_id::<delegation::Entity>((tenant_id, agent_id))
            .await?)
    }

    async fn list_delegations_for_tenant<C>(
        &self,
        db: &ScopedDb<C>,
        tenant_id: Uuid,
    ) -> anyhow::Result<Vec<Delegation>>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let rows = db
            .find::<delegation::Entity>()
            .filter(Condition::all().add(delegation::Column::TenantId.eq(tenant_id)))
            .order_by(delegation::Column::GrantedAt, Order::Asc)
            .all()
            .await?;

        Ok(rows.into_iter().map(delegation_from_row).collect())
    }
}

fn organization_from_row(row: organization::Model) -> anyhow::Result<Organization> {
    let status = OrgStatus::parse(&row.status).ok_or_else(|| {
        anyhow::anyhow!("unknown organization status '{}' for {}", row.status, row.id)
    })?;
    Ok(Organization {
        id: row.id,
        name: row.name,
        status,
        created_at: row.created_at,
    })
}

fn delegation_from_row(row: delegation::Model) -> Delegation {
    Delegation {
        tenant_id: row.tenant_id,
        agent_id: row.agent_id,
        granted_at: row.granted_at,
    }
}
