use async_trait::async_trait;
use atrium_db::ScopedDb;
use sea_orm::{
    ActiveValue, ColumnTrait, Condition, ConnectionTrait, Order, QueryOrder, QuerySelect,
    sea_query::Expr,
};
use uuid::Uuid;

use crate::domain::model::{Invoice, InvoiceStatus, Plan, StatusRevenue};
use crate::domain::repo::{InvoicesRepository, PlansRepository};

use super::entity::{invoice, plan};

/// `SeaORM` implementation of the billing persistence ports.
#[derive(Clone, Copy, Debug, Default)]
pub struct SeaOrmBillingRepository;

impl SeaOrmBillingRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl InvoicesRepository for SeaOrmBillingRepository {
    async fn insert_invoice<C>(&self, db: &ScopedDb<C>, inv: &Invoice) -> anyhow::Result<()>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let active_model = invoice::ActiveModel {
            id: ActiveValue::Set(inv.id),
            tenant_id: ActiveValue::Set(inv.tenant_id),
            status: ActiveValue::Set(inv.status.as_str().to_owned()),
            amount_cents: ActiveValue::Set(inv.amount_cents),
            issued_at: ActiveValue::Set(inv.issued_at),
        };
        db.insert(active_model).await?;
        Ok(())
    }

    async fn get_invoice<C>(&self, db: &ScopedDb<C>, id: Uuid) -> anyhow::Result<Option<Invoice>>
    where
        C: ConnectionTrait + Send + Sync,
    {
        db.find_by_id::<invoice::Entity>(id)
            .one()
            .await?
            .map(invoice_from_row)
            .transpose()
    }

    async fn list_invoices<C>(
        &self,
        db: &ScopedDb<C>,
        status: Option<InvoiceStatus>,
        limit: u64,
    ) -> anyhow::Result<Vec<Invoice>>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let mut query = db.find::<invoice::Entity>();
        if let Some(status) = status {
            query = query.filter(status_condition(status));
        }
        query
            .order_by(invoice::Column::IssuedAt, Order::Desc)
            .limit(limit)
            .all()
            .await?
            .into_iter()
            .map(invoice_from_row)
            .collect()
    }

    async fn count_invoices<C>(
        &self,
        db: &ScopedDb<C>,
        status: Option<InvoiceStatus>,
    ) -> anyhow::Result<u64>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let mut query = db.find::<invoice::Entity>();
        if let Some(status) = status {
            query = query.filter(status_condition(status));
        }
        Ok(query.count().await?)
    }

    async fn set_status<C>(
        &self,
        db: &ScopedDb<C>,
        id: Uuid,
        status: InvoiceStatus,
    ) -> anyhow::Result<Option<Invoice>>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let active_model = invoice::ActiveModel {
            id: ActiveValue::Set(id),
            tenant_id: ActiveValue::NotSet,
            status: ActiveValue::Set(status.as_str().to_owned()),
            amount_cents: ActiveValue::NotSet,
            issued_at: ActiveValue::NotSet,
        };
        db.update_one(id, active_model)
            .await?
            .map(invoice_from_row)
            .transpose()
    }

    async fn archive_by_status<C>(
        &self,
        db: &ScopedDb<C>,
        status: InvoiceStatus,
    ) -> anyhow::Result<u64>
    where
        C: ConnectionTrait + Send + Sync,
    {
        Ok(db
            .update_many::<invoice::Entity>()
            .col_expr(
                invoice::Column::Status,
                Expr::value(InvoiceStatus::Archived.as_str()),
            )
            .filter(status_condition(status))
            .exec()
            .await?)
    }

    async fn delete_by_status<C>(
        &self,
        db: &ScopedDb<C>,
        status: InvoiceStatus,
    ) -> anyhow::Result<u64>
    where
        C: ConnectionTrait + Send + Sync,
    {
        Ok(db
            .delete_many::<invoice::Entity>()
            .filter(status_condition(status))
            .exec()
            .await?)
    }

    async fn delete_invoice<C>(&self, db: &ScopedDb<C>, id: Uuid) -> anyhow::Result<bool>
    where
        C: ConnectionTrait + Send + Sync,
    {
        Ok(db.delete_by_id::<invoice::Entity>(id).await?)
    }

    async fn revenue_by_status<C>(&self, db: &ScopedDb<C>) -> anyhow::Result<Vec<StatusRevenue>>
    where
        C: ConnectionTrait + Send + Sync,
    {
        // Grouping composes on the unwrapped select; the scope filter is
        // already attached and the statement runs on the same handle's
        // connection.
        let rows: Vec<(String, i64, i64)> = db
            .find::<invoice::Entity>()
            .into_select()
            .select_only()
            .column(invoice::Column::Status)
            .column_as(invoice::Column::AmountCents.sum(), "total_cents")
            .column_as(invoice::Column::Id.count(), "invoice_count")
            .group_by(invoice::Column::Status)
            .order_by(invoice::Column::Status, Order::Asc)
            .into_tuple()
            .all(db.conn())
            .await?;

        rows.into_iter()
            .map(|(status, total_cents, count)| {
                let status = InvoiceStatus::parse(&status).ok_or_else(|| {
                    anyhow::anyhow!("unknown invoice status '{status}' in aggregate")
                })?;
                Ok(StatusRevenue {
                    status,
                    total_cents,
                    invoices: u64::try_from(count).unwrap_or_default(),
                })
            })
            .collect()
    }
}

#[async_trait]
impl PlansRepository for SeaOrmBillingRepository {
    async fn list_plans<C>(&self, db: &ScopedDb<C>) -> anyhow::Result<Vec<Plan>>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let rows = db
            .find::<plan::Entity>()
            .order_by(plan::Column::Code, Order::Asc)
            .all()
            .await?;
        Ok(rows.into_iter().map(plan_from_row).collect())
    }

    async fn get_plan<C>(&self, db: &ScopedDb<C>, id: Uuid) -> anyhow::Result<Option<Plan>>
    where
        C: ConnectionTrait + Send + Sync,
    {
        Ok(db
            .find_by_id::<plan::Entity>(id)
            .one()
            .await?
            .map(plan_from_row))
    }
}

fn status_condition(status: InvoiceStatus) -> Condition {
    Condition::all().add(invoice::Column::Status.eq(status.as_str()))
}

fn invoice_from_row(row: invoice::Model) -> anyhow::Result<Invoice> {
    let status = InvoiceStatus::parse(&row.status).ok_or_else(|| {
        anyhow::anyhow!("unknown invoice status '{}' for {}", row.status, row.id)
    })?;
    Ok(Invoice {
        id: row.id,
        tenant_id: row.tenant_id,
        status,
        amount_cents: row.amount_cents,
        issued_at: row.issued_at,
    })
}

fn plan_from_row(row: plan::Model) -> Plan {
    Plan {
        id: row.id,
        code: row.code,
        name: row.name,
        monthly_cents: row.monthly_cents,
    }
}
