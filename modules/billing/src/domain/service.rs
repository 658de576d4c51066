use atrium_db::ScopedDb;
use sea_orm::ConnectionTrait;
use tracing::instrument;
use uuid::Uuid;

use crate::config::BillingConfig;

use super::error::DomainError;
use super::model::{CreateInvoice, Invoice, InvoiceStatus, Plan, StatusRevenue};
use super::repo::{InvoicesRepository, PlansRepository};

/// Billing domain service.
///
/// Carries no authorization logic of its own beyond payload validation:
/// whatever the caller's [`ScopedDb`] lets through is what this service
/// operates on. A caller outside a tenant simply sees no rows there, the
/// same answer an empty tenant would produce.
pub struct BillingService<R> {
    repo: R,
    config: BillingConfig,
}

impl<R> BillingService<R>
where
    R: InvoicesRepository + PlansRepository,
{
    #[must_use]
    pub fn new(repo: R, config: BillingConfig) -> Self {
        Self { repo, config }
    }

    /// Loads one invoice visible to the caller.
    ///
    /// # Errors
    ///
    /// [`DomainError::InvoiceNotFound`] when the row does not exist or
    /// sits outside the caller's scope; otherwise persistence failures.
    pub async fn get_invoice<C>(&self, db: &ScopedDb<C>, id: Uuid) -> Result<Invoice, DomainError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        self.repo
            .get_invoice(db, id)
            .await?
            .ok_or(DomainError::InvoiceNotFound { id })
    }

    /// Lists visible invoices, newest first, optionally narrowed to one
    /// status.
    ///
    /// `limit` defaults to the configured page size and is clamped to the
    /// configured maximum.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures.
    pub async fn list_invoices<C>(
        &self,
        db: &ScopedDb<C>,
        status: Option<InvoiceStatus>,
        limit: Option<u64>,
    ) -> Result<Vec<Invoice>, DomainError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let limit = limit
            .unwrap_or(self.config.default_page_size)
            .min(self.config.max_page_size);
        Ok(self.repo.list_invoices(db, status, limit).await?)
    }

    /// Counts visible invoices, optionally narrowed to one status.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures.
    pub async fn count_invoices<C>(
        &self,
        db: &ScopedDb<C>,
        status: Option<InvoiceStatus>,
    ) -> Result<u64, DomainError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        Ok(self.repo.count_invoices(db, status).await?)
    }

    /// Creates a draft invoice after validating the payload.
    ///
    /// The tenant id travels in the payload; it is checked against the
    /// caller's scope here because creation is the one operation the guard
    /// passes through unfiltered.
    ///
    /// # Errors
    ///
    /// [`DomainError::Validation`] for a non-positive amount,
    /// [`DomainError::TenantForbidden`] when the payload names a tenant
    /// outside the caller's scope, otherwise persistence failures.
    #[instrument(skip(self, db), fields(tenant = %req.tenant_id))]
    pub async fn create_invoice<C>(
        &self,
        db: &ScopedDb<C>,
        req: CreateInvoice,
    ) -> Result<Invoice, DomainError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        if req.amount_cents <= 0 {
            return Err(DomainError::validation("amount_cents", "must be positive"));
        }
        db.ensure_tenant_allowed(req.tenant_id)?;

        let invoice = Invoice {
            id: Uuid::new_v4(),
            tenant_id: req.tenant_id,
            status: InvoiceStatus::Draft,
            amount_cents: req.amount_cents,
            issued_at: chrono::Utc::now(),
        };
        self.repo.insert_invoice(db, &invoice).await?;
        tracing::info!(invoice = %invoice.id, "invoice created");
        Ok(invoice)
    }

    /// Marks an issued invoice as paid.
    ///
    /// # Errors
    ///
    /// [`DomainError::InvoiceNotFound`] for an invisible row,
    /// [`DomainError::Validation`] when the invoice is not in the issued
    /// state, otherwise persistence failures.
    #[instrument(skip(self, db), fields(invoice = %id))]
    pub async fn mark_paid<C>(&self, db: &ScopedDb<C>, id: Uuid) -> Result<Invoice, DomainError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let invoice = self.get_invoice(db, id).await?;
        if invoice.status != InvoiceStatus::Issued {
            return Err(DomainError::validation(
                "status",
                format!(
                    "only issued invoices can be paid, this one is {}",
                    invoice.status.as_str()
                ),
            ));
        }
        let Some(updated) = self.repo.set_status(db, id, InvoiceStatus::Paid).await? else {
            return Err(DomainError::invoice_not_found(id));
        };
        tracing::info!("invoice paid");
        Ok(updated)
    }

    /// Archives every visible invoice currently in `status`.
    ///
    /// # Errors
    ///
    /// [`DomainError::Validation`] when asked to archive already-archived
    /// rows, otherwise persistence failures.
    #[instrument(skip(self, db), fields(from = status.as_str()))]
    pub async fn archive_invoices<C>(
        &self,
        db: &ScopedDb<C>,
        status: InvoiceStatus,
    ) -> Result<u64, DomainError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        if status == InvoiceStatus::Archived {
            return Err(DomainError::validation("status", "rows are already archived"));
        }
        let changed = self.repo.archive_by_status(db, status).await?;
        tracing::info!(rows = changed, "invoices archived");
        Ok(changed)
    }

    /// Deletes every visible archived invoice, returning how many went.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures.
    #[instrument(skip(self, db))]
    pub async fn purge_archived<C>(&self, db: &ScopedDb<C>) -> Result<u64, DomainError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let removed = self.repo.delete_by_status(db, InvoiceStatus::Archived).await?;
        tracing::info!(rows = removed, "archived invoices purged");
        Ok(removed)
    }

    /// Deletes one invoice; `false` when no visible row matched.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures.
    #[instrument(skip(self, db), fields(invoice = %id))]
    pub async fn delete_invoice<C>(&self, db: &ScopedDb<C>, id: Uuid) -> Result<bool, DomainError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let removed = self.repo.delete_invoice(db, id).await?;
        if removed {
            tracing::info!("invoice deleted");
        }
        Ok(removed)
    }

    /// Sums visible invoice amounts grouped by status.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures.
    pub async fn revenue_by_status<C>(
        &self,
        db: &ScopedDb<C>,
    ) -> Result<Vec<StatusRevenue>, DomainError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        Ok(self.repo.revenue_by_status(db).await?)
    }

    /// Lists the plan catalog. Tenant-agnostic: every caller sees the full
    /// set, whatever their scope.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures.
    pub async fn list_plans<C>(&self, db: &ScopedDb<C>) -> Result<Vec<Plan>, DomainError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        Ok(self.repo.list_plans(db).await?)
    }

    /// Loads one plan from the catalog.
    ///
    /// # Errors
    ///
    /// [`DomainError::PlanNotFound`] for a missing id; otherwise
    /// persistence failures.
    pub async fn get_plan<C>(&self, db: &ScopedDb<C>, id: Uuid) -> Result<Plan, DomainError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        self.repo
            .get_plan(db, id)
            .await?
            .ok_or(DomainError::PlanNotFound { id })
    }
}
