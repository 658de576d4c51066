use async_trait::async_trait;
use atrium_db::ScopedDb;
use sea_orm::ConnectionTrait;
use uuid::Uuid;

use super::model::{Invoice, InvoiceStatus, Plan, StatusRevenue};

/// Persistence port for invoices.
///
/// Every method runs through the caller's [`ScopedDb`] handle and inherits
/// its tenant filter; the repository adds business filters only.
#[async_trait]
pub trait InvoicesRepository: Send + Sync {
    /// Stores a new invoice row exactly as given.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures.
    async fn insert_invoice<C>(&self, db: &ScopedDb<C>, invoice: &Invoice) -> anyhow::Result<()>
    where
        C: ConnectionTrait + Send + Sync;

    /// Loads one invoice if it is visible to the handle's scope.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures.
    async fn get_invoice<C>(&self, db: &ScopedDb<C>, id: Uuid) -> anyhow::Result<Option<Invoice>>
    where
        C: ConnectionTrait + Send + Sync;

    /// Lists visible invoices, newest first, optionally narrowed to one
    /// status.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures.
    async fn list_invoices<C>(
        &self,
        db: &ScopedDb<C>,
        status: Option<InvoiceStatus>,
        limit: u64,
    ) -> anyhow::Result<Vec<Invoice>>
    where
        C: ConnectionTrait + Send + Sync;

    /// Counts visible invoices, optionally narrowed to one status.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures.
    async fn count_invoices<C>(
        &self,
        db: &ScopedDb<C>,
        status: Option<InvoiceStatus>,
    ) -> anyhow::Result<u64>
    where
        C: ConnectionTrait + Send + Sync;

    /// Sets the status of one invoice.
    ///
    /// Returns `None` when the row is not visible to the handle's scope.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures.
    async fn set_status<C>(
        &self,
        db: &ScopedDb<C>,
        id: Uuid,
        status: InvoiceStatus,
    ) -> anyhow::Result<Option<Invoice>>
    where
        C: ConnectionTrait + Send + Sync;

    /// Moves every visible invoice in `status` to `Archived`, returning
    /// how many rows changed.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures.
    async fn archive_by_status<C>(
        &self,
        db: &ScopedDb<C>,
        status: InvoiceStatus,
    ) -> anyhow::Result<u64>
    where
        C: ConnectionTrait + Send + Sync;

    /// Deletes every visible invoice in `status`, returning how many rows
    /// were removed.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures.
    async fn delete_by_status<C>(
        &self,
        db: &ScopedDb<C>,
        status: InvoiceStatus,
    ) -> anyhow::Result<u64>
    where
        C: ConnectionTrait + Send + Sync;

    /// Deletes one invoice; `false` when none was visible.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures.
    async fn delete_invoice<C>(&self, db: &ScopedDb<C>, id: Uuid) -> anyhow::Result<bool>
    where
        C: ConnectionTrait + Send + Sync;

    /// Sums visible invoice amounts grouped by status.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures.
    async fn revenue_by_status<C>(&self, db: &ScopedDb<C>) -> anyhow::Result<Vec<StatusRevenue>>
    where
        C: ConnectionTrait + Send + Sync;
}

/// Persistence port for the plan catalog. Plans are tenant-agnostic; the
/// guard passes these queries through untouched.
#[async_trait]
pub trait PlansRepository: Send + Sync {
    /// Lists the whole catalog, code-ordered.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures.
    async fn list_plans<C>(&self, db: &ScopedDb<C>) -> anyhow::Result<Vec<Plan>>
    where
        C: ConnectionTrait + Send + Sync;

    /// Loads one plan by id.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures.
    async fn get_plan<C>(&self, db: &ScopedDb<C>, id: Uuid) -> anyhow::Result<Option<Plan>>
    where
        C: ConnectionTrait + Send + Sync;
}
