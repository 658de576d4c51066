//! Scoped database handle shared by every module.
//!
//! Services never touch a raw `DatabaseConnection`. A request resolves its
//! [`AccessScope`] once, wraps the connection in a [`ScopedDb`], and every
//! query built from that handle carries the tenant membership filter from
//! the start. There is no way to forget the filter on one call site because
//! no call site attaches it by hand.
//!
//! # Example
//!
//! ```ignore
//! let db = ScopedDb::new(conn, scope);
//!
//! let open = db
//!     .find::<invoice::Entity>()
//!     .filter(Condition::all().add(invoice::Column::Status.eq("issued")))
//!     .all()
//!     .await?;
//!
//! let archived = db
//!     .update_many::<invoice::Entity>()
//!     .col_expr(invoice::Column::Status, Expr::value("archived"))
//!     .filter(Condition::all().add(invoice::Column::Status.eq("paid")))
//!     .exec()
//!     .await?;
//! ```

use atrium_security::AccessScope;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, Condition, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, EntityTrait, IntoActiveModel, PaginatorTrait, PrimaryKeyTrait,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait, sea_query::SimpleExpr,
};
use uuid::Uuid;

use crate::entity_meta::TenantAware;
use crate::error::IsolationError;
use crate::guard::apply_scope;

/// Primary-key value type of entity `E`.
pub type PrimaryKeyOf<E> = <<E as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType;

/// Database handle bound to one request's access scope.
///
/// The scope is fixed at construction and cannot be replaced or widened
/// afterwards; a request that needs a different scope builds a new handle.
/// Generic over the connection so the same handle shape works inside a
/// transaction (`ScopedDb<DatabaseTransaction>`).
#[derive(Clone)]
pub struct ScopedDb<C = DatabaseConnection> {
    conn: C,
    scope: AccessScope,
}

impl<C> ScopedDb<C>
where
    C: ConnectionTrait,
{
    /// Binds `scope` to `conn` for the lifetime of this handle.
    #[must_use]
    pub fn new(conn: C, scope: AccessScope) -> Self {
        Self { conn, scope }
    }

    #[inline]
    #[must_use]
    pub fn scope(&self) -> &AccessScope {
        &self.scope
    }

    /// The underlying connection.
    ///
    /// # Safety
    ///
    /// Statements built directly on the connection bypass tenant
    /// filtering. Valid uses:
    /// - Executing a statement that was already scoped by this handle
    ///   (for example after [`ScopedSelect::into_select`]).
    /// - Infrastructure code such as migrations or the delegation lookup
    ///   that runs before any scope exists.
    ///
    /// Module business logic should stay on the high-level methods.
    #[must_use]
    pub fn conn(&self) -> &C {
        &self.conn
    }

    /// Starts a scoped select over `E`.
    pub fn find<E>(&self) -> ScopedSelect<'_, C, E>
    where
        E: TenantAware,
    {
        ScopedSelect {
            conn: &self.conn,
            select: apply_scope::<E, _>(E::find(), &self.scope),
        }
    }

    /// Scoped select narrowed to one primary key.
    ///
    /// A key belonging to a tenant outside the scope yields no row, same
    /// as a key that does not exist.
    pub fn find_by_id<E>(&self, id: PrimaryKeyOf<E>) -> ScopedSelect<'_, C, E>
    where
        E: TenantAware,
    {
        ScopedSelect {
            conn: &self.conn,
            select: apply_scope::<E, _>(E::find_by_id(id), &self.scope),
        }
    }

    /// Starts a scoped bulk update over `E`.
    pub fn update_many<E>(&self) -> ScopedUpdate<'_, C, E>
    where
        E: TenantAware,
    {
        ScopedUpdate {
            conn: &self.conn,
            update: apply_scope::<E, _>(E::update_many(), &self.scope),
        }
    }

    /// Starts a scoped bulk delete over `E`.
    pub fn delete_many<E>(&self) -> ScopedDelete<'_, C, E>
    where
        E: TenantAware,
    {
        ScopedDelete {
            conn: &self.conn,
            delete: apply_scope::<E, _>(E::delete_many(), &self.scope),
        }
    }

    /// Deletes one row by primary key if it falls inside the scope.
    ///
    /// Returns whether a row was removed; a key outside the caller's
    /// tenants reads as not found.
    ///
    /// # Errors
    ///
    /// Returns [`IsolationError::Db`] when the delete fails downstream.
    pub async fn delete_by_id<E>(&self, id: PrimaryKeyOf<E>) -> Result<bool, IsolationError>
    where
        E: TenantAware,
    {
        let result = apply_scope::<E, _>(E::delete_by_id(id), &self.scope)
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Loads the row by primary key and, when visible, applies `model`.
    ///
    /// `model` must carry the primary key. The existence check runs
    /// through the scope filter, so rows outside the caller's tenants
    /// read as absent and are never written.
    ///
    /// # Errors
    ///
    /// Returns [`IsolationError::Db`] when either statement fails
    /// downstream.
    pub async fn update_one<E, A>(
        &self,
        id: PrimaryKeyOf<E>,
        model: A,
    ) -> Result<Option<E::Model>, IsolationError>
    where
        E: TenantAware,
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        let visible = self.find_by_id::<E>(id).one().await?.is_some();
        if !visible {
            return Ok(None);
        }
        Ok(Some(model.update(&self.conn).await?))
    }

    /// Inserts `model` exactly as given.
    ///
    /// Membership filters do not apply to an `INSERT` and no tenant value
    /// is synthesized into the payload. Services validate the payload's
    /// tenant with [`Self::ensure_tenant_allowed`] before calling this.
    ///
    /// # Errors
    ///
    /// Returns [`IsolationError::Db`] when the insert fails downstream.
    pub async fn insert<E, A>(&self, model: A) -> Result<E::Model, IsolationError>
    where
        E: TenantAware,
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        Ok(model.insert(&self.conn).await?)
    }

    /// Checks that `tenant_id` falls inside this handle's scope.
    ///
    /// # Errors
    ///
    /// Returns [`IsolationError::TenantOutOfScope`] when it does not.
    pub fn ensure_tenant_allowed(&self, tenant_id: Uuid) -> Result<(), IsolationError> {
        if self.scope.allows_tenant(tenant_id) {
            return Ok(());
        }
        Err(IsolationError::TenantOutOfScope { tenant_id })
    }
}

impl ScopedDb<DatabaseConnection> {
    /// Opens a transaction carrying the same scope.
    ///
    /// # Errors
    ///
    /// Returns [`IsolationError::Db`] when the transaction cannot start.
    pub async fn begin(&self) -> Result<ScopedDb<DatabaseTransaction>, IsolationError> {
        let txn = self.conn.begin().await?;
        Ok(ScopedDb {
            conn: txn,
            scope: self.scope.clone(),
        })
    }
}

impl ScopedDb<DatabaseTransaction> {
    /// Commits the transaction.
    ///
    /// # Errors
    ///
    /// Returns [`IsolationError::Db`] when the commit fails.
    pub async fn commit(self) -> Result<(), IsolationError> {
        Ok(self.conn.commit().await?)
    }

    /// Rolls the transaction back. Dropping the handle uncommitted has
    /// the same effect.
    ///
    /// # Errors
    ///
    /// Returns [`IsolationError::Db`] when the rollback fails.
    pub async fn rollback(self) -> Result<(), IsolationError> {
        Ok(self.conn.rollback().await?)
    }
}

/// Select with the scope filter already attached.
#[must_use]
#[derive(Clone, Debug)]
pub struct ScopedSelect<'db, C, E>
where
    E: EntityTrait,
{
    conn: &'db C,
    select: sea_orm::Select<E>,
}

impl<'db, C, E> ScopedSelect<'db, C, E>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    /// ANDs an additional filter onto the query; the scope filter stays.
    pub fn filter(mut self, condition: Condition) -> Self {
        self.select = QueryFilter::filter(self.select, condition);
        self
    }

    pub fn order_by(mut self, col: E::Column, order: sea_orm::Order) -> Self {
        self.select = QueryOrder::order_by(self.select, col, order);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.select = QuerySelect::limit(self.select, limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.select = QuerySelect::offset(self.select, offset);
        self
    }

    /// Executes the query and returns at most one row.
    ///
    /// # Errors
    ///
    /// Returns [`IsolationError::Db`] when the query fails downstream.
    pub async fn one(self) -> Result<Option<E::Model>, IsolationError> {
        Ok(self.select.one(self.conn).await?)
    }

    /// Executes the query and returns all matching rows.
    ///
    /// # Errors
    ///
    /// Returns [`IsolationError::Db`] when the query fails downstream.
    pub async fn all(self) -> Result<Vec<E::Model>, IsolationError> {
        Ok(self.select.all(self.conn).await?)
    }

    /// Counts the matching rows.
    ///
    /// # Errors
    ///
    /// Returns [`IsolationError::Db`] when the query fails downstream.
    pub async fn count(self) -> Result<u64, IsolationError>
    where
        E::Model: Sync + 'db,
    {
        Ok(self.select.count(self.conn).await?)
    }

    /// Unwraps the underlying select for custom projections or grouping.
    ///
    /// # Safety
    ///
    /// The scope filter is already attached. The caller must not strip it
    /// or disjoin (`OR`) around it, and must execute the statement on the
    /// same handle's connection.
    #[must_use]
    pub fn into_select(self) -> sea_orm::Select<E> {
        self.select
    }
}

/// Bulk update with the scope filter already attached.
#[must_use]
#[derive(Clone, Debug)]
pub struct ScopedUpdate<'db, C, E>
where
    E: EntityTrait,
{
    conn: &'db C,
    update: sea_orm::UpdateMany<E>,
}

impl<C, E> ScopedUpdate<'_, C, E>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    /// Sets `col` to `expr` on every matched row.
    pub fn col_expr(mut self, col: E::Column, expr: SimpleExpr) -> Self {
        self.update = self.update.col_expr(col, expr);
        self
    }

    /// Applies every set value of `model` to the matched rows.
    pub fn set<A>(mut self, model: A) -> Self
    where
        A: ActiveModelTrait<Entity = E>,
    {
        self.update = self.update.set(model);
        self
    }

    /// ANDs an additional filter; the scope filter stays.
    pub fn filter(mut self, condition: Condition) -> Self {
        self.update = QueryFilter::filter(self.update, condition);
        self
    }

    /// Executes the update, returning the number of rows touched.
    ///
    /// # Errors
    ///
    /// Returns [`IsolationError::Db`] when the update fails downstream.
    pub async fn exec(self) -> Result<u64, IsolationError> {
        let result = self.update.exec(self.conn).await?;
        Ok(result.rows_affected)
    }

    /// Unwraps the underlying update statement.
    ///
    /// # Safety
    ///
    /// The scope filter is already attached; the caller must not strip it
    /// or disjoin (`OR`) around it.
    #[must_use]
    pub fn into_update(self) -> sea_orm::UpdateMany<E> {
        self.update
    }
}

/// Bulk delete with the scope filter already attached.
#[must_use]
#[derive(Clone, Debug)]
pub struct ScopedDelete<'db, C, E>
where
    E: EntityTrait,
{
    conn: &'db C,
    delete: sea_orm::DeleteMany<E>,
}

impl<C, E> ScopedDelete<'_, C, E>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    /// ANDs an additional filter; the scope filter stays.
    pub fn filter(mut self, condition: Condition) -> Self {
        self.delete = QueryFilter::filter(self.delete, condition);
        self
    }

    /// Executes the delete, returning the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns [`IsolationError::Db`] when the delete fails downstream.
    pub async fn exec(self) -> Result<u64, IsolationError> {
        let result = self.delete.exec(self.conn).await?;
        Ok(result.rows_affected)
    }

    /// Unwraps the underlying delete statement.
    ///
    /// # Safety
    ///
    /// The scope filter is already attached; the caller must not strip it
    /// or disjoin (`OR`) around it.
    #[must_use]
    pub fn into_delete(self) -> sea_orm::DeleteMany<E> {
        self.delete
    }
}
