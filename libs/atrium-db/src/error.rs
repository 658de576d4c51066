use uuid::Uuid;

/// Errors surfaced by scoped database operations.
#[derive(thiserror::Error, Debug)]
pub enum IsolationError {
    /// Database error occurred during query execution.
    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),

    /// A write named a tenant outside the caller's access scope.
    #[error("tenant {tenant_id} is not within the caller's access scope")]
    TenantOutOfScope { tenant_id: Uuid },
}
