use sea_orm::EntityTrait;

/// Declares where an entity keeps its owning tenant, if anywhere.
///
/// Every entity that passes through the scoped facade must implement this
/// trait and answer the question explicitly:
///
/// - Tenant-scoped entities return `Some(Column::TenantId)` (or whichever
///   column holds the owning tenant).
/// - Global entities such as catalog or lookup tables return `None` and are
///   never filtered by scope.
///
/// There is no implicit default. A wrong answer here silently widens or
/// narrows what a tenant can see, so the choice belongs next to the entity
/// definition where a reviewer will look for it.
///
/// # Example
///
/// ```rust,ignore
/// impl TenantAware for invoice::Entity {
///     fn tenant_column() -> Option<Self::Column> {
///         Some(invoice::Column::TenantId)
///     }
/// }
///
/// impl TenantAware for plan::Entity {
///     fn tenant_column() -> Option<Self::Column> {
///         None
///     }
/// }
/// ```
pub trait TenantAware: EntityTrait {
    /// The column holding the owning tenant id, or `None` for entities
    /// that exist outside any tenant.
    fn tenant_column() -> Option<Self::Column>;
}
