use atrium_security::AccessScope;
use sea_orm::{ColumnTrait, Condition, QueryFilter};

use crate::entity_meta::TenantAware;

/// Builds the tenant membership condition for entity `E` under `scope`.
///
/// The rules apply in order and the first match wins:
///
/// 1. `Unrestricted` scope → `None`, the query runs as written.
/// 2. Entity has no tenant column → `None`, scope does not apply.
/// 3. Otherwise → `Some(tenant_column IN (scope tenants))`.
///
/// The empty restricted set takes no special branch: the membership test
/// is built over the empty set and can never match a row, which is what
/// makes deny-all the natural floor rather than a separate code path.
pub fn scope_condition<E>(scope: &AccessScope) -> Option<Condition>
where
    E: TenantAware,
{
    let tenants = match scope {
        AccessScope::Unrestricted => return None,
        AccessScope::RestrictedTo(tenants) => tenants,
    };
    let tenant_column = E::tenant_column()?;
    Some(Condition::all().add(tenant_column.is_in(tenants.iter().copied())))
}

/// Attaches the scope condition for `E` to `query`, if one is needed.
///
/// Filters are ANDed by `SeaORM`, so whatever conditions the caller adds
/// later can only narrow the result further, never widen it.
pub(crate) fn apply_scope<E, Q>(query: Q, scope: &AccessScope) -> Q
where
    E: TenantAware,
    Q: QueryFilter,
{
    match scope_condition::<E>(scope) {
        Some(condition) => query.filter(condition),
        None => query,
    }
}
