#![allow(clippy::unwrap_used, clippy::expect_used, clippy::missing_panics_doc)]

//! Fixtures shared by the billing integration tests: scoped handles,
//! principals, and row seeding against an in-memory database.

use atrium_db::ScopedDb;
use atrium_security::{AccessScope, Principal, Role, SessionClaims};
use chrono::Utc;
use sea_orm::{ActiveValue, ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

use crate::domain::model::InvoiceStatus;
use crate::infra::storage::entity::{invoice, plan};
use crate::infra::storage::migrations::Migrator;

/// Fresh in-memory database with the billing schema applied.
///
/// The pool is pinned to one connection: every `sqlite::memory:`
/// connection opens its own blank database, so a wider pool would hand
/// out empty ones.
pub async fn inmem_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1);
    let conn = Database::connect(opts).await.expect("in-memory database");
    Migrator::up(&conn, None).await.expect("billing migrations");
    conn
}

/// Handle that sees every tenant.
#[must_use]
pub fn admin_db(conn: &DatabaseConnection) -> ScopedDb {
    ScopedDb::new(conn.clone(), AccessScope::Unrestricted)
}

/// Handle confined to the given tenants.
#[must_use]
pub fn member_db(conn: &DatabaseConnection, tenants: &[Uuid]) -> ScopedDb {
    ScopedDb::new(conn.clone(), AccessScope::tenants(tenants.iter().copied()))
}

/// Handle whose scope matches no tenant.
#[must_use]
pub fn denied_db(conn: &DatabaseConnection) -> ScopedDb {
    ScopedDb::new(conn.clone(), AccessScope::deny_all())
}

/// Member principal whose claims never carried a home tenant.
#[must_use]
pub fn member_without_home() -> Principal {
    Principal::from_claims(&SessionClaims {
        subject_id: Uuid::new_v4(),
        role: Role::TenantMember.as_str().to_owned(),
        home_tenant_id: None,
    })
}

/// Inserts one invoice for `tenant_id` and returns its id.
pub async fn seed_invoice(
    conn: &DatabaseConnection,
    tenant_id: Uuid,
    status: InvoiceStatus,
    amount_cents: i64,
) -> Uuid {
    let id = Uuid::new_v4();
    let row = invoice::ActiveModel {
        id: ActiveValue::Set(id),
        tenant_id: ActiveValue::Set(tenant_id),
        status: ActiveValue::Set(status.as_str().to_owned()),
        amount_cents: ActiveValue::Set(amount_cents),
        issued_at: ActiveValue::Set(Utc::now()),
    };
    member_db(conn, &[tenant_id])
        .insert(row)
        .await
        .expect("seed invoice");
    id
}

/// Inserts one plan and returns its id.
pub async fn seed_plan(conn: &DatabaseConnection, code: &str, monthly_cents: i64) -> Uuid {
    let id = Uuid::new_v4();
    let row = plan::ActiveModel {
        id: ActiveValue::Set(id),
        code: ActiveValue::Set(code.to_owned()),
        name: ActiveValue::Set(format!("{code} plan")),
        monthly_cents: ActiveValue::Set(monthly_cents),
    };
    admin_db(conn).insert(row).await.expect("seed plan");
    id
}
