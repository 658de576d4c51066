use atrium_db::TenantAware;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "plans")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub monthly_cents: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// The plan catalog is global: no tenant column, so the guard never
// filters it and every caller sees the full set.
impl TenantAware for Entity {
    fn tenant_column() -> Option<Self::Column> {
        None
    }
}
