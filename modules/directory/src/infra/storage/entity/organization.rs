use atrium_db::TenantAware;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "organizations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub status: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// An organization row is the tenant itself, so it scopes by its own id:
// a member sees exactly their own organization.
impl TenantAware for Entity {
    fn tenant_column() -> Option<Self::Column> {
        Some(Column::Id)
    }
}
