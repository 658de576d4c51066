#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(dead_code)]

//! Test entities covering both sides of the tenant policy: `widgets`
//! carries a tenant column, `colors` is a global lookup table.

pub mod widgets {
    use atrium_db::TenantAware;
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "widgets")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub tenant_id: Uuid,
        pub name: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl TenantAware for Entity {
        fn tenant_column() -> Option<Self::Column> {
            Some(Column::TenantId)
        }
    }
}

pub mod colors {
    use atrium_db::TenantAware;
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "colors")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub name: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl TenantAware for Entity {
        fn tenant_column() -> Option<Self::Column> {
            None
        }
    }
}
