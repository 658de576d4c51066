use sea_orm_migration::prelude::*;

mod initial_001;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(initial_001::Migration)]
    }

    // Modules share one database; each keeps its own migration history
    // so identically named migrations cannot shadow each other.
    fn migration_table_name() -> DynIden {
        Alias::new("seaql_migrations_directory").into_iden()
    }
}
