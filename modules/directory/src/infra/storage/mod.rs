pub mod delegation_lookup;
pub mod entity;
pub mod migrations;
pub mod sea_orm_repo;

use atrium_db::EntityRegistryBuilder;

/// Adds this module's entities to the console-wide roster.
#[must_use]
pub fn register_entities(builder: EntityRegistryBuilder) -> EntityRegistryBuilder {
    builder
        .register::<entity::organization::Entity>()
        .register::<entity::delegation::Entity>()
}
