pub mod entity;
pub mod migrations;
pub mod sea_orm_repo;

use atrium_db::EntityRegistryBuilder;

/// Adds this module's entities to the console-wide roster.
#[must_use]
pub fn register_entities(builder: EntityRegistryBuilder) -> EntityRegistryBuilder {
    builder
        .register::<entity::invoice::Entity>()
        .register::<entity::plan::Entity>()
}
