#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use atrium_db::{EntityDescriptor, EntityRegistry, RegistryError};
use common::{colors, widgets};

fn roster() -> EntityRegistry {
    EntityRegistry::builder()
        .register::<widgets::Entity>()
        .register::<colors::Entity>()
        .build()
        .unwrap()
}

#[test]
fn descriptor_captures_table_and_tenant_column() {
    let widgets = EntityDescriptor::of::<widgets::Entity>();
    assert_eq!(widgets.table(), "widgets");
    assert_eq!(widgets.tenant_column(), Some("tenant_id"));
    assert!(widgets.is_tenant_scoped());

    let colors = EntityDescriptor::of::<colors::Entity>();
    assert_eq!(colors.table(), "colors");
    assert_eq!(colors.tenant_column(), None);
    assert!(!colors.is_tenant_scoped());
}

#[test]
fn roster_answers_tenant_field_lookups() {
    let registry = roster();
    assert!(registry.has_tenant_field("widgets"));
    assert!(!registry.has_tenant_field("colors"));
    // Unknown tables report false rather than failing.
    assert!(!registry.has_tenant_field("gears"));
}

#[test]
fn expect_registered_flags_missing_tables() {
    let registry = roster();
    assert!(registry.expect_registered("widgets").is_ok());
    assert!(matches!(
        registry.expect_registered("gears"),
        Err(RegistryError::Unregistered { table }) if table == "gears"
    ));
}

#[test]
fn duplicate_registration_is_an_error() {
    let result = EntityRegistry::builder()
        .register::<widgets::Entity>()
        .register::<widgets::Entity>()
        .build();
    assert!(matches!(
        result,
        Err(RegistryError::Duplicate { table }) if table == "widgets"
    ));
}

#[test]
fn roster_iterates_each_entity_once() {
    let registry = roster();
    assert_eq!(registry.len(), 2);
    assert!(!registry.is_empty());

    let tables: Vec<&str> = registry.iter().map(EntityDescriptor::table).collect();
    assert_eq!(tables, ["colors", "widgets"]);
}
