#![allow(clippy::unwrap_used, clippy::expect_used)]

use atrium_db::EntityRegistry;

fn console_roster() -> EntityRegistry {
    atrium_billing::register_entities(atrium_directory::register_entities(
        EntityRegistry::builder(),
    ))
    .build()
    .unwrap()
}

#[test]
fn startup_sweep_finds_every_served_table() {
    let roster = console_roster();
    assert_eq!(roster.len(), 4);

    // The boot-time check each deployment runs: a table the console serves
    // but no module registered must fail the sweep, not pass silently.
    for table in ["organizations", "delegations", "invoices", "plans"] {
        roster.expect_registered(table).unwrap();
    }
    assert!(roster.expect_registered("audit_log").is_err());
}

#[test]
fn roster_reflects_each_module_tenant_layout() {
    let roster = console_roster();

    assert!(roster.has_tenant_field("invoices"));
    assert!(roster.has_tenant_field("delegations"));
    assert!(!roster.has_tenant_field("plans"));

    let invoices = roster.descriptor("invoices").unwrap();
    assert_eq!(invoices.tenant_column(), Some("tenant_id"));

    // Organization rows are the tenants themselves, so they scope by
    // their own primary key.
    let organizations = roster.descriptor("organizations").unwrap();
    assert_eq!(organizations.tenant_column(), Some("id"));
}
