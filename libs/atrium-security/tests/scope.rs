#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::BTreeSet;

use atrium_security::AccessScope;
use uuid::Uuid;

#[test]
fn default_denies_everything() {
    let scope = AccessScope::default();
    assert!(scope.is_deny_all());
    assert!(!scope.is_unrestricted());
    assert!(!scope.allows_tenant(Uuid::new_v4()));
}

#[test]
fn single_tenant() {
    let t = Uuid::new_v4();
    let scope = AccessScope::tenant(t);
    assert!(scope.allows_tenant(t));
    assert!(!scope.allows_tenant(Uuid::new_v4()));
    assert!(!scope.is_deny_all());
}

#[test]
fn duplicate_tenants_collapse() {
    let t = Uuid::new_v4();
    let scope = AccessScope::tenants([t, t]);
    assert_eq!(scope.tenant_ids().map(BTreeSet::len), Some(1));
}

#[test]
fn unrestricted_allows_any_tenant() {
    let scope = AccessScope::Unrestricted;
    assert!(scope.is_unrestricted());
    assert!(!scope.is_deny_all());
    assert!(scope.allows_tenant(Uuid::new_v4()));
    assert!(scope.tenant_ids().is_none());
}
