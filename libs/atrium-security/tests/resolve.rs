#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use async_trait::async_trait;
use atrium_security::{
    AccessScope, DelegationLookup, Principal, ResolveError, Role, ScopeResolver, SessionClaims,
};
use uuid::Uuid;

struct StaticGrants(Vec<(Uuid, Uuid)>);

#[async_trait]
impl DelegationLookup for StaticGrants {
    async fn delegated_tenant_ids(&self, agent_id: Uuid) -> Result<Vec<Uuid>, ResolveError> {
        Ok(self
            .0
            .iter()
            .filter(|(agent, _)| *agent == agent_id)
            .map(|(_, tenant)| *tenant)
            .collect())
    }
}

struct FailingGrants;

#[async_trait]
impl DelegationLookup for FailingGrants {
    async fn delegated_tenant_ids(&self, _agent_id: Uuid) -> Result<Vec<Uuid>, ResolveError> {
        Err(ResolveError::DelegationLookup("store offline".to_owned()))
    }
}

fn resolver_with(grants: Vec<(Uuid, Uuid)>) -> ScopeResolver {
    ScopeResolver::new(Arc::new(StaticGrants(grants)))
}

#[tokio::test]
async fn owner_admin_is_unrestricted() {
    let admin = Principal::new(Uuid::new_v4(), Role::OwnerAdmin);
    let scope = resolver_with(vec![]).resolve(&admin).await.unwrap();
    assert!(scope.is_unrestricted());
}

#[tokio::test]
async fn agent_scope_covers_exactly_the_delegated_tenants() {
    let agent = Uuid::new_v4();
    let (t1, t2) = (Uuid::new_v4(), Uuid::new_v4());
    let resolver = resolver_with(vec![
        (agent, t1),
        (agent, t2),
        (Uuid::new_v4(), Uuid::new_v4()),
    ]);

    let scope = resolver
        .resolve(&Principal::new(agent, Role::DelegatedAgent))
        .await
        .unwrap();
    assert_eq!(scope, AccessScope::tenants([t1, t2]));
}

#[tokio::test]
async fn agent_without_grants_gets_deny_all() {
    let agent = Principal::new(Uuid::new_v4(), Role::DelegatedAgent);
    let scope = resolver_with(vec![]).resolve(&agent).await.unwrap();
    assert!(scope.is_deny_all());
}

#[tokio::test]
async fn member_scope_is_the_home_tenant() {
    let home = Uuid::new_v4();
    let member = Principal::new(Uuid::new_v4(), Role::TenantMember).with_home_tenant(home);
    let scope = resolver_with(vec![]).resolve(&member).await.unwrap();
    assert_eq!(scope, AccessScope::tenant(home));
}

#[tokio::test]
async fn member_without_home_tenant_is_denied_not_an_error() {
    let member = Principal::new(Uuid::new_v4(), Role::TenantMember);
    let scope = resolver_with(vec![]).resolve(&member).await.unwrap();
    assert!(scope.is_deny_all());
}

#[tokio::test]
async fn unknown_role_is_denied_not_an_error() {
    let claims = SessionClaims {
        subject_id: Uuid::new_v4(),
        role: "superuser".to_owned(),
        home_tenant_id: Some(Uuid::new_v4()),
    };
    let principal = Principal::from_claims(&claims);
    assert!(principal.role().is_none());

    let scope = resolver_with(vec![]).resolve(&principal).await.unwrap();
    assert!(scope.is_deny_all());
}

#[tokio::test]
async fn lookup_failure_propagates_for_agents_only() {
    let resolver = ScopeResolver::new(Arc::new(FailingGrants));

    let agent = Principal::new(Uuid::new_v4(), Role::DelegatedAgent);
    assert!(matches!(
        resolver.resolve(&agent).await,
        Err(ResolveError::DelegationLookup(_))
    ));

    // Admins and members never touch the delegation store.
    let admin = Principal::new(Uuid::new_v4(), Role::OwnerAdmin);
    assert!(resolver.resolve(&admin).await.is_ok());
}
