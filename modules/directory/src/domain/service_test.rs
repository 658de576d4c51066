#[cfg(test)]
mod tests {
    use super::super::*;
    use async_trait::async_trait;
    use atrium_db::ScopedDb;
    use atrium_security::AccessScope;
    use chrono::Utc;
    use model::{CreateOrganization, Delegation, OrgStatus, Organization};
    use sea_orm::{ConnectionTrait, DatabaseConnection};
    use std::sync::{Arc, Mutex};
    use uuid::Uuid;

    use crate::config::DirectoryConfig;

    // In-memory repository double; never touches the connection it is
    // handed, so the service's pre-database paths run without a backend.
    #[derive(Clone, Default)]
    struct MockRepository {
        organizations: Arc<Mutex<Vec<Organization>>>,
        delegations: Arc<Mutex<Vec<Delegation>>>,
        requested_limit: Arc<Mutex<Option<u64>>>,
    }

    #[async_trait]
    impl repo::DirectoryRepository for MockRepository {
        async fn insert_organization<C>(
            &self,
            _db: &ScopedDb<C>,
            org: &Organization,
        ) -> anyhow::Result<()>
        where
            C: ConnectionTrait + Send + Sync,
        {
            self.organizations.lock().unwrap().push(org.clone());
            Ok(())
        }

        async fn get_organization<C>(
            &self,
            _db: &ScopedDb<C>,
            id: Uuid,
        ) -> anyhow::Result<Option<Organization>>
        where
            C: ConnectionTrait + Send + Sync,
        {
            let found = self
                .organizations
                .lock()
                .unwrap()
                .iter()
                .find(|o| o.id == id)
                .cloned();
            Ok(found)
        }

        async fn list_organizations<C>(
            &self,
            _db: &ScopedDb<C>,
            limit: u64,
        ) -> anyhow::Result<Vec<Organization>>
        where
            C: ConnectionTrait + Send + Sync,
        {
            *self.requested_limit.lock().unwrap() = Some(limit);
            Ok(self.organizations.lock().unwrap().clone())
        }

        async fn update_organization<C>(
            &self,
            _db: &ScopedDb<C>,
            org: &Organization,
        ) -> anyhow::Result<Option<Organization>>
        where
            C: ConnectionTrait + Send + Sync,
        {
            let mut rows = self.organizations.lock().unwrap();
            let Some(stored) = rows.iter_mut().find(|o| o.id == org.id) else {
                return Ok(None);
            };
            *stored = org.clone();
            Ok(Some(org.clone()))
        }

        async fn grant_delegation<C>(
            &self,
            _db: &ScopedDb<C>,
            tenant_id: Uuid,
            agent_id: Uuid,
        ) -> anyhow::Result<Delegation>
        where
            C: ConnectionTrait + Send + Sync,
        {
            let grant = Delegation {
                tenant_id,
                agent_id,
                granted_at: Utc::now(),
            };
            self.delegations.lock().unwrap().push(grant);
            Ok(grant)
        }

        async fn revoke_delegation<C>(
            &self,
            _db: &ScopedDb<C>,
            tenant_id: Uuid,
            agent_id: Uuid,
        ) -> anyhow::Result<bool>
        where
            C: ConnectionTrait + Send + Sync,
        {
            let mut rows = self.delegations.lock().unwrap();
            let before = rows.len();
            rows.retain(|d| !(d.tenant_id == tenant_id && d.agent_id == agent_id));
            Ok(rows.len() < before)
        }

        async fn list_delegations_for_tenant<C>(
            &self,
            _db: &ScopedDb<C>,
            tenant_id: Uuid,
        ) -> anyhow::Result<Vec<Delegation>>
        where
            C: ConnectionTrait + Send + Sync,
        {
            let rows = self
                .delegations
                .lock()
                .unwrap()
                .iter()
                .copied()
                .filter(|d| d.tenant_id == tenant_id)
                .collect();
            Ok(rows)
        }
    }

    fn sample_org(id: Uuid) -> Organization {
        Organization {
            id,
            name: "Initech".to_owned(),
            status: OrgStatus::Active,
            created_at: Utc::now(),
        }
    }

    fn admin_db() -> ScopedDb {
        ScopedDb::new(DatabaseConnection::default(), AccessScope::Unrestricted)
    }

    fn member_db(tenant_id: Uuid) -> ScopedDb {
        ScopedDb::new(DatabaseConnection::default(), AccessScope::tenant(tenant_id))
    }

    #[tokio::test]
    async fn test_create_requires_unrestricted_scope() {
        let mock = MockRepository::default();
        let service =
            service::DirectoryService::new(mock.clone(), DirectoryConfig::default());
        let db = member_db(Uuid::new_v4());

        let result = service
            .create_organization(
                &db,
                CreateOrganization {
                    name: "Initech".to_owned(),
                    initial_agent_id: None,
                },
            )
            .await;

        assert!(matches!(
            result,
            Err(error::DomainError::AdminRequired { .. })
        ));
        assert!(mock.organizations.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let mock = MockRepository::default();
        let service =
            service::DirectoryService::new(mock.clone(), DirectoryConfig::default());
        let db = admin_db();

        let result = service
            .create_organization(
                &db,
                CreateOrganization {
                    name: "   ".to_owned(),
                    initial_agent_id: None,
                },
            )
            .await;

        assert!(matches!(result, Err(error::DomainError::Validation { .. })));
        assert!(mock.organizations.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rename_validates_name_length() {
        let mock = MockRepository::default();
        let service = service::DirectoryService::new(
            mock,
            DirectoryConfig {
                max_name_length: 10,
                ..DirectoryConfig::default()
            },
        );
        let db = admin_db();

        let result = service
            .rename_organization(&db, Uuid::new_v4(), "a".repeat(11))
            .await;

        assert!(matches!(result, Err(error::DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_get_organization_maps_missing_to_not_found() {
        let service = service::DirectoryService::new(
            MockRepository::default(),
            DirectoryConfig::default(),
        );
        let id = Uuid::new_v4();

        let result = service.get_organization(&admin_db(), id).await;

        assert!(matches!(
            result,
            Err(error::DomainError::OrganizationNotFound { id: missing }) if missing == id
        ));
    }

    #[tokio::test]
    async fn test_get_organization_returns_visible_row() {
        let mock = MockRepository::default();
        let id = Uuid::new_v4();
        mock.organizations.lock().unwrap().push(sample_org(id));
        let service =
            service::DirectoryService::new(mock, DirectoryConfig::default());

        let org = service.get_organization(&member_db(id), id).await.unwrap();

        assert_eq!(org.id, id);
        assert_eq!(org.status, OrgStatus::Active);
    }

    #[tokio::test]
    async fn test_list_clamps_page_size() {
        let mock = MockRepository::default();
        let service = service::DirectoryService::new(
            mock.clone(),
            DirectoryConfig {
                default_page_size: 25,
                max_page_size: 100,
                ..DirectoryConfig::default()
            },
        );
        let db = admin_db();

        service.list_organizations(&db, Some(1000)).await.unwrap();
        assert_eq!(*mock.requested_limit.lock().unwrap(), Some(100));

        service.list_organizations(&db, None).await.unwrap();
        assert_eq!(*mock.requested_limit.lock().unwrap(), Some(25));
    }

    #[tokio::test]
    async fn test_grant_requires_admin() {
        let mock = MockRepository::default();
        let tenant_id = Uuid::new_v4();
        let service =
            service::DirectoryService::new(mock.clone(), DirectoryConfig::default());

        let result = service
            .grant_delegation(&member_db(tenant_id), tenant_id, Uuid::new_v4())
            .await;

        assert!(matches!(
            result,
            Err(error::DomainError::AdminRequired { .. })
        ));
        assert!(mock.delegations.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_grant_checks_organization_exists() {
        let service = service::DirectoryService::new(
            MockRepository::default(),
            DirectoryConfig::default(),
        );

        let result = service
            .grant_delegation(&admin_db(), Uuid::new_v4(), Uuid::new_v4())
            .await;

        assert!(matches!(
            result,
            Err(error::DomainError::OrganizationNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_grant_records_delegation() {
        let mock = MockRepository::default();
        let tenant_id = Uuid::new_v4();
        let agent_id = Uuid::new_v4();
        mock.organizations
            .lock()
            .unwrap()
            .push(sample_org(tenant_id));
        let service =
            service::DirectoryService::new(mock.clone(), DirectoryConfig::default());

        let grant = service
            .grant_delegation(&admin_db(), tenant_id, agent_id)
            .await
            .unwrap();

        assert_eq!(grant.tenant_id, tenant_id);
        assert_eq!(grant.agent_id, agent_id);
        assert_eq!(mock.delegations.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_revoke_requires_admin() {
        let service = service::DirectoryService::new(
            MockRepository::default(),
            DirectoryConfig::default(),
        );

        let result = service
            .revoke_delegation(&member_db(Uuid::new_v4()), Uuid::new_v4(), Uuid::new_v4())
            .await;

        assert!(matches!(
            result,
            Err(error::DomainError::AdminRequired { .. })
        ));
    }

    #[tokio::test]
    async fn test_suspend_marks_organization_suspended() {
        let mock = MockRepository::default();
        let id = Uuid::new_v4();
        mock.organizations.lock().unwrap().push(sample_org(id));
        let service =
            service::DirectoryService::new(mock.clone(), DirectoryConfig::default());

        let updated = service
            .suspend_organization(&admin_db(), id)
            .await
            .unwrap();

        assert_eq!(updated.status, OrgStatus::Suspended);
        let stored = mock.organizations.lock().unwrap()[0].clone();
        assert_eq!(stored.status, OrgStatus::Suspended);
    }
}
