//! Organizations and agent delegations.
//!
//! An organization row *is* a tenant: its `id` doubles as the tenant id the
//! rest of the console scopes data by. Delegations place an agent principal
//! inside an organization's delegation set; the scope resolver reads them
//! through [`SeaOrmDelegationLookup`], the one sanctioned raw-connection
//! consumer in this module.

pub mod config;
pub mod domain;
pub mod infra;

pub use config::DirectoryConfig;
pub use domain::error::DomainError;
pub use domain::model::{CreateOrganization, Delegation, OrgStatus, Organization};
pub use domain::repo::DirectoryRepository;
pub use domain::service::DirectoryService;
pub use infra::storage::delegation_lookup::SeaOrmDelegationLookup;
pub use infra::storage::migrations::Migrator;
pub use infra::storage::register_entities;
pub use infra::storage::sea_orm_repo::SeaOrmDirectoryRepository;
