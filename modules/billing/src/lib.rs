//! Invoices and the plan catalog.
//!
//! Invoices are tenant-scoped: every operation against them flows through
//! the caller's [`atrium_db::ScopedDb`] and is filtered to the tenants the
//! caller may touch. Plans carry no tenant column and pass through the
//! guard untouched; the catalog is global by design.

pub mod config;
pub mod domain;
pub mod infra;
pub mod test_support;

pub use config::BillingConfig;
pub use domain::error::DomainError;
pub use domain::model::{CreateInvoice, Invoice, InvoiceStatus, Plan, StatusRevenue};
pub use domain::repo::{InvoicesRepository, PlansRepository};
pub use domain::service::BillingService;
pub use infra::storage::migrations::Migrator;
pub use infra::storage::register_entities;
pub use infra::storage::sea_orm_repo::SeaOrmBillingRepository;
