#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Tenant-scoped data access on top of `SeaORM`.
//!
//! Multi-tenant modules route every query through a [`ScopedDb`] handle
//! that carries the request's [`AccessScope`]. Entities declare their
//! tenant column once through [`TenantAware`], and the guard attaches the
//! membership filter to reads, bulk updates and bulk deletes before any
//! caller-supplied condition.
//!
//! # Policy
//!
//! | Scope | Entity | Behavior |
//! |-------|--------|----------|
//! | Unrestricted | any | query runs as written |
//! | Restricted | no tenant column | query runs as written |
//! | Restricted to tenants | tenant column | `AND tenant_column IN (tenants)` |
//! | Restricted to nothing | tenant column | membership over the empty set, matches no row |
//!
//! Inserts are never rewritten; services validate the payload's tenant
//! with [`ScopedDb::ensure_tenant_allowed`] before writing.
//!
//! # Startup roster
//!
//! [`EntityRegistry`] collects every entity a deployment serves. It backs
//! operational tooling (which tables are tenant-scoped?) and lets startup
//! code fail fast when a module forgot to register a table.

pub mod entity_meta;
pub mod error;
pub mod facade;
pub mod guard;
pub mod registry;

pub use entity_meta::TenantAware;
pub use error::IsolationError;
pub use facade::{PrimaryKeyOf, ScopedDb, ScopedDelete, ScopedSelect, ScopedUpdate};
pub use guard::scope_condition;
pub use registry::{EntityDescriptor, EntityRegistry, EntityRegistryBuilder, RegistryError};

// Security types shared with the resolver side.
pub use atrium_security::AccessScope;
