#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
pub mod principal;
pub mod resolver;
pub mod scope;

pub use principal::{Principal, Role, SessionClaims};
pub use resolver::{DelegationLookup, ResolveError, ScopeResolver};
pub use scope::AccessScope;
