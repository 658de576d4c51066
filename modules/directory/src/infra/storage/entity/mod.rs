pub mod delegation;
pub mod organization;
