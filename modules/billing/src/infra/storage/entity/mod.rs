pub mod invoice;
pub mod plan;
