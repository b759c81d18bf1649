//! Common types shared by all resources

pub mod aggregate_id;
pub mod paging;

// Re-exports
pub use aggregate_id::AggregateId;
pub use paging::PaginatedResult;
