//! Common types and traits for all aggregates

pub mod aggregate_id;
pub mod aggregate_root;
pub mod entity_metadata;
pub mod taxonomy_node;

// Re-exports
pub use aggregate_id::AggregateId;
pub use aggregate_root::AggregateRoot;
pub use entity_metadata::EntityMetadata;
pub use taxonomy_node::{sort_nodes, TaxonomyNode};
