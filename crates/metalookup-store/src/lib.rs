//! Metalookup Metadata Store
//!
//! The [`MetadataStore`] trait is the only surface the lookup layer
//! consumes. Two backends implement it: a durable redb database and a
//! process-local map.

pub mod error;
pub mod memory;
pub mod repository;
pub mod store;
pub mod tables;
pub mod types;

#[cfg(test)]
mod contract;

// Re-exports
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryMetadataStore;
pub use repository::MetadataStore;
pub use store::RedbMetadataStore;
