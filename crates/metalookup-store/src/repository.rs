//! The store contract consumed by the lookup layer.

use crate::error::StoreResult;
use metalookup_common::{Metadata, MetadataId};

/// Persistence for metadata entities.
///
/// Implementations must give read-your-writes: once `save` returns, every
/// later `find_*` call observes the saved entity.
pub trait MetadataStore: Send + Sync {
    /// Insert or upsert. An entity without an id (or with an id the store
    /// does not know) is inserted; otherwise it replaces the stored entity
    /// and keeps its original position in group listings.
    ///
    /// # Errors
    /// Returns `StoreError::Invalid` for an empty group or name, or a
    /// backend error.
    fn save(&self, metadata: Metadata) -> StoreResult<Metadata>;

    /// Remove every entity.
    ///
    /// # Errors
    /// Returns a backend error.
    fn delete_all(&self) -> StoreResult<()>;

    /// # Errors
    /// Returns a backend error. Absence is `Ok(None)`.
    fn find_by_id(&self, id: &MetadataId) -> StoreResult<Option<Metadata>>;

    /// # Errors
    /// Returns a backend error. Absence is `Ok(None)`.
    fn find_by_group_and_name(&self, group: &str, name: &str) -> StoreResult<Option<Metadata>>;

    /// Every member of `group` in save order; empty when the group is unknown.
    ///
    /// # Errors
    /// Returns a backend error.
    fn find_all_by_group(&self, group: &str) -> StoreResult<Vec<Metadata>>;
}
