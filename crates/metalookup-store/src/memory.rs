//! In-memory metadata store

use crate::error::StoreResult;
use crate::repository::MetadataStore;
use indexmap::IndexMap;
use metalookup_common::{Metadata, MetadataId};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

#[derive(Default)]
struct Inner {
    /// Records in save order
    records: IndexMap<MetadataId, Metadata>,
    /// (group, name) -> id of the most recently saved entity for that pair
    by_name: HashMap<(String, String), MetadataId>,
}

/// Process-local metadata store
///
/// Contents are lost when the process exits. Listing order is save order.
#[derive(Default)]
pub struct InMemoryMetadataStore {
    inner: RwLock<Inner>,
}

impl InMemoryMetadataStore {
    /// Create a new empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entities
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    /// Whether the store holds no entities
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().records.is_empty()
    }
}

impl MetadataStore for InMemoryMetadataStore {
    fn save(&self, mut metadata: Metadata) -> StoreResult<Metadata> {
        metadata.validate()?;
        let id = *metadata.id.get_or_insert_with(MetadataId::new);

        let mut inner = self.inner.write();
        let stale_key = inner
            .records
            .get(&id)
            .filter(|prev| prev.group != metadata.group || prev.name != metadata.name)
            .map(|prev| (prev.group.clone(), prev.name.clone()));
        if let Some(key) = stale_key
            && inner.by_name.get(&key) == Some(&id)
        {
            // Hand the pair to the latest-inserted other entity still holding it
            let survivor = inner
                .records
                .iter()
                .rev()
                .find(|(other, m)| **other != id && m.group == key.0 && m.name == key.1)
                .map(|(other, _)| *other);
            match survivor {
                Some(other) => inner.by_name.insert(key, other),
                None => inner.by_name.remove(&key),
            };
        }

        inner
            .by_name
            .insert((metadata.group.clone(), metadata.name.clone()), id);
        // insert on an existing key keeps its position
        inner.records.insert(id, metadata.clone());

        debug!("Saved metadata {} ({}:{})", id, metadata.group, metadata.name);
        Ok(metadata)
    }

    fn delete_all(&self) -> StoreResult<()> {
        let mut inner = self.inner.write();
        inner.records.clear();
        inner.by_name.clear();
        Ok(())
    }

    fn find_by_id(&self, id: &MetadataId) -> StoreResult<Option<Metadata>> {
        Ok(self.inner.read().records.get(id).cloned())
    }

    fn find_by_group_and_name(&self, group: &str, name: &str) -> StoreResult<Option<Metadata>> {
        let inner = self.inner.read();
        Ok(inner
            .by_name
            .get(&(group.to_string(), name.to_string()))
            .and_then(|id| inner.records.get(id))
            .cloned())
    }

    fn find_all_by_group(&self, group: &str) -> StoreResult<Vec<Metadata>> {
        Ok(self
            .inner
            .read()
            .records
            .values()
            .filter(|m| m.group == group)
            .cloned()
            .collect())
    }
}
