//! The three read paths over the metadata store.

use crate::cache::CachePolicy;
use crate::outcome::{Lookup, NotFound};
use metalookup_common::{Metadata, MetadataId};
use metalookup_store::{MetadataStore, StoreResult};
use std::sync::Arc;
use tracing::debug;

/// Read-only lookups over an injected store handle.
///
/// Holds no per-request state, so one instance can serve any number of
/// concurrent requests.
pub struct LookupService {
    store: Arc<dyn MetadataStore>,
    cache_policy: CachePolicy,
}

impl LookupService {
    /// Create a service with the default cache policy (1 hour, public)
    pub fn new(store: Arc<dyn MetadataStore>) -> Self {
        Self::with_cache_policy(store, CachePolicy::default())
    }

    pub fn with_cache_policy(store: Arc<dyn MetadataStore>, cache_policy: CachePolicy) -> Self {
        Self {
            store,
            cache_policy,
        }
    }

    #[must_use]
    pub const fn cache_policy(&self) -> &CachePolicy {
        &self.cache_policy
    }

    /// Look up by id. A string that is not a valid id is reported exactly
    /// like an unknown id, with the raw input in the message.
    ///
    /// # Errors
    /// Returns a store error; absence is `Ok(Lookup::NotFound)`.
    pub fn get_by_id(&self, raw_id: &str) -> StoreResult<Lookup<Metadata>> {
        let found = match raw_id.parse::<MetadataId>() {
            Ok(id) => self.store.find_by_id(&id)?,
            Err(e) => {
                debug!("Treating {} as unknown", e);
                None
            }
        };
        Ok(found.map_or_else(
            || {
                debug!("Metadata id {} not found", raw_id);
                Lookup::NotFound(NotFound::for_key(raw_id))
            },
            Lookup::Found,
        ))
    }

    /// Look up by the (group, name) natural key.
    ///
    /// # Errors
    /// Returns a store error; absence is `Ok(Lookup::NotFound)`.
    pub fn get_by_group_and_name(&self, group: &str, name: &str) -> StoreResult<Lookup<Metadata>> {
        Ok(match self.store.find_by_group_and_name(group, name)? {
            Some(metadata) => Lookup::Found(metadata),
            None => {
                debug!("Metadata {}:{} not found", group, name);
                Lookup::NotFound(NotFound::for_key(format!("{group}:{name}")))
            }
        })
    }

    /// Every member of `group` in save order. An unknown group is an empty
    /// listing, not a miss.
    ///
    /// # Errors
    /// Returns a store error.
    pub fn list_by_group(&self, group: &str) -> StoreResult<Vec<Metadata>> {
        let items = self.store.find_all_by_group(group)?;
        debug!("Listed {} metadata entities in group {}", items.len(), group);
        Ok(items)
    }
}
