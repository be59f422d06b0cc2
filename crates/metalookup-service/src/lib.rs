//! Metalookup Lookup Service
//!
//! Read paths over a [`MetadataStore`](metalookup_store::MetadataStore):
//! by id, by (group, name) and by group. Single-entity lookups return a
//! [`Lookup`] value rather than an error when nothing matches, and every
//! outcome maps to an optional [`CacheDirective`] for the transport layer.

pub mod cache;
pub mod outcome;
pub mod service;

pub use cache::{CacheDirective, CachePolicy, Cacheable};
pub use outcome::{Lookup, NotFound};
pub use service::LookupService;
