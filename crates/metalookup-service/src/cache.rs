//! Cache-Control directives derived from lookup outcomes.
//!
//! No caching happens in-process; a directive only tells the HTTP layer
//! what header to attach.

use crate::outcome::Lookup;
use metalookup_common::config::CacheConfig;
use std::fmt;
use std::time::Duration;

/// A `Cache-Control` value for a cacheable response
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheDirective {
    pub max_age: Duration,
    pub public: bool,
}

impl fmt::Display for CacheDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visibility = if self.public { "public" } else { "private" };
        write!(f, "max-age={}, {visibility}", self.max_age.as_secs())
    }
}

/// Outcomes that may or may not be cached downstream
pub trait Cacheable {
    fn is_cacheable(&self) -> bool;
}

impl<T> Cacheable for Lookup<T> {
    /// Only found entities are cacheable; a miss must not be cached.
    fn is_cacheable(&self) -> bool {
        self.is_found()
    }
}

impl<T> Cacheable for Vec<T> {
    /// Group listings are always cacheable, even when empty.
    fn is_cacheable(&self) -> bool {
        true
    }
}

/// Policy turning outcomes into directives
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CachePolicy {
    directive: CacheDirective,
}

impl CachePolicy {
    #[must_use]
    pub const fn new(max_age: Duration, public: bool) -> Self {
        Self {
            directive: CacheDirective { max_age, public },
        }
    }

    /// Directive to attach for `outcome`, or `None` when the response must
    /// carry no `Cache-Control` header at all.
    pub fn directive_for(&self, outcome: &impl Cacheable) -> Option<CacheDirective> {
        outcome.is_cacheable().then_some(self.directive)
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(3600), true)
    }
}

impl From<&CacheConfig> for CachePolicy {
    fn from(config: &CacheConfig) -> Self {
        Self::new(config.max_age(), config.public)
    }
}
