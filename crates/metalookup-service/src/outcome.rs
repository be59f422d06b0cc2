//! Found / not-found outcome of a single-entity lookup

use std::fmt;

/// Result of a lookup that targets at most one entity
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    NotFound(NotFound),
}

impl<T> Lookup<T> {
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The found value, discarding the not-found message
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Self::Found(value) => Lookup::Found(f(value)),
            Self::NotFound(nf) => Lookup::NotFound(nf),
        }
    }
}

/// Absence of a requested entity, carrying a client-facing message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotFound {
    message: String,
}

impl NotFound {
    /// Not-found for the key the caller asked for. The key is rendered
    /// verbatim: a raw id string or `group:name`.
    pub fn for_key(key: impl fmt::Display) -> Self {
        Self {
            message: format!("Requested metadata entity having id {key} does not exists in the system."),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn into_message(self) -> String {
        self.message
    }
}

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
