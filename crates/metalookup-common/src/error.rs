//! Error types for Metalookup
//!
//! This module defines the common error types shared by the store, the
//! lookup service and the server binary.

use thiserror::Error;

/// Common result type for Metalookup operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for Metalookup
#[derive(Debug, Error)]
pub enum Error {
    // Metadata shape errors
    #[error("metadata group must not be empty")]
    EmptyGroup,

    #[error("metadata name must not be empty (group {group})")]
    EmptyName { group: String },

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Check if this error describes a malformed entity rather than a failure
    #[must_use]
    pub const fn is_invalid_metadata(&self) -> bool {
        matches!(self, Self::EmptyGroup | Self::EmptyName { .. })
    }
}
