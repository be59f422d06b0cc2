//! Metalookup Common - Shared types and utilities
//!
//! This crate provides the metadata entity, its identifier and value types,
//! the error definitions, and the configuration structures used across all
//! Metalookup components.

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
