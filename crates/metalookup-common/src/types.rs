//! Core type definitions for Metalookup
//!
//! This module defines the metadata entity, its identifier, the dynamic
//! value type carried in its key/value body, and the builder used to
//! assemble new entities before they are saved.

use crate::error::{Error, Result};
use derive_more::{Display, From, Into};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a metadata entity
///
/// Assigned by the store on first save and rendered in its hyphenated
/// lowercase text form.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, From, Into, Display)]
#[display("{_0}")]
pub struct MetadataId(Uuid);

impl MetadataId {
    /// Generate a new random metadata ID
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from existing UUID
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for MetadataId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MetadataId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MetadataId({})", self.0)
    }
}

impl FromStr for MetadataId {
    type Err = MetadataIdError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| MetadataIdError(s.to_string()))
    }
}

/// Raised when a string is not a valid [`MetadataId`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed metadata id: {0}")]
pub struct MetadataIdError(pub String);

/// A single entry of a metadata body: a scalar string or a list of strings.
///
/// Serializes to the JSON-native shape of each variant, so `Scalar` becomes
/// a JSON string and `List` a JSON array.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Scalar(String),
    List(Vec<String>),
}

impl MetadataValue {
    /// Returns the scalar string, if this is a scalar entry
    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::List(_) => None,
        }
    }

    /// Returns the list items, if this is a list entry
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Scalar(_) => None,
            Self::List(items) => Some(items),
        }
    }
}

impl From<String> for MetadataValue {
    fn from(s: String) -> Self {
        Self::Scalar(s)
    }
}

impl From<&str> for MetadataValue {
    fn from(s: &str) -> Self {
        Self::Scalar(s.to_string())
    }
}

impl From<Vec<String>> for MetadataValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<Vec<&str>> for MetadataValue {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for MetadataValue {
    fn from(items: [&str; N]) -> Self {
        Self::List(items.iter().map(|s| (*s).to_string()).collect())
    }
}

/// Ordered key/value body of a metadata entity. Key order is insertion order.
pub type MetadataValues = IndexMap<String, MetadataValue>;

/// A named configuration document.
///
/// `id` is `None` until the entity has been saved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MetadataId>,
    pub group: String,
    pub name: String,
    #[serde(default)]
    pub value: MetadataValues,
}

impl Metadata {
    /// Start building a new metadata entity
    #[must_use]
    pub fn builder() -> MetadataBuilder {
        MetadataBuilder::default()
    }

    /// Look up a single entry of the body
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.value.get(key)
    }

    /// Check the key shape: group and name must be non-empty.
    ///
    /// # Errors
    /// Returns `Error::EmptyGroup` or `Error::EmptyName`.
    pub fn validate(&self) -> Result<()> {
        if self.group.is_empty() {
            return Err(Error::EmptyGroup);
        }
        if self.name.is_empty() {
            return Err(Error::EmptyName {
                group: self.group.clone(),
            });
        }
        Ok(())
    }
}

/// Builder for [`Metadata`]
#[derive(Clone, Debug, Default)]
pub struct MetadataBuilder {
    group: String,
    name: String,
    value: MetadataValues,
}

impl MetadataBuilder {
    /// Set the group
    #[must_use]
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Set the name
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Append a body entry. Re-using a key replaces its value in place.
    #[must_use]
    pub fn value(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.value.insert(key.into(), value.into());
        self
    }

    /// Finish building. The returned entity has no id.
    ///
    /// # Errors
    /// Returns an error if the group or name is empty.
    pub fn build(self) -> Result<Metadata> {
        let metadata = Metadata {
            id: None,
            group: self.group,
            name: self.name,
            value: self.value,
        };
        metadata.validate()?;
        Ok(metadata)
    }
}
