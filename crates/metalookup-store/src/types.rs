//! Stored types for metadata persistence.
//!
//! These types are serialized to redb via bincode. The wire-facing
//! `MetadataValue` is untagged, which bincode cannot decode, so records go
//! through an externally tagged mirror.

use metalookup_common::{Metadata, MetadataId, MetadataValue};
use serde::{Deserialize, Serialize};

/// A single body entry as persisted
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoredValue {
    Scalar(String),
    List(Vec<String>),
}

impl From<MetadataValue> for StoredValue {
    fn from(value: MetadataValue) -> Self {
        match value {
            MetadataValue::Scalar(s) => Self::Scalar(s),
            MetadataValue::List(items) => Self::List(items),
        }
    }
}

impl From<StoredValue> for MetadataValue {
    fn from(value: StoredValue) -> Self {
        match value {
            StoredValue::Scalar(s) => Self::Scalar(s),
            StoredValue::List(items) => Self::List(items),
        }
    }
}

/// Metadata record as persisted. The id is the table key.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredMetadata {
    /// Save sequence number, fixed at first insert
    pub seq: u64,
    pub group: String,
    pub name: String,
    /// Body entries in insertion order
    pub value: Vec<(String, StoredValue)>,
}

impl StoredMetadata {
    pub fn from_metadata(metadata: Metadata, seq: u64) -> Self {
        Self {
            seq,
            group: metadata.group,
            name: metadata.name,
            value: metadata
                .value
                .into_iter()
                .map(|(k, v)| (k, v.into()))
                .collect(),
        }
    }

    pub fn into_metadata(self, id: MetadataId) -> Metadata {
        Metadata {
            id: Some(id),
            group: self.group,
            name: self.name,
            value: self
                .value
                .into_iter()
                .map(|(k, v)| (k, v.into()))
                .collect(),
        }
    }
}
