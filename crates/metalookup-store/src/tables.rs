//! Redb table definitions for persistent metadata storage.

use redb::TableDefinition;
use std::ops::RangeInclusive;

// Key: metadata id (hyphenated uuid), Value: bincode-encoded StoredMetadata
pub const METADATA: TableDefinition<&str, &[u8]> = TableDefinition::new("metadata");
// Key: (group, name), Value: metadata id
pub const METADATA_BY_NAME: TableDefinition<(&str, &str), &str> =
    TableDefinition::new("metadata_by_name");
// Key: (group, seq), Value: metadata id
pub const METADATA_BY_GROUP: TableDefinition<(&str, u64), &str> =
    TableDefinition::new("metadata_by_group");
// Key: counter name, Value: next value
pub const COUNTERS: TableDefinition<&str, u64> = TableDefinition::new("counters");

pub const NEXT_SEQ: &str = "next_seq";

/// Key range covering every group index entry of `group`, in save order
pub const fn group_range(group: &str) -> RangeInclusive<(&str, u64)> {
    (group, 0)..=(group, u64::MAX)
}
