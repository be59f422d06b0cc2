//! Persistent metadata store backed by redb.
//!
//! Records live in one table keyed by id; two index tables resolve
//! (group, name) pairs and list groups in save order. Every save is a single
//! write transaction, so a returned save is visible to all later reads.

use crate::error::{StoreError, StoreResult};
use crate::repository::MetadataStore;
use crate::tables;
use crate::types::StoredMetadata;
use metalookup_common::{Metadata, MetadataId};
use redb::{Database, ReadableTable, WriteTransaction};
use std::path::Path;
use tracing::{debug, info};

/// Persistent metadata store backed by redb.
pub struct RedbMetadataStore {
    db: Database,
}

impl RedbMetadataStore {
    /// Open (or create) the redb database at the given path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or opened.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path)?;

        // Create all tables eagerly so later read txns don't fail
        let write_txn = db.begin_write()?;
        {
            let _t = write_txn.open_table(tables::METADATA)?;
            let _t = write_txn.open_table(tables::METADATA_BY_NAME)?;
            let _t = write_txn.open_table(tables::METADATA_BY_GROUP)?;
            let _t = write_txn.open_table(tables::COUNTERS)?;
        }
        write_txn.commit()?;

        info!("Opened metadata store at {}", path.display());
        Ok(Self { db })
    }

    fn next_seq(write_txn: &WriteTransaction) -> StoreResult<u64> {
        let mut counters = write_txn.open_table(tables::COUNTERS)?;
        let seq = counters.get(tables::NEXT_SEQ)?.map_or(0, |v| v.value());
        counters.insert(tables::NEXT_SEQ, seq + 1)?;
        Ok(seq)
    }

    fn decode(key: &str, bytes: &[u8]) -> StoreResult<Metadata> {
        let id: MetadataId = key
            .parse()
            .map_err(|e| StoreError::Corrupt(format!("record key: {e}")))?;
        let stored: StoredMetadata = bincode::deserialize(bytes)?;
        Ok(stored.into_metadata(id))
    }

    fn load(
        records: &impl ReadableTable<&'static str, &'static [u8]>,
        key: &str,
    ) -> StoreResult<Metadata> {
        match records.get(key)? {
            Some(bytes) => Self::decode(key, bytes.value()),
            None => Err(StoreError::Corrupt(format!(
                "index points at missing record {key}"
            ))),
        }
    }

    /// Id of the latest-inserted entity other than `exclude` holding (group, name)
    fn latest_holder(
        records: &impl ReadableTable<&'static str, &'static [u8]>,
        by_group: &impl ReadableTable<(&'static str, u64), &'static str>,
        group: &str,
        name: &str,
        exclude: &str,
    ) -> StoreResult<Option<String>> {
        for entry in by_group.range(tables::group_range(group))?.rev() {
            let (_, key) = entry?;
            let key = key.value();
            if key == exclude {
                continue;
            }
            let Some(bytes) = records.get(key)? else {
                return Err(StoreError::Corrupt(format!(
                    "index points at missing record {key}"
                )));
            };
            let stored: StoredMetadata = bincode::deserialize(bytes.value())?;
            if stored.name == name {
                return Ok(Some(key.to_string()));
            }
        }
        Ok(None)
    }
}

impl MetadataStore for RedbMetadataStore {
    fn save(&self, mut metadata: Metadata) -> StoreResult<Metadata> {
        metadata.validate()?;
        let id = *metadata.id.get_or_insert_with(MetadataId::new);
        let key = id.to_string();

        let write_txn = self.db.begin_write()?;
        {
            let mut records = write_txn.open_table(tables::METADATA)?;
            let mut by_name = write_txn.open_table(tables::METADATA_BY_NAME)?;
            let mut by_group = write_txn.open_table(tables::METADATA_BY_GROUP)?;

            let previous: Option<StoredMetadata> = match records.get(key.as_str())? {
                Some(bytes) => Some(bincode::deserialize(bytes.value())?),
                None => None,
            };

            let seq = match previous {
                Some(prev) => {
                    if prev.group != metadata.group || prev.name != metadata.name {
                        let old_pair = (prev.group.as_str(), prev.name.as_str());
                        let points_here = by_name
                            .get(old_pair)?
                            .is_some_and(|v| v.value() == key);
                        if points_here {
                            // Hand the pair to another entity still holding it
                            let survivor = Self::latest_holder(
                                &records,
                                &by_group,
                                &prev.group,
                                &prev.name,
                                &key,
                            )?;
                            match survivor {
                                Some(other) => by_name.insert(old_pair, other.as_str())?,
                                None => by_name.remove(old_pair)?,
                            };
                        }
                    }
                    if prev.group != metadata.group {
                        by_group.remove((prev.group.as_str(), prev.seq))?;
                        by_group.insert((metadata.group.as_str(), prev.seq), key.as_str())?;
                    }
                    prev.seq
                }
                None => {
                    let seq = Self::next_seq(&write_txn)?;
                    by_group.insert((metadata.group.as_str(), seq), key.as_str())?;
                    seq
                }
            };

            by_name.insert(
                (metadata.group.as_str(), metadata.name.as_str()),
                key.as_str(),
            )?;
            let bytes = bincode::serialize(&StoredMetadata::from_metadata(metadata.clone(), seq))?;
            records.insert(key.as_str(), bytes.as_slice())?;
        }
        write_txn.commit()?;

        debug!("Saved metadata {} ({}:{})", key, metadata.group, metadata.name);
        Ok(metadata)
    }

    fn delete_all(&self) -> StoreResult<()> {
        // Drop and recreate; the sequence counter keeps counting
        let write_txn = self.db.begin_write()?;
        write_txn.delete_table(tables::METADATA)?;
        write_txn.delete_table(tables::METADATA_BY_NAME)?;
        write_txn.delete_table(tables::METADATA_BY_GROUP)?;
        {
            let _t = write_txn.open_table(tables::METADATA)?;
            let _t = write_txn.open_table(tables::METADATA_BY_NAME)?;
            let _t = write_txn.open_table(tables::METADATA_BY_GROUP)?;
        }
        write_txn.commit()?;

        info!("Deleted all metadata");
        Ok(())
    }

    fn find_by_id(&self, id: &MetadataId) -> StoreResult<Option<Metadata>> {
        let key = id.to_string();
        let read_txn = self.db.begin_read()?;
        let records = read_txn.open_table(tables::METADATA)?;
        match records.get(key.as_str())? {
            Some(bytes) => Self::decode(&key, bytes.value()).map(Some),
            None => Ok(None),
        }
    }

    fn find_by_group_and_name(&self, group: &str, name: &str) -> StoreResult<Option<Metadata>> {
        let read_txn = self.db.begin_read()?;
        let by_name = read_txn.open_table(tables::METADATA_BY_NAME)?;
        let Some(key) = by_name
            .get((group, name))?
            .map(|v| v.value().to_string())
        else {
            return Ok(None);
        };
        let records = read_txn.open_table(tables::METADATA)?;
        Self::load(&records, &key).map(Some)
    }

    fn find_all_by_group(&self, group: &str) -> StoreResult<Vec<Metadata>> {
        let read_txn = self.db.begin_read()?;
        let by_group = read_txn.open_table(tables::METADATA_BY_GROUP)?;
        let records = read_txn.open_table(tables::METADATA)?;

        let mut result = Vec::new();
        for entry in by_group.range(tables::group_range(group))? {
            let (_, key) = entry?;
            result.push(Self::load(&records, key.value())?);
        }
        Ok(result)
    }
}
