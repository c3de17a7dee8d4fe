//! Fjall-backed store.

use std::fs;
use std::path::{Path, PathBuf};

use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use tracing::debug;

use crate::config::StoreConfig;
use crate::error::{PersistenceError, Result};
use crate::store::Store;

/// Name of the partition holding queue items.
const ITEMS_PARTITION: &str = "items";

/// Ordered key-value store on top of a fjall LSM keyspace.
///
/// All items live in a single partition; the queue engines carve it up
/// with key prefixes.
pub struct FjallStore {
    path: PathBuf,
    keyspace: Keyspace,
    items: PartitionHandle,
    sync_writes: bool,
}

impl FjallStore {
    /// Opens (or creates) a keyspace at `path`.
    pub fn open(path: impl Into<PathBuf>, config: &StoreConfig) -> Result<Self> {
        let path = path.into();
        fs::create_dir_all(&path).map_err(|source| PersistenceError::DirectoryError {
            path: path.clone(),
            source,
        })?;

        let keyspace = fjall::Config::new(&path)
            .cache_size(config.block_cache_size)
            .open()?;
        let items = keyspace.open_partition(ITEMS_PARTITION, PartitionCreateOptions::default())?;

        debug!(path = %path.display(), "Opened keyspace");

        Ok(Self {
            path,
            keyspace,
            items,
            sync_writes: config.sync_writes,
        })
    }

    /// Returns the keyspace directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn after_write(&self) -> Result<()> {
        if self.sync_writes {
            self.keyspace.persist(PersistMode::SyncAll)?;
        }
        Ok(())
    }
}

impl Store for FjallStore {
    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.items.insert(key, value)?;
        self.after_write()
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.items.get(key)?.map(|value| value.to_vec()))
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        self.items.remove(key)?;
        self.after_write()
    }

    fn first_key(&self, prefix: &[u8]) -> Result<Option<Vec<u8>>> {
        let first = self.items.prefix(prefix).next().transpose()?;
        Ok(first.map(|(key, _)| key.to_vec()))
    }

    fn last_key(&self, prefix: &[u8]) -> Result<Option<Vec<u8>>> {
        let last = self.items.prefix(prefix).next_back().transpose()?;
        Ok(last.map(|(key, _)| key.to_vec()))
    }

    fn flush(&self) -> Result<()> {
        self.keyspace.persist(PersistMode::SyncAll)?;
        Ok(())
    }
}
