//! Storage configuration.

/// Configuration for the on-disk key-value store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Block cache size in bytes.
    pub block_cache_size: u64,
    /// Fsync the journal after every write or delete.
    pub sync_writes: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            block_cache_size: 16 * 1024 * 1024,
            sync_writes: false,
        }
    }
}

impl StoreConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the block cache size.
    pub fn with_block_cache_size(mut self, bytes: u64) -> Self {
        self.block_cache_size = bytes;
        self
    }

    /// Sets whether every mutation is synced to disk before returning.
    pub fn with_sync_writes(mut self, sync: bool) -> Self {
        self.sync_writes = sync;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();

        assert_eq!(config.block_cache_size, 16 * 1024 * 1024);
        assert!(!config.sync_writes);
    }

    #[test]
    fn test_config_builder() {
        let config = StoreConfig::new()
            .with_block_cache_size(1024)
            .with_sync_writes(true);

        assert_eq!(config.block_cache_size, 1024);
        assert!(config.sync_writes);
    }
}
