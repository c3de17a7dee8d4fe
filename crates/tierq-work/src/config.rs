//! Queue configuration.

use tierq_models::Order;
use tierq_persistence::StoreConfig;

/// Configuration used when opening a queue.
#[derive(Debug, Clone, Default)]
pub struct QueueConfig {
    /// Priority ordering. Ignored by the single-level variants.
    pub order: Order,
    /// Settings for the underlying key-value store.
    pub store: StoreConfig,
}

impl QueueConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the priority ordering.
    pub fn with_order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    /// Sets the store configuration.
    pub fn with_store(mut self, store: StoreConfig) -> Self {
        self.store = store;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = QueueConfig::default();

        assert_eq!(config.order, Order::Asc);
        assert!(!config.store.sync_writes);
    }

    #[test]
    fn test_config_builder() {
        let config = QueueConfig::new()
            .with_order(Order::Desc)
            .with_store(StoreConfig::new().with_sync_writes(true));

        assert_eq!(config.order, Order::Desc);
        assert!(config.store.sync_writes);
    }
}
