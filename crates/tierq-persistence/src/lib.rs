//! Persistence layer for tierq.
//!
//! This crate provides the ordered key-value storage the queue engines
//! are built on, plus the small marker file that records which queue
//! variant owns a data directory.
//!
//! # Example
//!
//! ```no_run
//! use tierq_persistence::{FjallStore, Store, StoreConfig};
//!
//! let store = FjallStore::open("/tmp/tierq/data", &StoreConfig::default()).unwrap();
//!
//! store.put(b"a:1", b"hello").unwrap();
//! assert_eq!(store.get(b"a:1").unwrap(), Some(b"hello".to_vec()));
//! assert_eq!(store.first_key(b"a:").unwrap(), Some(b"a:1".to_vec()));
//! ```

pub mod atomic;
pub mod config;
pub mod error;
pub mod fjall_store;
pub mod marker;
pub mod memory;
pub mod store;

pub use config::StoreConfig;
pub use error::{PersistenceError, Result};
pub use fjall_store::FjallStore;
pub use marker::{check_kind, KindCheck, Marker, MARKER_FILE};
pub use memory::MemoryStore;
pub use store::Store;
