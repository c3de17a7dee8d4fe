//! Store trait definition for ordered key-value backends.
//!
//! Queue engines only need a handful of primitives from their storage:
//! point reads and writes plus the first and last key under a byte
//! prefix. Keys are compared byte-lexicographically.

use crate::error::Result;

/// Trait for ordered key-value storage backends.
///
/// A write is durable once `put` or `delete` returns `Ok`, subject to
/// the backend's own sync policy.
pub trait Store: Send + Sync {
    /// Stores `value` under `key`, replacing any existing value.
    fn put(&self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Returns the value stored under `key`.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Removes `key`. Removing a missing key is not an error.
    fn delete(&self, key: &[u8]) -> Result<()>;

    /// Returns the smallest key starting with `prefix`.
    fn first_key(&self, prefix: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Returns the largest key starting with `prefix`.
    fn last_key(&self, prefix: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Forces buffered writes to durable storage.
    fn flush(&self) -> Result<()>;
}
