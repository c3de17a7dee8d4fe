//! Queued item type.

use serde::de::DeserializeOwned;

/// A single unit stored in a queue, stack or priority queue.
///
/// `key` is always the storage encoding of `(priority, id)` for the
/// variant that produced the item; it is cached so updates can address
/// the item without re-encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Sequence id within the item's level, starting at 1.
    pub id: u64,

    /// Priority level. Always 0 for single-level variants.
    pub priority: u8,

    /// Encoded storage key.
    pub key: Vec<u8>,

    /// Opaque payload.
    pub value: Vec<u8>,
}

impl Item {
    /// Creates a new item.
    pub fn new(id: u64, priority: u8, key: Vec<u8>, value: Vec<u8>) -> Self {
        Self {
            id,
            priority,
            key,
            value,
        }
    }

    /// Returns the value as UTF-8, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.value).ok()
    }

    /// Returns the value as a string, replacing invalid UTF-8 sequences.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.value).into_owned()
    }

    /// Decodes a JSON-encoded value into `T`.
    pub fn to_object<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.value)
    }
}
