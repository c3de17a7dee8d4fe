//! Queue - durable single-level FIFO queue.
//!
//! Same key scheme as one priority level, without the priority byte:
//! items live under their 8-byte big-endian id.

use std::path::Path;

use serde::Serialize;
use tierq_models::{Item, QueueKind};
use tierq_persistence::{FjallStore, Store};

use crate::config::QueueConfig;
use crate::error::Result;
use crate::single::{End, SingleLevel};

/// Durable first-in, first-out queue.
pub struct Queue<S: Store = FjallStore> {
    inner: SingleLevel<S>,
}

impl Queue<FjallStore> {
    /// Opens the queue at `dir`, creating it if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(dir, QueueConfig::default())
    }

    /// Opens the queue at `dir` with explicit configuration.
    pub fn open_with_config(dir: impl AsRef<Path>, config: QueueConfig) -> Result<Self> {
        let inner = SingleLevel::open(dir.as_ref(), QueueKind::Queue, End::Front, &config)?;
        Ok(Self { inner })
    }
}

impl<S: Store> Queue<S> {
    /// Builds a queue over an already-open store, recovering its state.
    pub fn with_store(store: S) -> Result<Self> {
        let inner = SingleLevel::recover(store, QueueKind::Queue, End::Front, None)?;
        Ok(Self { inner })
    }

    /// Appends an item to the back of the queue.
    pub fn enqueue(&self, value: impl Into<Vec<u8>>) -> Result<Item> {
        self.inner.append(value.into())
    }

    /// Appends a string item.
    pub fn enqueue_string(&self, value: &str) -> Result<Item> {
        self.enqueue(value.as_bytes())
    }

    /// Appends a JSON-encoded item.
    pub fn enqueue_object<T: Serialize>(&self, value: &T) -> Result<Item> {
        self.enqueue(serde_json::to_vec(value)?)
    }

    /// Removes and returns the item at the front of the queue.
    ///
    /// If removing the item from storage fails, the item comes back inside
    /// [`QueueError::Unacknowledged`](crate::QueueError::Unacknowledged)
    /// and stays queued.
    pub fn dequeue(&self) -> Result<Item> {
        self.inner.take()
    }

    /// Returns the front item without removing it.
    pub fn peek(&self) -> Result<Item> {
        self.inner.peek()
    }

    /// Returns the item `offset` positions behind the front.
    pub fn peek_by_offset(&self, offset: u64) -> Result<Item> {
        self.inner.peek_by_offset(offset)
    }

    /// Returns the item with `id` without removing it.
    pub fn peek_by_id(&self, id: u64) -> Result<Item> {
        self.inner.peek_by_id(id)
    }

    /// Replaces an item's value in place.
    pub fn update(&self, item: &mut Item, value: impl Into<Vec<u8>>) -> Result<()> {
        self.inner.update(item, value.into())
    }

    /// Replaces an item's value with a string.
    pub fn update_string(&self, item: &mut Item, value: &str) -> Result<()> {
        self.update(item, value.as_bytes())
    }

    /// Replaces an item's value with a JSON-encoded object.
    pub fn update_object<T: Serialize>(&self, item: &mut Item, value: &T) -> Result<()> {
        self.update(item, serde_json::to_vec(value)?)
    }

    /// Number of queued items. Zero once closed.
    pub fn len(&self) -> u64 {
        self.inner.len()
    }

    /// Returns true if the queue holds no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Directory backing this queue, if any.
    pub fn path(&self) -> Option<&Path> {
        self.inner.path()
    }

    /// Flushes and releases the store. Closing twice is a no-op.
    pub fn close(&self) -> Result<()> {
        self.inner.close()
    }

    /// Closes the queue and deletes its directory.
    pub fn destroy(self) -> Result<()> {
        self.inner.destroy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueueError;
    use tempfile::tempdir;
    use tierq_persistence::MemoryStore;

    fn make_queue() -> Queue<MemoryStore> {
        Queue::with_store(MemoryStore::new()).unwrap()
    }

    #[test]
    fn test_fifo_order() {
        let queue = make_queue();

        for value in ["first", "second", "third"] {
            queue.enqueue_string(value).unwrap();
        }

        assert_eq!(queue.dequeue().unwrap().as_str(), Some("first"));
        assert_eq!(queue.dequeue().unwrap().as_str(), Some("second"));
        assert_eq!(queue.dequeue().unwrap().as_str(), Some("third"));
        assert!(matches!(queue.dequeue(), Err(QueueError::Empty)));
    }

    #[test]
    fn test_peek_variants() {
        let queue = make_queue();
        assert!(matches!(queue.peek(), Err(QueueError::Empty)));

        queue.enqueue("a").unwrap();
        let b = queue.enqueue("b").unwrap();

        assert_eq!(queue.peek().unwrap().as_str(), Some("a"));
        assert_eq!(queue.peek_by_offset(1).unwrap().as_str(), Some("b"));
        assert!(matches!(
            queue.peek_by_offset(2),
            Err(QueueError::OutOfBounds)
        ));
        assert_eq!(queue.peek_by_id(b.id).unwrap(), b);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_update() {
        let queue = make_queue();
        let mut item = queue.enqueue("a").unwrap();

        queue.update_string(&mut item, "z").unwrap();
        assert_eq!(queue.peek().unwrap().as_str(), Some("z"));

        queue.dequeue().unwrap();
        assert!(matches!(
            queue.update(&mut item, "y"),
            Err(QueueError::OutOfBounds)
        ));
    }

    #[test]
    fn test_failed_delete_redelivers() {
        let queue = make_queue();
        queue.enqueue("a").unwrap();

        queue.inner.with_store_ref(|s| s.fail_deletes(true));
        assert!(matches!(
            queue.dequeue(),
            Err(QueueError::Unacknowledged { .. })
        ));

        queue.inner.with_store_ref(|s| s.fail_deletes(false));
        assert_eq!(queue.dequeue().unwrap().as_str(), Some("a"));
    }

    #[test]
    fn test_reopen() {
        let dir = tempdir().unwrap();

        {
            let queue = Queue::open(dir.path()).unwrap();
            for value in ["a", "b", "c"] {
                queue.enqueue(value).unwrap();
            }
            queue.dequeue().unwrap();
            queue.close().unwrap();
        }

        let queue = Queue::open(dir.path()).unwrap();
        assert_eq!(queue.path(), Some(dir.path()));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.enqueue("d").unwrap().id, 4);
        assert_eq!(queue.dequeue().unwrap().as_str(), Some("b"));
    }

    #[test]
    fn test_destroy() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fifo");

        let queue = Queue::open(&path).unwrap();
        queue.enqueue("a").unwrap();
        queue.destroy().unwrap();
        assert!(!path.exists());
    }
}
