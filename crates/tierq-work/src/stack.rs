//! Stack - durable single-level LIFO stack.
//!
//! Shares the queue's key scheme; items are pushed and popped at the
//! tail of the level.

use std::path::Path;

use serde::Serialize;
use tierq_models::{Item, QueueKind};
use tierq_persistence::{FjallStore, Store};

use crate::config::QueueConfig;
use crate::error::Result;
use crate::single::{End, SingleLevel};

/// Durable last-in, first-out stack.
pub struct Stack<S: Store = FjallStore> {
    inner: SingleLevel<S>,
}

impl Stack<FjallStore> {
    /// Opens the stack at `dir`, creating it if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(dir, QueueConfig::default())
    }

    /// Opens the stack at `dir` with explicit configuration.
    pub fn open_with_config(dir: impl AsRef<Path>, config: QueueConfig) -> Result<Self> {
        let inner = SingleLevel::open(dir.as_ref(), QueueKind::Stack, End::Back, &config)?;
        Ok(Self { inner })
    }
}

impl<S: Store> Stack<S> {
    /// Builds a stack over an already-open store, recovering its state.
    pub fn with_store(store: S) -> Result<Self> {
        let inner = SingleLevel::recover(store, QueueKind::Stack, End::Back, None)?;
        Ok(Self { inner })
    }

    /// Pushes an item on top of the stack.
    pub fn push(&self, value: impl Into<Vec<u8>>) -> Result<Item> {
        self.inner.append(value.into())
    }

    /// Pushes a string item.
    pub fn push_string(&self, value: &str) -> Result<Item> {
        self.push(value.as_bytes())
    }

    /// Pushes a JSON-encoded item.
    pub fn push_object<T: Serialize>(&self, value: &T) -> Result<Item> {
        self.push(serde_json::to_vec(value)?)
    }

    /// Removes and returns the top item.
    pub fn pop(&self) -> Result<Item> {
        self.inner.take()
    }

    /// Returns the top item without removing it.
    pub fn peek(&self) -> Result<Item> {
        self.inner.peek()
    }

    /// Returns the item `offset` positions below the top.
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

    /// Number of items on the stack. Zero once closed.
    pub fn len(&self) -> u64 {
        self.inner.len()
    }

    /// Returns true if the stack holds no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Directory backing this stack, if any.
    pub fn path(&self) -> Option<&Path> {
        self.inner.path()
    }

    /// Flushes and releases the store. Closing twice is a no-op.
    pub fn close(&self) -> Result<()> {
        self.inner.close()
    }

    /// Closes the stack and deletes its directory.
    pub fn destroy(self) -> Result<()> {
        self.inner.destroy()
    }
}
