//! Head/tail counters for a sequence of queued ids.
//!
//! A level holds the ids in `(head, tail]`. Counters are never persisted:
//! they are rebuilt from the first and last key under the level's prefix
//! every time a queue is opened.

use tierq_models::Item;
use tierq_persistence::{PersistenceError, Store};

use crate::error::{QueueError, Result};
use crate::key;

/// Number of priority levels.
pub const LEVEL_COUNT: usize = 256;

/// Counters bounding the ids present in one sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Level {
    /// Id of the last removed item, 0 if none.
    pub head: u64,
    /// Id of the last inserted item, 0 if none.
    pub tail: u64,
}

impl Level {
    /// Number of items in this level.
    pub fn len(&self) -> u64 {
        self.tail - self.head
    }

    /// Returns true if the level holds no items.
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Returns true if `id` is currently queued in this level.
    pub fn contains(&self, id: u64) -> bool {
        id > self.head && id <= self.tail
    }

    /// Validates that `id` can be read: `Empty` for an empty level,
    /// `OutOfBounds` for an id outside `(head, tail]`.
    pub fn check(&self, id: u64) -> Result<()> {
        if self.is_empty() {
            return Err(QueueError::Empty);
        }
        if !self.contains(id) {
            return Err(QueueError::OutOfBounds);
        }
        Ok(())
    }

    /// Id the next inserted item will receive.
    pub fn next_id(&self) -> Result<u64> {
        self.tail.checked_add(1).ok_or(QueueError::OutOfBounds)
    }

    /// Rebuilds counters from the keys stored under `prefix`.
    ///
    /// The id is the 8-byte big-endian suffix following the prefix.
    pub fn recover<S: Store>(store: &S, prefix: &[u8]) -> Result<Self> {
        let first = store.first_key(prefix)?;
        let last = store.last_key(prefix)?;

        match (first, last) {
            (Some(first), Some(last)) => {
                let first = decode_suffix(&first, prefix)?;
                let last = decode_suffix(&last, prefix)?;
                Ok(Self {
                    head: first - 1,
                    tail: last,
                })
            }
            _ => Ok(Self::default()),
        }
    }
}

fn decode_suffix(raw: &[u8], prefix: &[u8]) -> Result<u64> {
    raw.get(prefix.len()..)
        .and_then(key::decode_id)
        .filter(|id| *id > 0)
        .ok_or_else(|| {
            PersistenceError::InvalidData(format!("malformed item key {:?}", raw)).into()
        })
}

/// Reads the item stored at `key`, after checking `id` against `level`.
pub(crate) fn load_item<S: Store>(
    store: &S,
    level: &Level,
    priority: u8,
    id: u64,
    key: Vec<u8>,
) -> Result<Item> {
    level.check(id)?;

    let value = store.get(&key)?.ok_or_else(|| PersistenceError::NotFound {
        kind: "item".to_string(),
        id: format!("{}/{}", priority, id),
    })?;

    Ok(Item::new(id, priority, key, value))
}

/// The 256 per-priority levels, indexed directly by priority value.
#[derive(Debug, Clone)]
pub struct Levels {
    levels: [Level; LEVEL_COUNT],
}

impl Default for Levels {
    fn default() -> Self {
        Self {
            levels: [Level::default(); LEVEL_COUNT],
        }
    }
}

impl Levels {
    /// Creates 256 empty levels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds every level from storage with one bounded scan per level.
    pub fn recover<S: Store>(store: &S) -> Result<Self> {
        let mut levels = Self::new();
        for priority in 0..=u8::MAX {
            levels.levels[priority as usize] = Level::recover(store, &key::priority_prefix(priority))?;
        }
        Ok(levels)
    }

    /// Returns the level for `priority`.
    pub fn get(&self, priority: u8) -> &Level {
        &self.levels[priority as usize]
    }

    /// Returns the level for `priority` mutably.
    pub fn get_mut(&mut self, priority: u8) -> &mut Level {
        &mut self.levels[priority as usize]
    }

    /// Total number of items across all levels.
    pub fn total_len(&self) -> u64 {
        self.levels.iter().map(Level::len).sum()
    }
}
