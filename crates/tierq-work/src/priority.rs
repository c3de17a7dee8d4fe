//! PriorityQueue - durable FIFO queue with 256 priority levels.
//!
//! Items are stored under `[priority, ':', id]` keys. Each level keeps its
//! own head/tail counters, and a cursor tracks which level is served
//! next. Dequeues drain the most important nonempty level first, FIFO
//! within a level.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::Serialize;
use tierq_models::{Item, Order, QueueKind};
use tierq_persistence::{FjallStore, Store};
use tracing::{debug, info, warn};

use crate::config::QueueConfig;
use crate::error::{QueueError, Result};
use crate::handle;
use crate::key;
use crate::level::{load_item, Level, Levels};
use crate::policy::Cursor;

/// Mutable queue state, guarded by one lock for all levels.
struct State<S> {
    store: Option<S>,
    levels: Levels,
    cursor: Cursor,
}

impl<S> State<S> {
    fn store(&self) -> Result<&S> {
        self.store.as_ref().ok_or(QueueError::Closed)
    }
}

/// Durable priority queue.
///
/// # Concurrency
///
/// One `RwLock` guards every level. Enqueue, dequeue and update take the
/// write lock; peeks and length take the read lock. Storage calls run
/// while the lock is held, so a slow disk blocks other callers.
///
/// # Recovery
///
/// Counters are rebuilt on open from the first and last key of each
/// level; nothing besides the items themselves is persisted.
///
/// # Example
///
/// ```no_run
/// use tierq_models::Order;
/// use tierq_work::PriorityQueue;
///
/// let queue = PriorityQueue::open("/tmp/jobs", Order::Asc).unwrap();
///
/// queue.enqueue(5, "routine").unwrap();
/// queue.enqueue(0, "urgent").unwrap();
///
/// assert_eq!(queue.dequeue().unwrap().as_str(), Some("urgent"));
/// ```
pub struct PriorityQueue<S: Store = FjallStore> {
    path: Option<PathBuf>,
    order: Order,
    state: RwLock<State<S>>,
}

impl PriorityQueue<FjallStore> {
    /// Opens the priority queue at `dir`, creating it if needed.
    pub fn open(dir: impl AsRef<Path>, order: Order) -> Result<Self> {
        Self::open_with_config(dir, QueueConfig::new().with_order(order))
    }

    /// Opens the priority queue at `dir` with explicit configuration.
    pub fn open_with_config(dir: impl AsRef<Path>, config: QueueConfig) -> Result<Self> {
        let dir = dir.as_ref();
        let store = handle::open_store(dir, QueueKind::Priority, &config.store)?;
        Self::recover(store, config.order, Some(dir.to_path_buf()))
    }
}

impl<S: Store> PriorityQueue<S> {
    /// Builds a queue over an already-open store, recovering its state.
    pub fn with_store(store: S, order: Order) -> Result<Self> {
        Self::recover(store, order, None)
    }

    fn recover(store: S, order: Order, path: Option<PathBuf>) -> Result<Self> {
        let levels = Levels::recover(&store)?;
        let cursor = Cursor::recover(order, &levels);

        info!(
            path = ?path,
            %order,
            length = levels.total_len(),
            cursor = cursor.level(),
            "Opened priority queue"
        );

        Ok(Self {
            path,
            order,
            state: RwLock::new(State {
                store: Some(store),
                levels,
                cursor,
            }),
        })
    }

    /// Adds an item at `priority`.
    ///
    /// If the write fails nothing changes and the id is reused by the next
    /// enqueue at that level.
    pub fn enqueue(&self, priority: u8, value: impl Into<Vec<u8>>) -> Result<Item> {
        let mut state = handle::write(&self.state)?;
        let state = &mut *state;
        let store = state.store.as_ref().ok_or(QueueError::Closed)?;

        let level = state.levels.get_mut(priority);
        let id = level.next_id()?;
        let key = key::priority_key(priority, id);
        let value = value.into();

        store.put(&key, &value)?;
        level.tail = id;
        state.cursor.on_enqueue(priority);

        debug!(priority, id, "Enqueued item");
        Ok(Item::new(id, priority, key, value))
    }

    /// Adds a string item at `priority`.
    pub fn enqueue_string(&self, priority: u8, value: &str) -> Result<Item> {
        self.enqueue(priority, value.as_bytes())
    }

    /// Adds a JSON-encoded item at `priority`.
    pub fn enqueue_object<T: Serialize>(&self, priority: u8, value: &T) -> Result<Item> {
        let bytes = serde_json::to_vec(value)?;
        self.enqueue(priority, bytes)
    }

    /// Removes and returns the next item in priority order.
    ///
    /// If removing the item from storage fails, the item comes back inside
    /// [`QueueError::Unacknowledged`] and stays queued.
    pub fn dequeue(&self) -> Result<Item> {
        let mut state = handle::write(&self.state)?;
        let state = &mut *state;
        let store = state.store.as_ref().ok_or(QueueError::Closed)?;

        let priority = state.cursor.settle(&state.levels).ok_or(QueueError::Empty)?;
        take_head(store, state.levels.get_mut(priority), priority)
    }

    /// Removes and returns the next item of one priority level, ignoring
    /// the cursor.
    pub fn dequeue_by_priority(&self, priority: u8) -> Result<Item> {
        let mut state = handle::write(&self.state)?;
        let state = &mut *state;
        let store = state.store.as_ref().ok_or(QueueError::Closed)?;

        take_head(store, state.levels.get_mut(priority), priority)
    }

    /// Returns the next item without removing it.
    pub fn peek(&self) -> Result<Item> {
        let state = handle::read(&self.state)?;
        let store = state.store()?;

        let priority = state.cursor.peek(&state.levels).ok_or(QueueError::Empty)?;
        let level = state.levels.get(priority);
        let id = level.head + 1;

        load_item(store, level, priority, id, key::priority_key(priority, id))
    }

    /// Returns the item that the `offset`-th dequeue (0-based) would
    /// return, without removing anything.
    pub fn peek_by_offset(&self, offset: u64) -> Result<Item> {
        let state = handle::read(&self.state)?;
        let store = state.store()?;

        let start = state
            .cursor
            .peek(&state.levels)
            .ok_or(QueueError::OutOfBounds)?;

        let mut covered = 0u64;
        for priority in self.order.descending_from(start) {
            let level = state.levels.get(priority);
            let remaining = offset - covered;

            if remaining < level.len() {
                let id = level.head + remaining + 1;
                return load_item(store, level, priority, id, key::priority_key(priority, id));
            }
            covered += level.len();
        }

        Err(QueueError::OutOfBounds)
    }

    /// Returns the item with `id` in level `priority` without removing it.
    pub fn peek_by_priority_id(&self, priority: u8, id: u64) -> Result<Item> {
        let state = handle::read(&self.state)?;
        let store = state.store()?;

        load_item(
            store,
            state.levels.get(priority),
            priority,
            id,
            key::priority_key(priority, id),
        )
    }

    /// Replaces an item's value in place. Its position is unchanged.
    ///
    /// Items that have already been dequeued are rejected with
    /// [`QueueError::OutOfBounds`].
    pub fn update(&self, item: &mut Item, value: impl Into<Vec<u8>>) -> Result<()> {
        let state = handle::write(&self.state)?;
        let store = state.store()?;

        if !state.levels.get(item.priority).contains(item.id) {
            return Err(QueueError::OutOfBounds);
        }

        let key = key::priority_key(item.priority, item.id);
        let value = value.into();
        store.put(&key, &value)?;

        debug!(priority = item.priority, id = item.id, "Updated item");
        item.key = key;
        item.value = value;
        Ok(())
    }

    /// Replaces an item's value with a string.
    pub fn update_string(&self, item: &mut Item, value: &str) -> Result<()> {
        self.update(item, value.as_bytes())
    }

    /// Replaces an item's value with a JSON-encoded object.
    pub fn update_object<T: Serialize>(&self, item: &mut Item, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec(value)?;
        self.update(item, bytes)
    }

    /// Total number of queued items. Zero once closed.
    pub fn len(&self) -> u64 {
        handle::read(&self.state)
            .map(|s| if s.store.is_some() { s.levels.total_len() } else { 0 })
            .unwrap_or(0)
    }

    /// Returns true if the queue holds no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of items queued at `priority`. Zero once closed.
    pub fn level_len(&self, priority: u8) -> u64 {
        handle::read(&self.state)
            .map(|s| {
                if s.store.is_some() {
                    s.levels.get(priority).len()
                } else {
                    0
                }
            })
            .unwrap_or(0)
    }

    /// The ordering mode chosen at open.
    pub fn order(&self) -> Order {
        self.order
    }

    /// Directory backing this queue, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns true until [`close`](Self::close) is called.
    pub fn is_open(&self) -> bool {
        handle::read(&self.state)
            .map(|s| s.store.is_some())
            .unwrap_or(false)
    }

    /// Flushes and releases the store. Closing twice is a no-op.
    pub fn close(&self) -> Result<()> {
        let mut state = handle::write(&self.state)?;
        if let Some(store) = state.store.take() {
            store.flush()?;
            info!(path = ?self.path, "Closed priority queue");
        }
        Ok(())
    }

    /// Closes the queue and deletes its directory.
    pub fn destroy(self) -> Result<()> {
        self.close()?;
        if let Some(path) = &self.path {
            handle::remove_dir(path)?;
            info!(path = %path.display(), "Removed priority queue");
        }
        Ok(())
    }
}

impl<S: Store> Drop for PriorityQueue<S> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!(error = %e, "Failed to close priority queue");
        }
    }
}

/// Reads the oldest item of `level` and acknowledges it.
fn take_head<S: Store>(store: &S, level: &mut Level, priority: u8) -> Result<Item> {
    let id = level.head + 1;
    let item = load_item(store, level, priority, id, key::priority_key(priority, id))?;
    acknowledge(store, level, item)
}

/// Deletes a read item and advances the level head. The head only moves
/// once the delete succeeds.
fn acknowledge<S: Store>(store: &S, level: &mut Level, item: Item) -> Result<Item> {
    if let Err(source) = store.delete(&item.key) {
        warn!(
            priority = item.priority,
            id = item.id,
            error = %source,
            "Failed to remove dequeued item, it will be delivered again"
        );
        return Err(QueueError::Unacknowledged {
            item: Box::new(item),
            source,
        });
    }

    level.head += 1;
    debug!(priority = item.priority, id = item.id, "Dequeued item");
    Ok(item)
}
