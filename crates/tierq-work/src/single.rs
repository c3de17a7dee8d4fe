//! Single-level storage shared by [`Queue`](crate::Queue) and
//! [`Stack`](crate::Stack).
//!
//! Both keep one head/tail pair and store items under their bare 8-byte
//! id. They differ only in which end items are taken from.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tierq_models::{Item, QueueKind};
use tierq_persistence::{FjallStore, Store};
use tracing::{debug, info, warn};

use crate::config::QueueConfig;
use crate::error::{QueueError, Result};
use crate::handle;
use crate::key;
use crate::level::{load_item, Level};

/// End of the level that removals and offset peeks start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum End {
    /// Oldest item first.
    Front,
    /// Newest item first.
    Back,
}

impl End {
    /// Id of the item `offset` positions from this end. `offset` must be
    /// below `level.len()`.
    fn id_at(self, level: &Level, offset: u64) -> u64 {
        match self {
            End::Front => level.head + offset + 1,
            End::Back => level.tail - offset,
        }
    }
}

struct State<S> {
    store: Option<S>,
    level: Level,
}

pub(crate) struct SingleLevel<S: Store> {
    kind: QueueKind,
    end: End,
    path: Option<PathBuf>,
    state: RwLock<State<S>>,
}

impl SingleLevel<FjallStore> {
    pub(crate) fn open(
        dir: &Path,
        kind: QueueKind,
        end: End,
        config: &QueueConfig,
    ) -> Result<Self> {
        let store = handle::open_store(dir, kind, &config.store)?;
        Self::recover(store, kind, end, Some(dir.to_path_buf()))
    }
}

impl<S: Store> SingleLevel<S> {
    pub(crate) fn recover(
        store: S,
        kind: QueueKind,
        end: End,
        path: Option<PathBuf>,
    ) -> Result<Self> {
        let level = Level::recover(&store, &[])?;
        info!(%kind, path = ?path, length = level.len(), "Opened queue");

        Ok(Self {
            kind,
            end,
            path,
            state: RwLock::new(State {
                store: Some(store),
                level,
            }),
        })
    }

    /// Appends an item after the current tail.
    pub(crate) fn append(&self, value: Vec<u8>) -> Result<Item> {
        let mut state = handle::write(&self.state)?;
        let state = &mut *state;
        let store = state.store.as_ref().ok_or(QueueError::Closed)?;

        let id = state.level.next_id()?;
        let key = key::id_key(id);

        store.put(&key, &value)?;
        state.level.tail = id;

        debug!(kind = %self.kind, id, "Added item");
        Ok(Item::new(id, 0, key, value))
    }

    /// Removes the item at this level's serving end. The counter only
    /// moves once the delete succeeds.
    pub(crate) fn take(&self) -> Result<Item> {
        let mut state = handle::write(&self.state)?;
        let state = &mut *state;
        let store = state.store.as_ref().ok_or(QueueError::Closed)?;

        let id = self.end.id_at(&state.level, 0);
        let item = load_item(store, &state.level, 0, id, key::id_key(id))?;

        if let Err(source) = store.delete(&item.key) {
            warn!(
                kind = %self.kind,
                id,
                error = %source,
                "Failed to remove item, it will be delivered again"
            );
            return Err(QueueError::Unacknowledged {
                item: Box::new(item),
                source,
            });
        }

        match self.end {
            End::Front => state.level.head = id,
            End::Back => state.level.tail = id - 1,
        }
        debug!(kind = %self.kind, id, "Removed item");
        Ok(item)
    }

    pub(crate) fn peek(&self) -> Result<Item> {
        self.peek_by_offset(0).map_err(|e| match e {
            QueueError::OutOfBounds => QueueError::Empty,
            other => other,
        })
    }

    pub(crate) fn peek_by_offset(&self, offset: u64) -> Result<Item> {
        let state = handle::read(&self.state)?;
        let store = state.store.as_ref().ok_or(QueueError::Closed)?;

        if offset >= state.level.len() {
            return Err(QueueError::OutOfBounds);
        }
        let id = self.end.id_at(&state.level, offset);
        load_item(store, &state.level, 0, id, key::id_key(id))
    }

    pub(crate) fn peek_by_id(&self, id: u64) -> Result<Item> {
        let state = handle::read(&self.state)?;
        let store = state.store.as_ref().ok_or(QueueError::Closed)?;

        load_item(store, &state.level, 0, id, key::id_key(id))
    }

    /// Rewrites a present item's value. Removed items are rejected with
    /// [`QueueError::OutOfBounds`].
    pub(crate) fn update(&self, item: &mut Item, value: Vec<u8>) -> Result<()> {
        let state = handle::write(&self.state)?;
        let store = state.store.as_ref().ok_or(QueueError::Closed)?;

        if !state.level.contains(item.id) {
            return Err(QueueError::OutOfBounds);
        }

        let key = key::id_key(item.id);
        store.put(&key, &value)?;

        debug!(kind = %self.kind, id = item.id, "Updated item");
        item.key = key;
        item.value = value;
        Ok(())
    }

    pub(crate) fn len(&self) -> u64 {
        handle::read(&self.state)
            .map(|s| if s.store.is_some() { s.level.len() } else { 0 })
            .unwrap_or(0)
    }

    pub(crate) fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub(crate) fn close(&self) -> Result<()> {
        let mut state = handle::write(&self.state)?;
        if let Some(store) = state.store.take() {
            store.flush()?;
            info!(kind = %self.kind, path = ?self.path, "Closed queue");
        }
        Ok(())
    }

    pub(crate) fn destroy(self) -> Result<()> {
        self.close()?;
        if let Some(path) = &self.path {
            handle::remove_dir(path)?;
            info!(kind = %self.kind, path = %path.display(), "Removed queue");
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn with_store_ref<T>(&self, f: impl FnOnce(&S) -> T) -> Option<T> {
        let state = self.state.read().ok()?;
        state.store.as_ref().map(f)
    }
}

impl<S: Store> Drop for SingleLevel<S> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!(kind = %self.kind, error = %e, "Failed to close queue");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tierq_persistence::MemoryStore;

    fn make(end: End) -> SingleLevel<MemoryStore> {
        SingleLevel::recover(MemoryStore::new(), QueueKind::Queue, end, None).unwrap()
    }

    #[test]
    fn test_id_at() {
        let level = Level { head: 3, tail: 7 };
        assert_eq!(End::Front.id_at(&level, 0), 4);
        assert_eq!(End::Front.id_at(&level, 3), 7);
        assert_eq!(End::Back.id_at(&level, 0), 7);
        assert_eq!(End::Back.id_at(&level, 3), 4);
    }

    #[test]
    fn test_take_from_each_end() {
        let front = make(End::Front);
        let back = make(End::Back);
        for value in ["a", "b"] {
            front.append(value.into()).unwrap();
            back.append(value.into()).unwrap();
        }

        assert_eq!(front.take().unwrap().as_str(), Some("a"));
        assert_eq!(back.take().unwrap().as_str(), Some("b"));
        assert_eq!(front.len(), 1);
        assert_eq!(back.len(), 1);
    }

    #[test]
    fn test_take_empty() {
        assert!(matches!(make(End::Front).take(), Err(QueueError::Empty)));
        assert!(matches!(make(End::Back).take(), Err(QueueError::Empty)));
    }

    #[test]
    fn test_closed() {
        let single = make(End::Back);
        single.append(b"a".to_vec()).unwrap();
        single.close().unwrap();
        single.close().unwrap();

        assert_eq!(single.len(), 0);
        assert!(matches!(single.take(), Err(QueueError::Closed)));
        assert!(matches!(single.peek(), Err(QueueError::Closed)));
        assert!(matches!(
            single.append(b"b".to_vec()),
            Err(QueueError::Closed)
        ));
    }
}
