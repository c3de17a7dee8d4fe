//! In-memory store with failure injection.
//!
//! Used to exercise the queue engines' behavior when storage calls fail,
//! which is awkward to provoke against a real on-disk engine.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::error::{PersistenceError, Result};
use crate::store::Store;

/// `BTreeMap`-backed [`Store`]. Nothing is persisted.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<Vec<u8>, Vec<u8>>>,
    fail_puts: AtomicBool,
    fail_gets: AtomicBool,
    fail_deletes: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent `put` calls fail (or succeed again).
    pub fn fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    /// Makes subsequent `get` calls fail (or succeed again).
    pub fn fail_gets(&self, fail: bool) {
        self.fail_gets.store(fail, Ordering::SeqCst);
    }

    /// Makes subsequent `delete` calls fail (or succeed again).
    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check(flag: &AtomicBool, op: &str) -> Result<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(PersistenceError::Injected(op.to_string()));
        }
        Ok(())
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<Vec<u8>, Vec<u8>>>> {
        self.entries
            .lock()
            .map_err(|e| PersistenceError::LockPoisoned(e.to_string()))
    }
}

/// Smallest key greater than every key starting with `prefix`.
fn prefix_end(prefix: &[u8]) -> Bound<Vec<u8>> {
    let mut end = prefix.to_vec();
    while let Some(last) = end.pop() {
        if last < u8::MAX {
            end.push(last + 1);
            return Bound::Excluded(end);
        }
    }
    Bound::Unbounded
}

fn prefix_range(prefix: &[u8]) -> (Bound<Vec<u8>>, Bound<Vec<u8>>) {
    (Bound::Included(prefix.to_vec()), prefix_end(prefix))
}

impl Store for MemoryStore {
    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        Self::check(&self.fail_puts, "put")?;
        self.entries()?.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Self::check(&self.fail_gets, "get")?;
        Ok(self.entries()?.get(key).cloned())
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        Self::check(&self.fail_deletes, "delete")?;
        self.entries()?.remove(key);
        Ok(())
    }

    fn first_key(&self, prefix: &[u8]) -> Result<Option<Vec<u8>>> {
        let entries = self.entries()?;
        let first = entries.range(prefix_range(prefix)).next().map(|(k, _)| k.clone());
        Ok(first)
    }

    fn last_key(&self, prefix: &[u8]) -> Result<Option<Vec<u8>>> {
        let entries = self.entries()?;
        let last = entries
            .range(prefix_range(prefix))
            .next_back()
            .map(|(k, _)| k.clone());
        Ok(last)
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_end() {
        assert_eq!(prefix_end(&[1, 2]), Bound::Excluded(vec![1, 3]));
        assert_eq!(prefix_end(&[1, 0xff]), Bound::Excluded(vec![2]));
        assert_eq!(prefix_end(&[0xff, 0xff]), Bound::Unbounded);
    }

    #[test]
    fn test_prefix_scan() {
        let store = MemoryStore::new();
        store.put(&[5, b':', 1], b"a").unwrap();
        store.put(&[5, b':', 9], b"b").unwrap();
        store.put(&[6, b':', 0], b"c").unwrap();

        assert_eq!(store.first_key(&[5, b':']).unwrap(), Some(vec![5, b':', 1]));
        assert_eq!(store.last_key(&[5, b':']).unwrap(), Some(vec![5, b':', 9]));
        assert!(store.first_key(&[4, b':']).unwrap().is_none());
    }

    #[test]
    fn test_prefix_scan_max_byte() {
        let store = MemoryStore::new();
        store.put(&[0xff, b':', 1], b"a").unwrap();

        assert_eq!(
            store.last_key(&[0xff, b':']).unwrap(),
            Some(vec![0xff, b':', 1])
        );
    }

    #[test]
    fn test_injected_failures() {
        let store = MemoryStore::new();
        store.put(b"k", b"v").unwrap();

        store.fail_deletes(true);
        assert!(matches!(store.delete(b"k"), Err(PersistenceError::Injected(_))));
        assert_eq!(store.len(), 1);

        store.fail_deletes(false);
        store.delete(b"k").unwrap();
        assert!(store.is_empty());

        store.fail_puts(true);
        assert!(store.put(b"k", b"v").is_err());
        assert!(store.is_empty());

        store.fail_gets(true);
        assert!(store.get(b"k").is_err());
    }
}
