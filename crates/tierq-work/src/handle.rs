//! Directory handling shared by every queue variant.

use std::fs;
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tierq_models::QueueKind;
use tierq_persistence::{check_kind, FjallStore, KindCheck, PersistenceError, StoreConfig};
use tracing::{debug, warn};

use crate::error::{QueueError, Result};

/// Subdirectory holding the key-value store.
const DATA_SUBDIR: &str = "data";

/// Verifies the directory marker and opens the store inside `dir`.
pub(crate) fn open_store(dir: &Path, kind: QueueKind, config: &StoreConfig) -> Result<FjallStore> {
    let data_dir = dir.join(DATA_SUBDIR);
    let had_data = data_dir.exists();

    match check_kind(dir, kind)? {
        KindCheck::Mismatch(found) => {
            return Err(QueueError::IncompatibleType {
                expected: kind,
                found,
            })
        }
        KindCheck::Created if had_data => {
            warn!(path = %dir.display(), %kind, "Existing data had no marker, claiming it");
        }
        KindCheck::Created => debug!(path = %dir.display(), %kind, "Created queue directory"),
        KindCheck::Matched => {}
    }

    Ok(FjallStore::open(data_dir, config)?)
}

/// Removes a queue directory and everything in it.
pub(crate) fn remove_dir(dir: &Path) -> Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(PersistenceError::DirectoryError {
            path: dir.to_path_buf(),
            source,
        }
        .into()),
    }
}

pub(crate) fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|e| QueueError::LockPoisoned(e.to_string()))
}

pub(crate) fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|e| QueueError::LockPoisoned(e.to_string()))
}
