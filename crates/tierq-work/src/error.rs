//! Error types for queue operations.

use thiserror::Error;
use tierq_models::{Item, QueueKind};
use tierq_persistence::PersistenceError;

/// Errors that can occur during queue operations.
#[derive(Error, Debug)]
pub enum QueueError {
    /// No items in the queue, or in the targeted priority level.
    #[error("queue is empty")]
    Empty,

    /// Requested id or offset is outside the items currently queued.
    #[error("id or offset is out of bounds")]
    OutOfBounds,

    /// The directory was created by a different queue variant.
    #[error("directory holds a {found}, cannot open it as a {expected}")]
    IncompatibleType {
        expected: QueueKind,
        found: QueueKind,
    },

    /// Storage failure.
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// An item was read but removing it from storage failed. It stays
    /// queued and will be returned again.
    #[error("item {} at priority {} was not removed: {source}", .item.id, .item.priority)]
    Unacknowledged {
        item: Box<Item>,
        #[source]
        source: PersistenceError,
    },

    /// The queue has been closed.
    #[error("queue is closed")]
    Closed,

    /// Failed to encode or decode a typed value.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Lock poisoned (thread panicked while holding lock).
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Result type alias for queue operations.
pub type Result<T> = std::result::Result<T, QueueError>;
