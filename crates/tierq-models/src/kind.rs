//! Queue variant tag.

use serde::{Deserialize, Serialize};

/// Identifies which queue variant created a data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueKind {
    /// Single-level FIFO queue.
    Queue,
    /// Single-level LIFO stack.
    Stack,
    /// 256-level priority queue.
    Priority,
}

impl std::fmt::Display for QueueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueueKind::Queue => write!(f, "queue"),
            QueueKind::Stack => write!(f, "stack"),
            QueueKind::Priority => write!(f, "priority"),
        }
    }
}
