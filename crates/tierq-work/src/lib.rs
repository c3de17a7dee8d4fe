//! Durable work queues on top of an embedded ordered key-value store.
//!
//! This crate provides three queue variants sharing one storage scheme:
//! - [`PriorityQueue`]: 256 priority levels, strict priority order, FIFO
//!   within a level
//! - [`Queue`]: single-level FIFO
//! - [`Stack`]: single-level LIFO
//!
//! Items survive process restarts. Per-level counters are rebuilt from
//! storage whenever a queue is opened.
//!
//! # Example
//!
//! ```no_run
//! use tierq_models::Order;
//! use tierq_work::PriorityQueue;
//!
//! let queue = PriorityQueue::open("/tmp/tierq", Order::Asc).unwrap();
//!
//! queue.enqueue(5, "a").unwrap();
//! queue.enqueue(1, "b").unwrap();
//!
//! // Priority 1 is served before priority 5
//! assert_eq!(queue.dequeue().unwrap().as_str(), Some("b"));
//! ```

pub mod config;
pub mod error;
mod handle;
pub mod key;
pub mod level;
pub mod policy;
pub mod priority;
pub mod queue;
mod single;
pub mod stack;

pub use config::QueueConfig;
pub use error::{QueueError, Result};
pub use priority::PriorityQueue;
pub use queue::Queue;
pub use stack::Stack;
pub use tierq_models::{Item, Order, QueueKind};
