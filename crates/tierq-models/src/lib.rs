//! Core data models for tierq.
//!
//! This crate provides the fundamental data types shared by the storage
//! layer and the queue engines: queued items, the priority ordering mode
//! and the tag identifying which queue variant owns a directory.

pub mod item;
pub mod kind;
pub mod order;

// Re-export main types
pub use item::Item;
pub use kind::QueueKind;
pub use order::Order;
