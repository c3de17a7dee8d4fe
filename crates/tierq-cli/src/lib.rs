//! Command-line access to tierq priority queues.

pub mod cli;
pub mod commands;
