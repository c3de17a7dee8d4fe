//! Command-line interface definition using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tierq_models::Order;

/// tierq - durable priority queue inspector
#[derive(Parser, Debug)]
#[command(name = "tierq")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Queue directory
    #[arg(short, long, env = "TIERQ_DIR", global = true)]
    pub dir: Option<PathBuf>,

    /// Priority ordering used when opening the queue
    #[arg(short, long, default_value = "asc", global = true)]
    pub order: Order,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add an item
    Enqueue {
        /// Priority level (0-255)
        priority: u8,

        /// Item value
        value: String,
    },

    /// Remove and print the next item
    Dequeue {
        /// Take from this priority level instead of the next in order
        #[arg(short, long)]
        priority: Option<u8>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print an item without removing it
    Peek {
        /// Position in dequeue order (0 = next)
        #[arg(long, conflicts_with = "id")]
        offset: Option<u64>,

        /// Priority level, used with --id
        #[arg(short, long, requires = "id")]
        priority: Option<u8>,

        /// Item id within the priority level
        #[arg(long, requires = "priority")]
        id: Option<u64>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Replace the value of a queued item
    Update {
        /// Priority level
        priority: u8,

        /// Item id within the priority level
        id: u64,

        /// New value
        value: String,
    },

    /// Print the number of queued items
    Len,

    /// Print the number of queued items per nonempty level
    Levels,

    /// Delete the queue directory
    Drop {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

/// Output format for item commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Cli {
    /// Returns the queue directory, using the default if not specified.
    pub fn dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .map(|h| h.join(".tierq"))
                .unwrap_or_else(|| PathBuf::from(".tierq"))
        })
    }

    /// Returns the log filter implied by `-v`.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
