//! Command handlers for CLI subcommands.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tierq_models::{Item, Order};
use tierq_work::PriorityQueue;
use tracing::info;

use crate::cli::{Commands, OutputFormat};

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// JSON view of an item.
#[derive(Debug, Serialize)]
struct ItemView<'a> {
    priority: u8,
    id: u64,
    value: std::borrow::Cow<'a, str>,
}

impl<'a> From<&'a Item> for ItemView<'a> {
    fn from(item: &'a Item) -> Self {
        Self {
            priority: item.priority,
            id: item.id,
            value: String::from_utf8_lossy(&item.value),
        }
    }
}

/// Execute a CLI command against the queue in `dir`.
pub fn execute(command: Commands, dir: &Path, order: Order, out: &mut impl Write) -> Result<()> {
    let queue = PriorityQueue::open(dir, order)?;

    match command {
        Commands::Enqueue { priority, value } => {
            let item = queue.enqueue_string(priority, &value)?;
            info!(priority, id = item.id, "Enqueued from command line");
            writeln!(out, "{}/{}", item.priority, item.id)?;
        }
        Commands::Dequeue { priority, format } => {
            let item = match priority {
                Some(priority) => queue.dequeue_by_priority(priority)?,
                None => queue.dequeue()?,
            };
            print_item(out, &item, format)?;
        }
        Commands::Peek {
            offset,
            priority,
            id,
            format,
        } => {
            let item = match (priority, id) {
                (Some(priority), Some(id)) => queue.peek_by_priority_id(priority, id)?,
                _ => match offset {
                    Some(offset) => queue.peek_by_offset(offset)?,
                    None => queue.peek()?,
                },
            };
            print_item(out, &item, format)?;
        }
        Commands::Update {
            priority,
            id,
            value,
        } => {
            let mut item = queue.peek_by_priority_id(priority, id)?;
            queue.update_string(&mut item, &value)?;
            writeln!(out, "{}/{}", item.priority, item.id)?;
        }
        Commands::Len => writeln!(out, "{}", queue.len())?,
        Commands::Levels => {
            for priority in order.all() {
                let len = queue.level_len(priority);
                if len > 0 {
                    writeln!(out, "{:>3}  {}", priority, len)?;
                }
            }
        }
        Commands::Drop { yes } => {
            if !yes {
                return Err(format!("refusing to delete {} without --yes", dir.display()).into());
            }
            queue.destroy()?;
            writeln!(out, "Removed {}", dir.display())?;
        }
    }

    Ok(())
}

fn print_item(out: &mut impl Write, item: &Item, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(
            out,
            "{}/{}\t{}",
            item.priority,
            item.id,
            item.to_string_lossy()
        )?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &ItemView::from(item))?;
            writeln!(out)?;
        }
    }
    Ok(())
}
