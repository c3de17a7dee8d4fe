//! tierq CLI entry point.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use tierq_cli::cli::Cli;
use tierq_cli::commands;

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level()));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let dir = cli.dir();
    let mut stdout = std::io::stdout().lock();

    if let Err(e) = commands::execute(cli.command, &dir, cli.order, &mut stdout) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
