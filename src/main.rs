use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod confirm;
mod depot;
mod lock;
mod pattern;
mod reconcile;
mod release;
mod source;
mod workflow;

use crate::cli::{Command, RootArgs};

fn main() -> Result<()> {
    // Diagnostics go to stderr so --json output stays parseable.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = RootArgs::parse();
    match args.command {
        Command::Sync(args) => workflow::run_sync(args),
        Command::Status(args) => workflow::run_status(args),
        Command::Verify(args) => workflow::run_verify(args),
        Command::Prune(args) => workflow::run_prune(args),
    }
}
