use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod document;
mod error;
mod naming;
mod paths;
mod records;
mod store;
mod units;
mod workflow;

use cli::{Command, RootArgs};

fn main() -> Result<()> {
    init_tracing();
    let args = RootArgs::parse();

    match args.command {
        Command::Provision(args) => workflow::run_provision(&args),
        Command::Status(args) => workflow::run_status(&args),
    }
}

/// Notifications go to stderr as plain lines so CI logs stay readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .init();
}
