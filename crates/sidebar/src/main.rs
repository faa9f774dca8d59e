//! Sidebar CLI - navigation resolver for documentation sites.
//!
//! Provides commands for:
//! - `resolve`: Resolve the sidebar and write it as JSON
//! - `check`: Validate the sidebar against the content directory
//! - `watch`: Re-resolve whenever content or configuration changes

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ResolveArgs, WatchArgs};
use output::Output;

/// Sidebar - navigation resolver for documentation sites.
#[derive(Parser)]
#[command(name = "sidebar", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the sidebar and write it as JSON.
    Resolve(ResolveArgs),
    /// Validate the sidebar and print a summary.
    Check(CheckArgs),
    /// Resolve on every content or configuration change.
    Watch(WatchArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Resolve(args) => args.project.verbose,
            Self::Check(args) => args.project.verbose,
            Self::Watch(args) => args.project.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Resolve(args) => args.execute(),
        Commands::Check(args) => args.execute(),
        Commands::Watch(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
