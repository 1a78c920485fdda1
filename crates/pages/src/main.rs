//! pages CLI - navigation metadata for documentation sites.
//!
//! Provides commands for:
//! - `nav`: Print the navigation of a docs directory after applying metadata files
//! - `meta`: Print which metadata file applies to each section

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{MetaArgs, NavArgs};
use output::Output;

/// pages - per-directory navigation metadata.
#[derive(Parser)]
#[command(name = "pages", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the rewritten navigation.
    Nav(NavArgs),
    /// Print resolved metadata for every section.
    Meta(MetaArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Nav(args) => args.common.verbose,
        Commands::Meta(args) => args.common.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Nav(args) => args.execute(&output),
        Commands::Meta(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
