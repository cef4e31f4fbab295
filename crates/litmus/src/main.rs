//! # litmus
//!
//! litmus - A linter for HTML markup in tagged template literals.
//!
//! ## Name Origin
//!
//! A **litmus** test tells at a glance whether a solution is acid or base.
//! This binary gives the same quick verdict on the markup hidden inside
//! `html` tagged templates.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "litmus")]
#[command(about = "Linter for HTML in tagged template literals", long_about = None)]
#[command(version, disable_version_flag = true)]
struct Cli {
    /// Print version
    #[arg(short = 'v', short_alias = 'V', long, action = clap::ArgAction::Version)]
    version: (),

    /// Log decisions to stderr (same as RUST_LOG=debug)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint tagged templates in script files (default command)
    Lint(commands::lint::LintArgs),
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Lint(args)) => commands::lint::run(args),
        None => {
            // Default to lint command with default args
            commands::lint::run(commands::lint::LintArgs::default());
        }
    }
}
