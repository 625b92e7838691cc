#![allow(clippy::collapsible_if)]
#![allow(clippy::too_many_arguments)]

// Core modules
pub mod analysis;
pub mod app;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod utils;

// Re-export commonly used types outside of crate (for make_sample_backup.rs)
pub use app::Command;
pub use config::PERSISTENCE;
pub use data::{JournalStorage, SqliteJournalStore};
pub use engine::{Autosaver, Journal};

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Gold (XAUUSD) trading journal", long_about = None)]
pub struct Cli {
    /// Path of the journal database
    #[arg(long, global = true, default_value = PERSISTENCE.database.path)]
    pub db: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Entry point for the binary: open the store and run one command.
pub async fn run_app(args: Cli) -> anyhow::Result<()> {
    app::run(args).await
}
