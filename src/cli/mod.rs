//! CLI module for the University Records service
//!
//! - `serve`: run the HTTP API
//! - `migrate`: apply or revert the PostgreSQL storage migrations

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// University Records - identity and academic records API
#[derive(Parser)]
#[command(name = "university-records")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,

    /// Apply pending storage migrations
    Migrate(migrate::MigrateArgs),
}
