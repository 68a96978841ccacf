//! PostgreSQL CRUD client for the `students` table.
//!
//! Each invocation connects to the configured database, executes one
//! parameterized statement, prints a human-readable result and exits.
//!
//! # Commands
//!
//! - `get-all`: list every student record (table or `--json`)
//! - `add`: insert a student, printing the generated id
//! - `update-email`: change a student's email by id
//! - `delete`: remove a student by id
//!
//! Connection settings come from the `PG*` environment variables (a
//! local `.env` file is honored). Diagnostics go to stderr via
//! `RUST_LOG`, results to stdout.

mod cli;
mod commands;
mod config;
mod db;
mod error;
mod model;

use clap::Parser;
use cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let cli = Cli::parse();
    let config = config::Config::from_env();
    commands::run(cli, &config).await
}
