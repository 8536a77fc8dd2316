//! # buildingctl — building store command runner
//!
//! Composition root that wires the storage adapter into the application
//! service and runs a single command.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialize logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct the repository implementation (adapter)
//! - Construct the building service, injecting the repository via its port trait
//! - Parse the command line and print the command's JSON result
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod command;
mod config;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use buildings_adapter_storage_sqlite_sqlx::SqliteBuildingRepository;
use buildings_app::services::building_service::BuildingService;

use crate::command::Cli;
use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .with_writer(std::io::stderr)
        .init();

    // Database
    let db = buildings_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
        max_connections: config.database.max_connections,
    }
    .build()
    .await
    .context("failed to open database")?;

    // Service
    let repo = SqliteBuildingRepository::new(db.pool().clone());
    let service = BuildingService::with_paging(repo, config.paging());

    tracing::debug!(command = ?cli.command, "running command");
    let output = cli.command.run(&service).await?;
    println!("{output}");

    Ok(())
}
