//! Postbox CLI - command-line client for the sync & persistence core
//!
//! Stands in for the list/detail UI: every subcommand goes through the
//! same `PostService` boundary the UI layer would use.

mod cli;
mod commands;
mod error;

use clap::Parser;
use postbox_core::config::Config;

use crate::cli::{Cli, Commands};
use crate::commands::common::resolve_db_path;
use crate::commands::completions::run_completions;
use crate::commands::delete::run_delete;
use crate::commands::list::run_list;
use crate::commands::read::run_read;
use crate::commands::show::run_show;
use crate::commands::sync::run_sync;
use crate::commands::watch::run_watch;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("postbox=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    let db_path = resolve_db_path(cli.db_path, &config, dirs::data_dir())?;

    match cli.command {
        Commands::Sync => run_sync(&db_path, &config).await?,
        Commands::List {
            limit,
            unread,
            json,
        } => run_list(limit, unread, json, &db_path, &config).await?,
        Commands::Show { id } => run_show(id, &db_path, &config).await?,
        Commands::Read { ids } => run_read(ids, &db_path, &config).await?,
        Commands::Delete { ids } => run_delete(ids, &db_path, &config).await?,
        Commands::Watch => run_watch(&db_path, &config).await?,
        Commands::Completions { shell } => run_completions(shell)?,
    }

    Ok(())
}
