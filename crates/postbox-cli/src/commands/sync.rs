use std::path::Path;

use postbox_core::config::Config;
use postbox_core::sync::Populated;

use crate::commands::common::open_service;
use crate::error::CliError;

pub async fn run_sync(db_path: &Path, config: &Config) -> Result<(), CliError> {
    let service = open_service(db_path, config).await?;

    match service.trigger_sync().await?? {
        Populated::AlreadyPopulated => {
            println!("Store already populated; nothing fetched");
        }
        Populated::Fetched(count) => {
            println!("Fetched {count} post(s) from {}", config.remote_base_url);
        }
    }

    Ok(())
}
