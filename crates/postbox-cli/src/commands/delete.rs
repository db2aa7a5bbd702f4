use std::path::Path;

use postbox_core::config::Config;

use crate::commands::common::open_service;
use crate::error::CliError;

pub async fn run_delete(ids: Vec<i64>, db_path: &Path, config: &Config) -> Result<(), CliError> {
    let service = open_service(db_path, config).await?;
    let count = ids.len();
    service.delete_batch(ids).await??;
    println!("Deleted {count} post(s)");
    Ok(())
}
