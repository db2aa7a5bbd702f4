use std::path::Path;

use postbox_core::config::Config;

use crate::commands::common::open_service;
use crate::error::CliError;

pub async fn run_read(ids: Vec<i64>, db_path: &Path, config: &Config) -> Result<(), CliError> {
    let service = open_service(db_path, config).await?;
    let count = ids.len();
    service.mark_read_batch(ids).await??;
    println!("Marked {count} post(s) read");
    Ok(())
}
