use std::path::Path;

use postbox_core::config::Config;

use crate::commands::common::{format_post_lines, open_service};
use crate::error::CliError;

/// Follow the live post list until interrupted, printing every emission.
pub async fn run_watch(db_path: &Path, config: &Config) -> Result<(), CliError> {
    let service = open_service(db_path, config).await?;
    let mut rx = service.observe();

    // Populate in the background; the live view picks up the result
    let _sync = service.trigger_sync();

    loop {
        {
            let snapshot = rx.borrow_and_update().clone();
            println!("-- {} post(s) --", snapshot.len());
            for line in format_post_lines(&snapshot) {
                println!("{line}");
            }
        }
        rx.changed().await.map_err(|_| CliError::ViewClosed)?;
    }
}
