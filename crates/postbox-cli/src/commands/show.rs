use std::path::Path;

use postbox_core::config::Config;

use crate::commands::common::open_service;
use crate::error::CliError;

pub async fn run_show(id: i64, db_path: &Path, config: &Config) -> Result<(), CliError> {
    let service = open_service(db_path, config).await?;
    let post = service.get(id).await?;

    let status = if post.read { "read" } else { "unread" };
    println!("#{} by user {} ({status})", post.id, post.user_id);
    println!("{}", post.title);
    println!();
    println!("{}", post.body);

    // Viewing a post marks it read
    service.mark_read(id).await??;

    Ok(())
}
