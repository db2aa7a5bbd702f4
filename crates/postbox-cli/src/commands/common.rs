use std::path::{Path, PathBuf};
use std::sync::Arc;

use postbox_core::config::Config;
use postbox_core::db::{Database, LibSqlPostStore};
use postbox_core::remote::HttpRemoteSource;
use postbox_core::{Post, PostService};
use serde::Serialize;

use crate::error::CliError;

const TITLE_PREVIEW_LEN: usize = 60;

#[derive(Debug, Serialize)]
pub struct PostListItem {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub read: bool,
}

/// Build the service stack: database -> store -> remote -> service.
pub async fn open_service(db_path: &Path, config: &Config) -> Result<PostService, CliError> {
    tracing::debug!(path = %db_path.display(), "Opening local store");
    let db = Database::open(db_path).await?;
    let store = Arc::new(LibSqlPostStore::new(db).await?);
    let remote = Arc::new(HttpRemoteSource::new(&config.remote_base_url)?);
    Ok(PostService::new(store, remote, config.merge_policy))
}

/// Resolve the database path: CLI flag, then env config, then the platform
/// data directory.
pub fn resolve_db_path(
    flag: Option<PathBuf>,
    config: &Config,
    data_dir: Option<PathBuf>,
) -> Result<PathBuf, CliError> {
    if let Some(path) = flag {
        return Ok(path);
    }
    if let Some(path) = &config.db_path {
        return Ok(path.clone());
    }
    data_dir
        .map(|dir| dir.join("postbox").join("posts.db"))
        .ok_or(CliError::NoDataDir)
}

pub fn post_to_list_item(post: &Post) -> PostListItem {
    PostListItem {
        id: post.id,
        user_id: post.user_id,
        title: post.title.clone(),
        read: post.read,
    }
}

/// One line per post: id, unread marker, truncated title.
pub fn format_post_lines(posts: &[Post]) -> Vec<String> {
    posts
        .iter()
        .map(|post| {
            let marker = if post.read { ' ' } else { '*' };
            format!("{:>5} {} {}", post.id, marker, title_preview(&post.title))
        })
        .collect()
}

pub fn title_preview(title: &str) -> String {
    let first_line = title.lines().next().unwrap_or("");
    if first_line.chars().count() <= TITLE_PREVIEW_LEN {
        return first_line.to_string();
    }
    let truncated: String = first_line.chars().take(TITLE_PREVIEW_LEN - 1).collect();
    format!("{truncated}…")
}

/// Apply the list filters to a snapshot.
pub fn filter_posts(posts: &[Post], limit: Option<usize>, unread_only: bool) -> Vec<Post> {
    posts
        .iter()
        .filter(|post| !unread_only || !post.read)
        .take(limit.unwrap_or(usize::MAX))
        .cloned()
        .collect()
}
