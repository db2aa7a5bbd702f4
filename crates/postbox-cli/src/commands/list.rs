use std::path::Path;

use postbox_core::config::Config;

use crate::commands::common::{
    filter_posts, format_post_lines, open_service, post_to_list_item, PostListItem,
};
use crate::error::CliError;

pub async fn run_list(
    limit: Option<usize>,
    unread_only: bool,
    as_json: bool,
    db_path: &Path,
    config: &Config,
) -> Result<(), CliError> {
    let service = open_service(db_path, config).await?;
    let rx = service.observe();
    let posts = filter_posts(&rx.borrow().clone(), limit, unread_only);

    if as_json {
        let items = posts
            .iter()
            .map(post_to_list_item)
            .collect::<Vec<PostListItem>>();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else if posts.is_empty() {
        println!("No posts. Run `postbox sync` to populate the store.");
    } else {
        for line in format_post_lines(&posts) {
            println!("{line}");
        }
    }

    Ok(())
}
