//! Storage layer for Postbox

mod connection;
mod migrations;
mod store;

pub use connection::Database;
pub use store::{LibSqlPostStore, MergePolicy, PostStore, PostsSnapshot};
