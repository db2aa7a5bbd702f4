pub mod common;
pub mod completions;
pub mod delete;
pub mod list;
pub mod read;
pub mod show;
pub mod sync;
pub mod watch;
