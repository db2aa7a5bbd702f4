//! Data models for Postbox

mod post;

pub use post::{Post, PostId};
