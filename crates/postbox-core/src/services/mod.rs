//! Service facades shared across Postbox clients

mod posts;

pub use posts::PostService;
