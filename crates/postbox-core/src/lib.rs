//! postbox-core - Core library for Postbox
//!
//! This crate contains the shared models, storage layer, and sync logic
//! used by all Postbox interfaces. The local database is the single source
//! of truth for readers; the remote source is only consulted to populate
//! an empty store.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod remote;
pub mod services;
pub mod sync;

pub use error::{Error, Result};
pub use models::Post;
pub use services::PostService;
