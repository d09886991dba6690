//! Catalog Stats - A small item catalog server
//!
//! Serves a JSON-file item catalog over HTTP with search, pagination and a
//! statistics endpoint backed by a version-checked cache.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
mod lock;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_change_watcher;
