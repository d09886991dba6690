//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of the server.
//!
//! # Tasks
//! - Change watcher: notifies store subscribers when the backing data changes

mod watcher;

pub use watcher::spawn_change_watcher;
