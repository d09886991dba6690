//! Catalog Query Module
//!
//! Stateless search, pagination and lookup over a store snapshot.

mod query;

pub use query::{find, query, ListQuery, Page, Pagination, DEFAULT_PAGE_SIZE};
