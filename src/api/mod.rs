//! API Module
//!
//! HTTP handlers and routing for the catalog REST API.
//!
//! # Endpoints
//! - `GET /items` - List items with search and pagination
//! - `POST /items` - Create an item
//! - `GET /items/:id` - Retrieve an item by id
//! - `GET /stats` - Item count and average price
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
