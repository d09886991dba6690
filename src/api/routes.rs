//! API Routes
//!
//! Configures the Axum router with all catalog endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_item_handler, get_item_handler, health_handler, list_items_handler, stats_handler,
    AppState,
};

/// Catalog endpoints, mounted both at the root and under `/api`.
fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items_handler).post(create_item_handler))
        .route("/items/:id", get(get_item_handler))
        .route("/stats", get(stats_handler))
}

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /items` - List items with search and pagination
/// - `POST /items` - Create an item
/// - `GET /items/:id` - Retrieve an item by id
/// - `GET /stats` - Item count and average price
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(catalog_routes())
        .nest("/api", catalog_routes())
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
