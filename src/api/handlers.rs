//! API Handlers
//!
//! HTTP request handlers for each catalog endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::cache::{Aggregate, StatsCache};
use crate::catalog;
use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::models::{CacheReport, CreateItemRequest, HealthResponse, Item, ItemListResponse, ListParams};
use crate::store::{JsonFileStore, RecordStore};

/// Application state shared across all handlers.
///
/// The stats cache listens to the store, so writes made through any handler
/// invalidate it.
#[derive(Clone)]
pub struct AppState {
    /// Canonical item collection
    pub store: Arc<dyn RecordStore>,
    /// Version-checked aggregate cache over `store`
    pub stats: Arc<StatsCache>,
}

impl AppState {
    /// Creates a new AppState over the given store.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        let stats = Arc::new(StatsCache::new(store.clone()));
        stats.listen(store.as_ref());
        Self { store, stats }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Backs the catalog with the JSON file named in the Config.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(JsonFileStore::new(config.data_path.clone())))
    }
}

/// Handler for GET /items
///
/// Lists items matching `search`, one page at a time.
pub async fn list_items_handler(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Json<ItemListResponse>> {
    let Query(params) =
        params.map_err(|rejection| ApiError::validation("query", rejection.body_text()))?;
    let query = params.validate().map_err(ApiError::ValidationFailed)?;

    let snapshot = state.store.read_snapshot().await?;
    let page = catalog::query(&snapshot.items, &query);

    Ok(Json(page.into()))
}

/// Handler for GET /items/:id
///
/// Retrieves a single item by id.
pub async fn get_item_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Item>> {
    let id: u64 = id
        .parse()
        .map_err(|_| ApiError::validation("id", "id must be a non-negative integer"))?;

    let snapshot = state.store.read_snapshot().await?;
    catalog::find(&snapshot.items, id)
        .cloned()
        .map(Json)
        .ok_or(ApiError::ItemNotFound(id))
}

/// Handler for POST /items
///
/// Validates the body, appends the item and returns it with its new id.
pub async fn create_item_handler(
    State(state): State<AppState>,
    body: Result<Json<CreateItemRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Item>)> {
    let Json(body) =
        body.map_err(|rejection| ApiError::validation("body", rejection.body_text()))?;
    let new_item = body.validate().map_err(ApiError::ValidationFailed)?;

    let (item, _version) = state.store.append(new_item).await?;
    info!(id = item.id, name = %item.name, "item created");

    Ok((StatusCode::CREATED, Json(item)))
}

/// Handler for GET /stats
///
/// Returns the item count and average price.
pub async fn stats_handler(State(state): State<AppState>) -> ApiResult<Json<Aggregate>> {
    let aggregate = state.stats.get_aggregate().await?;
    Ok(Json(aggregate))
}

/// Handler for GET /health
///
/// Returns health status of the server and the stats cache counters.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(CacheReport::from_cache(&state.stats)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStatus;
    use crate::store::MemoryStore;

    fn seeded_state() -> (Arc<MemoryStore>, AppState) {
        let store = Arc::new(MemoryStore::new(vec![
            Item {
                id: 1,
                name: "Laptop Pro".to_string(),
                category: Some("Electronics".to_string()),
                price: 2499.0,
            },
            Item {
                id: 2,
                name: "Noise Cancelling Headphones".to_string(),
                category: Some("Electronics".to_string()),
                price: 399.0,
            },
        ]));
        let state = AppState::new(store.clone());
        (store, state)
    }

    fn lamp_body() -> CreateItemRequest {
        serde_json::from_str(r#"{"name":"Lamp","category":"Electronics","price":49}"#).unwrap()
    }

    #[tokio::test]
    async fn test_list_items_handler() {
        let (_, state) = seeded_state();
        let params = ListParams {
            search: Some("laptop".to_string()),
            ..Default::default()
        };

        let Json(response) = list_items_handler(State(state), Ok(Query(params)))
            .await
            .unwrap();
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].id, 1);
        assert_eq!(response.pagination.total_items, 1);
    }

    #[tokio::test]
    async fn test_get_item_handler() {
        let (_, state) = seeded_state();

        let Json(item) = get_item_handler(State(state.clone()), Path("2".to_string()))
            .await
            .unwrap();
        assert_eq!(item.price, 399.0);

        let missing = get_item_handler(State(state.clone()), Path("999".to_string())).await;
        assert!(matches!(missing, Err(ApiError::ItemNotFound(999))));

        let bad = get_item_handler(State(state), Path("abc".to_string())).await;
        assert!(matches!(bad, Err(ApiError::ValidationFailed(_))));
    }

    #[tokio::test]
    async fn test_create_then_stats_reflects_item() {
        let (store, state) = seeded_state();
        let Json(before) = stats_handler(State(state.clone())).await.unwrap();
        assert_eq!(before.total, 2);

        let (status, Json(item)) =
            create_item_handler(State(state.clone()), Ok(Json(lamp_body())))
                .await
                .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(item.id, 3);

        let Json(after) = stats_handler(State(state)).await.unwrap();
        assert_eq!(after.total, 3);
        assert_eq!(after.average_price, Some((2499.0 + 399.0 + 49.0) / 3.0));
        assert_eq!(store.snapshot_reads(), 2);
    }

    #[tokio::test]
    async fn test_create_invalid_item() {
        let (store, state) = seeded_state();
        let body: CreateItemRequest = serde_json::from_str("{}").unwrap();

        let result = create_item_handler(State(state), Ok(Json(body))).await;
        match result {
            Err(ApiError::ValidationFailed(details)) => assert_eq!(details.len(), 2),
            other => panic!("expected validation failure, got {:?}", other.map(|(s, _)| s)),
        }
        assert_eq!(store.read_snapshot().await.unwrap().items.len(), 2);
    }

    #[tokio::test]
    async fn test_health_handler_reports_cache_counters() {
        let (_, state) = seeded_state();
        stats_handler(State(state.clone())).await.unwrap();
        stats_handler(State(state.clone())).await.unwrap();

        let Json(response) = health_handler(State(state)).await;
        assert_eq!(response.status, "healthy");
        assert_eq!(response.cache.status, CacheStatus::Valid);
        assert_eq!(response.cache.counters.hits, 1);
        assert_eq!(response.cache.counters.recomputations, 1);
        assert_eq!(response.cache.hit_rate, 0.5);
    }
}
