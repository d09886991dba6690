//! Response DTOs for the catalog API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{CacheStats, CacheStatus, StatsCache};
use crate::catalog::{Page, Pagination};
use crate::error::FieldError;
use crate::models::Item;

/// Response body for GET /items
#[derive(Debug, Clone, Serialize)]
pub struct ItemListResponse {
    /// Items on the requested page
    pub items: Vec<Item>,
    /// Paging metadata for the filtered set
    pub pagination: Pagination,
}

impl From<Page> for ItemListResponse {
    fn from(page: Page) -> Self {
        Self {
            items: page.items,
            pagination: page.pagination,
        }
    }
}

/// Stats cache state and counters, reported by the health endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheReport {
    pub status: CacheStatus,
    #[serde(flatten)]
    pub counters: CacheStats,
    pub hit_rate: f64,
}

impl CacheReport {
    pub fn from_cache(cache: &StatsCache) -> Self {
        let counters = cache.stats();
        Self {
            status: cache.status(),
            hit_rate: counters.hit_rate(),
            counters,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    /// Stats cache state
    pub cache: CacheReport,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(cache: CacheReport) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            cache,
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
    /// Per-field violations, present only for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    /// Creates an ErrorResponse carrying field details
    pub fn with_details(error: impl Into<String>, details: Vec<FieldError>) -> Self {
        Self {
            error: error.into(),
            details: Some(details),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    #[test]
    fn test_health_response_serialize() {
        let cache = StatsCache::new(Arc::new(MemoryStore::default()));
        let resp = HealthResponse::healthy(CacheReport::from_cache(&cache));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["status"], "healthy");
        assert!(json.get("timestamp").is_some());
        assert_eq!(
            json["cache"],
            serde_json::json!({
                "status": "empty",
                "hits": 0,
                "recomputations": 0,
                "invalidations": 0,
                "failures": 0,
                "hitRate": 0.0
            })
        );
    }

    #[test]
    fn test_error_response_without_details() {
        let json = serde_json::to_value(ErrorResponse::new("Item not found")).unwrap();
        assert_eq!(json["error"], "Item not found");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_error_response_with_details() {
        let resp = ErrorResponse::with_details(
            "Validation failed",
            vec![FieldError::new("price", "price must be positive")],
        );
        let json = serde_json::to_value(resp).unwrap();
        assert_eq!(json["details"][0]["field"], "price");
        assert_eq!(json["details"][0]["message"], "price must be positive");
    }
}
