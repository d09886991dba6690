//! Aggregate Module
//!
//! Count and average price derived from a snapshot.

use serde::Serialize;

use crate::models::Item;

// == Aggregate ==
/// Catalog statistics. Cache-only, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregate {
    /// Number of items in the snapshot
    pub total: usize,
    /// Mean price; absent for an empty snapshot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_price: Option<f64>,
}

impl Aggregate {
    /// Computes the aggregate over every item.
    pub fn from_items(items: &[Item]) -> Self {
        let total = items.len();
        let average_price = if total == 0 {
            None
        } else {
            let sum: f64 = items.iter().map(|item| item.price).sum();
            Some(sum / total as f64)
        };
        Self {
            total,
            average_price,
        }
    }
}
