//! Error types for the catalog server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

// == Store Error Enum ==
/// Failures reported by a record store.
///
/// The payload carries internal detail (paths, OS errors) for logs only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing resource could not be read or parsed
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The backing resource could not be written
    #[error("store write failed: {0}")]
    WriteFailure(String),
}

// == Aggregate Unavailable ==
/// The stats cache could not produce a value, even after recomputing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("aggregate unavailable: {0}")]
pub struct AggregateUnavailable(#[source] pub StoreError);

// == Field Error ==
/// A single violated field in a rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

// == Api Error Enum ==
/// Unified error type for the HTTP layer.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Client-correctable input problems, one entry per violated field
    #[error("Validation failed")]
    ValidationFailed(Vec<FieldError>),

    /// No item carries the requested id
    #[error("Item not found")]
    ItemNotFound(u64),

    /// Store I/O failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The stats cache could not produce a value
    #[error("Unable to calculate stats")]
    AggregateUnavailable(#[from] AggregateUnavailable),
}

impl ApiError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::ValidationFailed(vec![FieldError::new(field, message)])
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::ValidationFailed(details) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::with_details("Validation failed", details),
            ),
            ApiError::ItemNotFound(id) => {
                tracing::debug!(id, "item lookup missed");
                (StatusCode::NOT_FOUND, ErrorResponse::new("Item not found"))
            }
            ApiError::Store(StoreError::Unavailable(detail)) => {
                error!(%detail, "item store read failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Unable to read items"),
                )
            }
            ApiError::Store(StoreError::WriteFailure(detail)) => {
                error!(%detail, "item store write failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Unable to save item"),
                )
            }
            ApiError::AggregateUnavailable(AggregateUnavailable(cause)) => {
                error!(%cause, "stats unavailable");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Unable to calculate stats"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
