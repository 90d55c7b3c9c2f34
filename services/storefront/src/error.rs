//! Custom error types for the storefront service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Message returned when the catalog cannot be reached or answers badly
pub const PRODUCTS_UNAVAILABLE: &str = "Failed to fetch products";

/// Custom error type for the storefront service
#[derive(Error, Debug)]
pub enum ApiError {
    /// The product search could not be relayed
    #[error("Failed to fetch products")]
    ProductsUnavailable,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::ProductsUnavailable => {
                (StatusCode::INTERNAL_SERVER_ERROR, PRODUCTS_UNAVAILABLE)
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
