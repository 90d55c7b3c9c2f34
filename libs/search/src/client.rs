//! Product fetching for the search page

use std::future::Future;

use common::error::UpstreamError;
use common::models::{Product, SearchQuery};
use thiserror::Error;
use tracing::{debug, error};

/// Message shown in the error banner whenever a fetch fails
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch products";

/// Failed product fetch; displays as the user-facing banner message
#[derive(Error, Debug)]
#[error("Failed to fetch products")]
pub struct FetchError(#[from] pub UpstreamError);

/// Somewhere products can be searched
pub trait ProductSource: Send + Sync + 'static {
    fn fetch(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<Vec<Product>, FetchError>> + Send;
}

/// Fetches products through the storefront's `/api/products` endpoint
#[derive(Debug, Clone)]
pub struct HttpProductSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpProductSource {
    /// `base_url` is the storefront origin, e.g. `http://localhost:3000`
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/api/products", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ProductSource for HttpProductSource {
    async fn fetch(&self, query: &SearchQuery) -> Result<Vec<Product>, FetchError> {
        debug!(?query, "Fetching products");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&query.to_query_pairs())
            .send()
            .await
            .map_err(|e| {
                error!("Product request failed: {}", e);
                UpstreamError::NetworkFailure(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Product request rejected with status {}", status);
            return Err(UpstreamError::UpstreamRejection(format!("status {status}")).into());
        }

        let products = response.json::<Vec<Product>>().await.map_err(|e| {
            error!("Failed to decode products: {}", e);
            UpstreamError::NetworkFailure(e.to_string())
        })?;

        Ok(products)
    }
}
