//! Pass-through client for the remote product catalog

use axum::body::Bytes;
use common::error::{UpstreamError, UpstreamResult};
use serde::de::IgnoredAny;
use tracing::{debug, info};

/// Limit forwarded when the caller sends no `take`
pub const DEFAULT_TAKE: &str = "2";

/// Query accepted by `GET /api/products`; empty values count as absent
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProductSearchParams {
    pub search_term: Option<String>,
    pub category: Option<String>,
    pub take: Option<String>,
}

impl ProductSearchParams {
    /// Collect the known keys from decoded query pairs
    ///
    /// The first occurrence of a repeated key wins; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "searchTerm" => &mut params.search_term,
                "category" => &mut params.category,
                "take" => &mut params.take,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

/// The three parameters forwarded to the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSearch {
    pub search_term: String,
    pub category: String,
    pub take: String,
}

impl From<ProductSearchParams> for CatalogSearch {
    fn from(params: ProductSearchParams) -> Self {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }

        Self {
            search_term: present(params.search_term).unwrap_or_default(),
            category: present(params.category).unwrap_or_default(),
            take: present(params.take).unwrap_or_else(|| DEFAULT_TAKE.to_string()),
        }
    }
}

/// Catalog client
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    search_url: String,
}

impl CatalogClient {
    pub fn new(client: reqwest::Client, search_url: String) -> Self {
        Self { client, search_url }
    }

    /// Run a catalog search, returning the upstream JSON body untouched
    ///
    /// One attempt only. Transport errors and bodies that are not JSON are
    /// [`UpstreamError::NetworkFailure`]; non-2xx statuses are
    /// [`UpstreamError::UpstreamRejection`].
    pub async fn search(&self, search: &CatalogSearch) -> UpstreamResult<Bytes> {
        info!(
            term = %search.search_term,
            category = %search.category,
            take = %search.take,
            "Forwarding product search"
        );

        let response = self
            .client
            .get(&self.search_url)
            .query(&[
                ("searchTerm", search.search_term.as_str()),
                ("category", search.category.as_str()),
                ("take", search.take.as_str()),
            ])
            .send()
            .await
            .map_err(|e| UpstreamError::NetworkFailure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::UpstreamRejection(format!(
                "catalog answered {status}"
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::NetworkFailure(e.to_string()))?;

        serde_json::from_slice::<IgnoredAny>(&body)
            .map_err(|e| UpstreamError::NetworkFailure(format!("catalog body is not JSON: {e}")))?;

        debug!(bytes = body.len(), "Catalog search succeeded");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_missing_params() {
        let search = CatalogSearch::from(ProductSearchParams::default());
        assert_eq!(
            search,
            CatalogSearch {
                search_term: String::new(),
                category: String::new(),
                take: "2".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_take_falls_back_to_default() {
        let search = CatalogSearch::from(ProductSearchParams {
            search_term: Some("phone".to_string()),
            category: Some(String::new()),
            take: Some(String::new()),
        });
        assert_eq!(search.search_term, "phone");
        assert_eq!(search.category, "");
        assert_eq!(search.take, "2");
    }

    #[test]
    fn test_params_from_query_pairs() {
        let pairs = [
            ("searchTerm", "phone"),
            ("category", "Electronics"),
            ("take", "5"),
            ("page", "3"),
        ]
        .map(|(k, v)| (k.to_string(), v.to_string()));

        let search = CatalogSearch::from(ProductSearchParams::from_pairs(pairs));
        assert_eq!(search.search_term, "phone");
        assert_eq!(search.category, "Electronics");
        assert_eq!(search.take, "5");
    }

    #[test]
    fn test_repeated_key_keeps_first_value() {
        let pairs = [("take", "5"), ("take", "6"), ("searchTerm", "a")]
            .map(|(k, v)| (k.to_string(), v.to_string()));

        let params = ProductSearchParams::from_pairs(pairs);
        assert_eq!(params.take.as_deref(), Some("5"));
        assert_eq!(params.search_term.as_deref(), Some("a"));
        assert_eq!(params.category, None);
    }
}
