//! Product model as served by the remote catalog

use serde::{Deserialize, Serialize};

/// Catalog product (read-only on this side)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub category: String,
    pub user: ProductOwner,
}

/// User that listed the product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductOwner {
    pub id: i64,
    pub name: String,
}

impl Product {
    /// Price as shown on a product card, e.g. `$12.50`
    pub fn formatted_price(&self) -> String {
        format!("${:.2}", self.price)
    }
}
