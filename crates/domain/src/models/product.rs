//! Product domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::Category;

/// A product as stored in the catalog, with its category eagerly loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogProduct {
    pub id: i64,
    pub sku: String,
    pub name: String,
    /// Base price in minor currency units.
    pub price: i64,
    pub category: Category,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Price information computed for a single response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceView {
    pub original: i64,
    #[serde(rename = "final")]
    pub final_price: i64,
    /// Display string such as `30%`; `null` when no discount applies.
    pub discount_percentage: Option<String>,
    pub currency: String,
}

/// A product entry in the listing response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "ID")]
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub category: String,
    pub price: PriceView,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Pagination metadata for a listing response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    #[serde(rename = "total")]
    pub total_records: i64,
    pub page: i64,
    #[serde(rename = "pages")]
    pub total_pages: i64,
    pub limit: i64,
}

/// A page of discounted products plus its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
    pub meta: PageMeta,
}
