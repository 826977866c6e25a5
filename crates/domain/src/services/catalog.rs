//! Product listing: filter planning, discounting and page assembly.
//!
//! The HTTP layer only sees [`ProductEnsurer`]. [`ProductService`] is the
//! implementation that reads from a [`CatalogStore`] and applies a
//! [`DiscountTable`].

use std::sync::Arc;

use async_trait::async_trait;
use shared::pagination::PageRequest;
use thiserror::Error;

use crate::models::{CatalogProduct, PageMeta, Product, ProductsResponse};
use crate::services::discount::DiscountTable;
use crate::services::pricing::price_view;

/// The single predicate a listing query may carry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProductFilter {
    #[default]
    None,
    /// Products whose category name equals the value.
    Category(String),
    /// Products priced at or below the value.
    MaxPrice(i64),
}

impl ProductFilter {
    /// Picks the filter from already-normalized request values.
    ///
    /// A non-empty category takes precedence and the price is then ignored.
    /// A price only filters when it is positive.
    pub fn from_params(category: Option<&str>, price_less_than: Option<i64>) -> Self {
        match (category, price_less_than) {
            (Some(name), _) if !name.is_empty() => Self::Category(name.to_string()),
            (_, Some(price)) if price > 0 => Self::MaxPrice(price),
            _ => Self::None,
        }
    }
}

/// A listing request after query parameter normalization.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductQuery {
    pub filter: ProductFilter,
    pub page: PageRequest,
}

/// Errors surfaced by the listing engine.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed counting products: {0}")]
    Count(#[source] sqlx::Error),

    #[error("failed to fetch products: {0}")]
    Fetch(#[source] sqlx::Error),
}

/// Read access to stored products.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Counts every product in the catalog, ignoring any filter.
    async fn count_products(&self) -> Result<i64, sqlx::Error>;

    /// Returns up to `limit` products matching `filter`, skipping `offset`,
    /// each with its category loaded.
    async fn find_products(
        &self,
        filter: &ProductFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<CatalogProduct>, sqlx::Error>;
}

/// Produces discounted product listings.
#[async_trait]
pub trait ProductEnsurer: Send + Sync {
    async fn filter_products(&self, query: &ProductQuery)
        -> Result<ProductsResponse, CatalogError>;
}

/// Store-backed [`ProductEnsurer`].
#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn CatalogStore>,
    discounts: Arc<DiscountTable>,
}

impl ProductService {
    pub fn new(store: Arc<dyn CatalogStore>, discounts: Arc<DiscountTable>) -> Self {
        Self { store, discounts }
    }

    /// Runs the count query and the page query.
    ///
    /// The returned total is the size of the whole catalog, not of the
    /// filtered subset. The two queries do not share a snapshot.
    pub async fn list(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> Result<(Vec<CatalogProduct>, i64), CatalogError> {
        let total = self
            .store
            .count_products()
            .await
            .map_err(CatalogError::Count)?;

        let items = self
            .store
            .find_products(filter, page.offset(), page.limit)
            .await
            .map_err(CatalogError::Fetch)?;

        Ok((items, total))
    }
}

#[async_trait]
impl ProductEnsurer for ProductService {
    async fn filter_products(
        &self,
        query: &ProductQuery,
    ) -> Result<ProductsResponse, CatalogError> {
        let (items, total) = self.list(&query.filter, query.page).await?;

        tracing::debug!(
            filter = ?query.filter,
            page = query.page.page,
            limit = query.page.limit,
            returned = items.len(),
            total,
            "Listed products"
        );

        Ok(build_response(items, total, query.page, &self.discounts))
    }
}

/// Combines a stored product with its discounted price.
pub fn apply_discount(product: CatalogProduct, discounts: &DiscountTable) -> Product {
    let discount = discounts.resolve(&product.category.name, &product.sku);
    Product {
        id: product.id,
        price: price_view(product.price, discount),
        sku: product.sku,
        name: product.name,
        category: product.category.name,
        created_at: product.created_at,
        updated_at: product.updated_at,
    }
}

/// Assembles the listing response, preserving item order.
pub fn build_response(
    items: Vec<CatalogProduct>,
    total: i64,
    page: PageRequest,
    discounts: &DiscountTable,
) -> ProductsResponse {
    ProductsResponse {
        products: items
            .into_iter()
            .map(|item| apply_discount(item, discounts))
            .collect(),
        meta: PageMeta {
            total_records: total,
            page: page.page,
            total_pages: page.total_pages(total),
            limit: page.limit,
        },
    }
}
