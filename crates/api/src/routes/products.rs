//! Product listing endpoint.

use axum::extract::{Query, State};
use domain::models::ProductsResponse;
use domain::services::{ProductFilter, ProductQuery};
use shared::pagination::PageRequest;
use shared::validation::parse_positive_int;

use crate::app::AppState;
use crate::error::ApiError;
use crate::response::Envelope;

/// Raw query parameters for `GET /api/products`.
///
/// Everything is kept as text so malformed values fall back to defaults
/// instead of rejecting the request.
#[derive(Debug, Default)]
pub struct ListProductsParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub category: Option<String>,
    pub price_less_than: Option<String>,
}

impl ListProductsParams {
    /// Collects the known parameters from raw query pairs.
    ///
    /// A repeated key keeps its first value; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut params.page,
                "limit" => &mut params.limit,
                "category" => &mut params.category,
                "priceLessThan" => &mut params.price_less_than,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }

    /// Normalizes the parameters into a listing query.
    pub fn into_query(self) -> ProductQuery {
        let page = PageRequest::from_query(self.page.as_deref(), self.limit.as_deref());
        let price_less_than = parse_positive_int(self.price_less_than.as_deref());
        ProductQuery {
            filter: ProductFilter::from_params(self.category.as_deref(), price_less_than),
            page,
        }
    }
}

/// List products with discounts applied.
///
/// GET /api/products?page=&limit=&category=&priceLessThan=
pub async fn list_products(
    State(state): State<AppState>,
    pairs: Option<Query<Vec<(String, String)>>>,
) -> Result<Envelope<ProductsResponse>, ApiError> {
    let pairs = pairs.map(|Query(pairs)| pairs).unwrap_or_default();
    let query = ListProductsParams::from_pairs(pairs).into_query();

    let response = state.products.filter_products(&query).await?;
    Ok(Envelope::successful(response))
}
