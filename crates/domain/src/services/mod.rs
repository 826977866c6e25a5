//! Domain services.

pub mod catalog;
pub mod discount;
pub mod pricing;

pub use catalog::{
    CatalogError, CatalogStore, ProductEnsurer, ProductFilter, ProductQuery, ProductService,
};
pub use discount::{DiscountError, DiscountTable};
pub use pricing::{price_view, CURRENCY};
