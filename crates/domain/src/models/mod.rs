//! Domain models for the catalog service.

pub mod category;
pub mod product;

pub use category::Category;
pub use product::{CatalogProduct, PageMeta, PriceView, Product, ProductsResponse};
