//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod category;
pub mod product;

pub use category::CategoryEntity;
pub use product::ProductEntity;
