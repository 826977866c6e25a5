//! Repository implementations for database operations.

pub mod category;
pub mod product;

pub use category::CategoryRepository;
pub use product::{NewProduct, ProductRepository};
