//! Catalog fixture seeding.
//!
//! Seeding is idempotent: categories are matched by name and products by
//! SKU, and anything already present is left untouched.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;
use validator::Validate;

use crate::repositories::{CategoryRepository, NewProduct, ProductRepository};

/// Description given to categories created by the seeder.
pub const SEED_CATEGORY_DESCRIPTION: &str = "best product ever";

/// Error type for seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid seed data: {0}")]
    Invalid(#[from] validator::ValidationErrors),

    #[error("category {category} not found for product {sku}")]
    MissingCategory { category: String, sku: String },

    #[error("failed to create category {name}: {source}")]
    CreateCategory {
        name: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("failed to create product {sku}: {source}")]
    CreateProduct {
        sku: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Top-level fixture document.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SeedData {
    #[serde(default)]
    #[validate(nested)]
    pub categories: Vec<CategorySeed>,
    #[serde(default)]
    #[validate(nested)]
    pub products: Vec<ProductSeed>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CategorySeed {
    #[validate(length(min = 1, message = "Category name must not be empty"))]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProductSeed {
    #[validate(length(min = 1, message = "SKU must not be empty"))]
    pub sku: String,
    #[validate(length(min = 1, message = "Product name must not be empty"))]
    pub name: String,
    pub category: String,
    #[validate(range(min = 0, message = "Price must be non-negative"))]
    pub price: i64,
}

/// Counts of what a seeding run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories_created: usize,
    pub categories_existing: usize,
    pub products_created: usize,
    pub products_existing: usize,
}

impl SeedData {
    /// Parses and validates a fixture document.
    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        let data: Self = serde_json::from_str(json)?;
        data.validate()?;
        Ok(data)
    }

    /// Fails if any product references a category the fixture does not list.
    pub fn check_categories(&self) -> Result<(), SeedError> {
        for product in &self.products {
            if !self.categories.iter().any(|c| c.name == product.category) {
                return Err(SeedError::MissingCategory {
                    category: product.category.clone(),
                    sku: product.sku.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Reads a fixture file and seeds the database with it.
pub async fn seed_database(
    pool: &PgPool,
    path: impl AsRef<Path>,
) -> Result<SeedSummary, SeedError> {
    let path = path.as_ref();
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SeedError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let data = SeedData::from_json(&json)?;
    seed(pool, &data).await
}

/// Seeds the database with already-parsed fixture data.
pub async fn seed(pool: &PgPool, data: &SeedData) -> Result<SeedSummary, SeedError> {
    data.check_categories()?;

    let categories = CategoryRepository::new(pool.clone());
    let products = ProductRepository::new(pool.clone());
    let mut summary = SeedSummary::default();

    let mut category_ids: HashMap<&str, i64> = HashMap::new();
    for category in &data.categories {
        let id = match categories.find_by_name(&category.name).await? {
            Some(existing) => {
                info!(category = %category.name, "Category already exists");
                summary.categories_existing += 1;
                existing.id
            }
            None => {
                info!(category = %category.name, "Creating category");
                let created = categories
                    .create(&category.name, Some(SEED_CATEGORY_DESCRIPTION))
                    .await
                    .map_err(|source| SeedError::CreateCategory {
                        name: category.name.clone(),
                        source,
                    })?;
                summary.categories_created += 1;
                created.id
            }
        };
        category_ids.insert(category.name.as_str(), id);
    }

    for product in &data.products {
        let category_id = *category_ids.get(product.category.as_str()).ok_or_else(|| {
            SeedError::MissingCategory {
                category: product.category.clone(),
                sku: product.sku.clone(),
            }
        })?;

        if products.exists_by_sku(&product.sku).await? {
            info!(sku = %product.sku, "Product already exists");
            summary.products_existing += 1;
            continue;
        }

        info!(sku = %product.sku, "Creating product");
        products
            .create(NewProduct {
                sku: &product.sku,
                name: &product.name,
                price: product.price,
                category_id,
            })
            .await
            .map_err(|source| SeedError::CreateProduct {
                sku: product.sku.clone(),
                source,
            })?;
        summary.products_created += 1;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "categories": [{"name": "boots"}, {"name": "sandals"}],
        "products": [
            {"sku": "000001", "name": "BV Lean leather ankle boots", "category": "boots", "price": 89000},
            {"sku": "000004", "name": "Naima embellished suede sandals", "category": "sandals", "price": 79500}
        ]
    }"#;

    #[test]
    fn test_parse_fixture() {
        let data = SeedData::from_json(FIXTURE).unwrap();
        assert_eq!(data.categories.len(), 2);
        assert_eq!(data.products.len(), 2);
        assert_eq!(data.products[0].sku, "000001");
        assert_eq!(data.products[0].price, 89000);
        assert!(data.check_categories().is_ok());
    }

    #[test]
    fn test_parse_malformed_json() {
        let err = SeedData::from_json("{\"categories\": [").unwrap_err();
        assert!(matches!(err, SeedError::Parse(_)));
        assert!(err.to_string().starts_with("failed to parse JSON"));
    }

    #[test]
    fn test_parse_missing_sections_defaults_to_empty() {
        let data = SeedData::from_json("{}").unwrap();
        assert!(data.categories.is_empty());
        assert!(data.products.is_empty());
    }

    #[test]
    fn test_validation_rejects_empty_sku() {
        let json = r#"{
            "categories": [{"name": "boots"}],
            "products": [{"sku": "", "name": "Nameless", "category": "boots", "price": 100}]
        }"#;
        let err = SeedData::from_json(json).unwrap_err();
        assert!(matches!(err, SeedError::Invalid(_)));
    }

    #[test]
    fn test_validation_rejects_negative_price() {
        let json = r#"{
            "categories": [{"name": "boots"}],
            "products": [{"sku": "x1", "name": "Boot", "category": "boots", "price": -5}]
        }"#;
        assert!(matches!(
            SeedData::from_json(json),
            Err(SeedError::Invalid(_))
        ));
    }

    #[test]
    fn test_check_categories_reports_missing() {
        let json = r#"{
            "categories": [{"name": "boots"}],
            "products": [{"sku": "000009", "name": "Loafer", "category": "loafers", "price": 100}]
        }"#;
        let data = SeedData::from_json(json).unwrap();
        let err = data.check_categories().unwrap_err();
        assert_eq!(err.to_string(), "category loafers not found for product 000009");
    }

    #[tokio::test]
    async fn test_seed_database_missing_file() {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        let err = seed_database(&pool, "does/not/exist.json").await.unwrap_err();
        assert!(matches!(err, SeedError::Read { .. }));
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
