//! Product entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{CatalogProduct, Category};
use sqlx::FromRow;

/// A products row joined with its category.
#[derive(Debug, Clone, FromRow)]
pub struct ProductEntity {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub price: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category_id: i64,
    pub category_name: String,
    pub category_description: Option<String>,
    pub category_created_at: DateTime<Utc>,
    pub category_updated_at: DateTime<Utc>,
}

impl From<ProductEntity> for CatalogProduct {
    fn from(entity: ProductEntity) -> Self {
        Self {
            id: entity.id,
            sku: entity.sku,
            name: entity.name,
            price: entity.price,
            category: Category {
                id: entity.category_id,
                name: entity.category_name,
                description: entity.category_description,
                created_at: entity.category_created_at,
                updated_at: entity.category_updated_at,
            },
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
