//! Product repository for database operations.

use async_trait::async_trait;
use domain::models::CatalogProduct;
use domain::services::{CatalogStore, ProductFilter};
use sqlx::PgPool;

use crate::entities::ProductEntity;
use crate::metrics::timed;

const PRODUCT_COLUMNS: &str = r#"
    p.id, p.sku, p.name, p.price, p.created_at, p.updated_at,
    c.id AS category_id, c.name AS category_name, c.description AS category_description,
    c.created_at AS category_created_at, c.updated_at AS category_updated_at
"#;

/// Input for inserting a product.
#[derive(Debug, Clone)]
pub struct NewProduct<'a> {
    pub sku: &'a str,
    pub name: &'a str,
    pub price: i64,
    pub category_id: i64,
}

/// Repository for product-related database operations.
#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Creates a new ProductRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Count all products.
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        timed(
            "count_products",
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products").fetch_one(&self.pool),
        )
        .await
    }

    /// Fetch one page of products with their categories, ordered by id.
    pub async fn list(
        &self,
        filter: &ProductFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<ProductEntity>, sqlx::Error> {
        let (where_clause, param_count) = filter_clause(filter);
        let sql = format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products p
            JOIN categories c ON c.id = p.category_id
            {where_clause}
            ORDER BY p.id
            LIMIT ${} OFFSET ${}
            "#,
            param_count + 1,
            param_count + 2
        );

        let query = sqlx::query_as::<_, ProductEntity>(&sql);
        let query = match filter {
            ProductFilter::None => query,
            ProductFilter::Category(name) => query.bind(name.as_str()),
            ProductFilter::MaxPrice(price) => query.bind(*price),
        };

        timed(
            "list_products",
            query.bind(limit).bind(offset).fetch_all(&self.pool),
        )
        .await
    }

    /// Check whether a product with the given SKU exists.
    pub async fn exists_by_sku(&self, sku: &str) -> Result<bool, sqlx::Error> {
        timed(
            "product_exists_by_sku",
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE sku = $1)")
                .bind(sku)
                .fetch_one(&self.pool),
        )
        .await
    }

    /// Insert a product and return its id.
    pub async fn create(&self, product: NewProduct<'_>) -> Result<i64, sqlx::Error> {
        timed(
            "create_product",
            sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO products (sku, name, price, category_id)
                VALUES ($1, $2, $3, $4)
                RETURNING id
                "#,
            )
            .bind(product.sku)
            .bind(product.name)
            .bind(product.price)
            .bind(product.category_id)
            .fetch_one(&self.pool),
        )
        .await
    }
}

#[async_trait]
impl CatalogStore for ProductRepository {
    async fn count_products(&self) -> Result<i64, sqlx::Error> {
        self.count().await
    }

    async fn find_products(
        &self,
        filter: &ProductFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<CatalogProduct>, sqlx::Error> {
        let entities = self.list(filter, offset, limit).await?;
        Ok(entities.into_iter().map(Into::into).collect())
    }
}

/// WHERE clause for a filter and the number of parameters it binds.
fn filter_clause(filter: &ProductFilter) -> (&'static str, usize) {
    match filter {
        ProductFilter::None => ("", 0),
        ProductFilter::Category(_) => ("WHERE c.name = $1", 1),
        ProductFilter::MaxPrice(_) => ("WHERE p.price <= $1", 1),
    }
}
