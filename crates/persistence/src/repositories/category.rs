//! Category repository for database operations.

use sqlx::PgPool;

use crate::entities::CategoryEntity;
use crate::metrics::timed;

/// Repository for category-related database operations.
#[derive(Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a category by its unique name.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<CategoryEntity>, sqlx::Error> {
        timed(
            "find_category_by_name",
            sqlx::query_as::<_, CategoryEntity>(
                r#"
                SELECT id, name, description, created_at, updated_at
                FROM categories
                WHERE name = $1
                "#,
            )
            .bind(name)
            .fetch_optional(&self.pool),
        )
        .await
    }

    /// Insert a category.
    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<CategoryEntity, sqlx::Error> {
        timed(
            "create_category",
            sqlx::query_as::<_, CategoryEntity>(
                r#"
                INSERT INTO categories (name, description)
                VALUES ($1, $2)
                RETURNING id, name, description, created_at, updated_at
                "#,
            )
            .bind(name)
            .bind(description)
            .fetch_one(&self.pool),
        )
        .await
    }

    /// Count all categories.
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        timed(
            "count_categories",
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories").fetch_one(&self.pool),
        )
        .await
    }
}
