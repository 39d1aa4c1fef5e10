use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Product, SortDirection};

const PRODUCT_COLUMNS: &str = "id, name, price, created_at";

/// Storage operations for products.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Inserts a new product.
    async fn create(&self, product: &Product) -> Result<(), AppError>;

    /// Returns the product with `id`, or `AppError::NotFound`.
    async fn find_by_id(&self, id: Uuid) -> Result<Product, AppError>;

    /// Overwrites every field of an existing product.
    ///
    /// Returns `AppError::NotFound` if no product has `product.id`.
    async fn update(&self, product: &Product) -> Result<(), AppError>;

    /// Removes the product with `id`, or returns `AppError::NotFound`.
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;

    /// Lists products ordered by creation time.
    ///
    /// When either `page` or `limit` is zero the whole table is returned, otherwise at
    /// most `limit` rows starting at `(page - 1) * limit`.
    async fn find_all(
        &self,
        page: u32,
        limit: u32,
        sort: SortDirection,
    ) -> Result<Vec<Product>, AppError>;
}

pub struct SqliteProductRepository {
    pool: SqlitePool,
}

impl SqliteProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for SqliteProductRepository {
    async fn create(&self, product: &Product) -> Result<(), AppError> {
        sqlx::query("INSERT INTO products (id, name, price, created_at) VALUES (?, ?, ?, ?)")
            .bind(product.id)
            .bind(&product.name)
            .bind(product.price)
            .bind(product.created_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>(&format!(
            "SELECT {} FROM products WHERE id = ?",
            PRODUCT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".into()))
    }

    async fn update(&self, product: &Product) -> Result<(), AppError> {
        let result =
            sqlx::query("UPDATE products SET name = ?, price = ?, created_at = ? WHERE id = ?")
                .bind(&product.name)
                .bind(product.price)
                .bind(product.created_at)
                .bind(product.id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product not found".into()));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product not found".into()));
        }
        Ok(())
    }

    async fn find_all(
        &self,
        page: u32,
        limit: u32,
        sort: SortDirection,
    ) -> Result<Vec<Product>, AppError> {
        let mut sql = format!(
            "SELECT {} FROM products ORDER BY created_at {}",
            PRODUCT_COLUMNS,
            sort.as_sql()
        );

        if page == 0 || limit == 0 {
            return Ok(sqlx::query_as::<_, Product>(&sql)
                .fetch_all(&self.pool)
                .await?);
        }

        sql.push_str(" LIMIT ? OFFSET ?");
        let offset = i64::from(page - 1) * i64::from(limit);
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(i64::from(limit))
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }
}
