//! # Product Repository (mapped)
//!
//! Product CRUD with explicit SQL and row mapping.

use async_trait::async_trait;
use depot_core::{measure, CoreError, Product};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use crate::repository::ProductRepository;

/// One `Product` row as stored.
#[derive(Debug, FromRow)]
#[sqlx(rename_all = "PascalCase")]
struct ProductRow {
    id: i64,
    name: String,
    description: Option<String>,
    weight: Option<String>,
    height: Option<String>,
    width: Option<String>,
    length: Option<String>,
}

impl TryFrom<ProductRow> for Product {
    type Error = CoreError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Product {
            id: row.id,
            name: row.name,
            description: row.description,
            weight: measure::decode("Weight", row.weight.as_deref())?,
            height: measure::decode("Height", row.height.as_deref())?,
            width: measure::decode("Width", row.width.as_deref())?,
            length: measure::decode("Length", row.length.as_deref())?,
        })
    }
}

const SELECT_PRODUCTS: &str = r#"
    SELECT Id, Name, Description, Weight, Height, Width, Length
    FROM Product
"#;

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = MappedProductRepository::new(pool);
///
/// repo.add(&Product::new("Crate")).await?;
/// let products = repo.list_all().await?;
/// ```
#[derive(Debug, Clone)]
pub struct MappedProductRepository {
    pool: SqlitePool,
}

impl MappedProductRepository {
    /// Creates a new MappedProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MappedProductRepository { pool }
    }
}

#[async_trait]
impl ProductRepository for MappedProductRepository {
    async fn list_all(&self) -> DbResult<Vec<Product>> {
        let mut conn = self.pool.acquire().await?;

        let rows: Vec<ProductRow> = sqlx::query_as(&format!("{SELECT_PRODUCTS} ORDER BY Id"))
            .fetch_all(&mut *conn)
            .await?;

        debug!(count = rows.len(), "Listed products");

        let products = rows
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(products)
    }

    async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let mut conn = self.pool.acquire().await?;

        let row: Option<ProductRow> = sqlx::query_as(&format!("{SELECT_PRODUCTS} WHERE Id = ?1"))
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(row.map(Product::try_from).transpose()?)
    }

    async fn add(&self, product: &Product) -> DbResult<()> {
        debug!(name = %product.name, "Inserting product");

        let mut conn = self.pool.acquire().await?;

        sqlx::query(
            r#"
            INSERT INTO Product (Name, Description, Weight, Height, Width, Length)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(product.name.as_str())
        .bind(product.description.as_deref())
        .bind(measure::encode(product.weight))
        .bind(measure::encode(product.height))
        .bind(measure::encode(product.width))
        .bind(measure::encode(product.length))
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = product.id, "Updating product");

        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query(
            r#"
            UPDATE Product SET
                Name = ?2,
                Description = ?3,
                Weight = ?4,
                Height = ?5,
                Width = ?6,
                Length = ?7
            WHERE Id = ?1
            "#,
        )
        .bind(product.id)
        .bind(product.name.as_str())
        .bind(product.description.as_deref())
        .bind(measure::encode(product.weight))
        .bind(measure::encode(product.height))
        .bind(measure::encode(product.width))
        .bind(measure::encode(product.length))
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            debug!(id = product.id, "No product to update");
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting product");

        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query("DELETE FROM Product WHERE Id = ?1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            debug!(id, "No product to delete");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use rust_decimal_macros::dec;

    async fn setup() -> (Database, MappedProductRepository) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();
        (db, repo)
    }

    #[tokio::test]
    async fn test_list_empty() {
        let (_db, repo) = setup().await;
        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_ignores_caller_id() {
        let (_db, repo) = setup().await;

        let mut product = Product::new("Crate").with_description("Pine");
        product.id = 999;
        repo.add(&product).await.unwrap();

        let stored = repo.list_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_ne!(stored[0].id, 999);
        assert!(stored[0].same_content(&product));
    }

    #[tokio::test]
    async fn test_measurements_stored_as_text() {
        let (db, repo) = setup().await;

        let product = Product::new("Crate").with_dimensions(dec!(1.5), dec!(10.0), dec!(5.0), dec!(20.0));
        repo.add(&product).await.unwrap();

        let weight: String = sqlx::query_scalar("SELECT Weight FROM Product")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(weight, "1.5");
    }

    #[tokio::test]
    async fn test_malformed_measurement_is_decode_error() {
        let (db, repo) = setup().await;

        sqlx::query("INSERT INTO Product (Name, Weight) VALUES ('Crate', 'heavy')")
            .execute(db.pool())
            .await
            .unwrap();

        let err = repo.list_all().await.unwrap_err();
        assert!(matches!(err, DbError::Decode(_)));
    }
}
