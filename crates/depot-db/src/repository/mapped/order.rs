//! # Order Repository (mapped)
//!
//! Order reads run one INNER JOIN against `Product` and get back a flat row
//! per match. Each row is split into its order half and its product half, then
//! folded into [`OrderDetails`] by first-seen order id.
//!
//! ## Filtered Queries
//! ```text
//! OrderFilter { year, month, status, product_id }
//!        │
//!        ▼  conditions() in field order
//! ┌──────────────────────────────────────────────────────────────┐
//! │ WHERE CAST(strftime('%Y', o.CreatedDate) AS INTEGER) = ?     │
//! │   AND CAST(strftime('%m', o.CreatedDate) AS INTEGER) = ?     │
//! │   AND o.Status = ?                                           │
//! │   AND o.ProductId = ?                                        │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//! Every value is bound. Absent fields contribute nothing, and an empty
//! filter drops the WHERE clause entirely.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use depot_core::{
    fold_first_seen, measure, CoreError, Order, OrderCondition, OrderDetails, OrderFilter,
    Product,
};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, warn};

use crate::error::DbResult;
use crate::repository::OrderRepository;

/// One joined order/product row. Column aliases keep the two `Id`s apart.
#[derive(Debug, FromRow)]
struct OrderProductRow {
    order_id: i64,
    order_status: String,
    order_created_date: DateTime<Utc>,
    order_updated_date: DateTime<Utc>,
    order_product_id: i64,
    product_id: i64,
    product_name: String,
    product_description: Option<String>,
    product_weight: Option<String>,
    product_height: Option<String>,
    product_width: Option<String>,
    product_length: Option<String>,
}

impl OrderProductRow {
    fn split(self) -> Result<(Order, Product), CoreError> {
        let order = Order {
            id: self.order_id,
            status: self.order_status,
            created_date: self.order_created_date,
            updated_date: self.order_updated_date,
            product_id: self.order_product_id,
        };

        let product = Product {
            id: self.product_id,
            name: self.product_name,
            description: self.product_description,
            weight: measure::decode("Weight", self.product_weight.as_deref())?,
            height: measure::decode("Height", self.product_height.as_deref())?,
            width: measure::decode("Width", self.product_width.as_deref())?,
            length: measure::decode("Length", self.product_length.as_deref())?,
        };

        Ok((order, product))
    }
}

const SELECT_DETAILS: &str = r#"
    SELECT
        o.Id AS order_id,
        o.Status AS order_status,
        o.CreatedDate AS order_created_date,
        o.UpdatedDate AS order_updated_date,
        o.ProductId AS order_product_id,
        p.Id AS product_id,
        p.Name AS product_name,
        p.Description AS product_description,
        p.Weight AS product_weight,
        p.Height AS product_height,
        p.Width AS product_width,
        p.Length AS product_length
    FROM "Order" o
    INNER JOIN Product p ON o.ProductId = p.Id
"#;

/// Appends `WHERE ... AND ...` for every constrained filter field.
///
/// `qualifier` prefixes column names (`"o."` inside the join, `""` for a
/// plain `DELETE`).
fn push_conditions(builder: &mut QueryBuilder<'_, Sqlite>, filter: &OrderFilter, qualifier: &str) {
    let mut separator = " WHERE ";

    for condition in filter.conditions() {
        builder.push(separator);
        separator = " AND ";

        match condition {
            OrderCondition::CreatedYear(year) => {
                builder
                    .push(format!("CAST(strftime('%Y', {qualifier}CreatedDate) AS INTEGER) = "))
                    .push_bind(year);
            }
            OrderCondition::CreatedMonth(month) => {
                builder
                    .push(format!("CAST(strftime('%m', {qualifier}CreatedDate) AS INTEGER) = "))
                    .push_bind(i64::from(month));
            }
            OrderCondition::Status(status) => {
                builder
                    .push(format!("{qualifier}Status = "))
                    .push_bind(status.to_string());
            }
            OrderCondition::ProductId(product_id) => {
                builder
                    .push(format!("{qualifier}ProductId = "))
                    .push_bind(product_id);
            }
        }
    }
}

fn fold_rows(rows: Vec<OrderProductRow>) -> DbResult<Vec<OrderDetails>> {
    let pairs = rows
        .into_iter()
        .map(OrderProductRow::split)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(fold_first_seen(pairs))
}

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct MappedOrderRepository {
    pool: SqlitePool,
}

impl MappedOrderRepository {
    /// Creates a new MappedOrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MappedOrderRepository { pool }
    }
}

#[async_trait]
impl OrderRepository for MappedOrderRepository {
    async fn list_all(&self) -> DbResult<Vec<OrderDetails>> {
        self.get_by_filter(&OrderFilter::new()).await
    }

    async fn get_by_id(&self, id: i64) -> DbResult<Option<OrderDetails>> {
        let mut conn = self.pool.acquire().await?;

        let rows: Vec<OrderProductRow> =
            sqlx::query_as(&format!("{SELECT_DETAILS} WHERE o.Id = ?1"))
                .bind(id)
                .fetch_all(&mut *conn)
                .await?;

        Ok(fold_rows(rows)?.into_iter().next())
    }

    async fn add(&self, order: &Order) -> DbResult<()> {
        debug!(status = %order.status, product_id = order.product_id, "Inserting order");

        let mut conn = self.pool.acquire().await?;

        sqlx::query(
            r#"
            INSERT INTO "Order" (Status, CreatedDate, UpdatedDate, ProductId)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(order.status.as_str())
        .bind(order.created_date)
        .bind(order.updated_date)
        .bind(order.product_id)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    async fn update(&self, order: &Order) -> DbResult<()> {
        debug!(id = order.id, "Updating order");

        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query(
            r#"
            UPDATE "Order" SET
                Status = ?2,
                CreatedDate = ?3,
                UpdatedDate = ?4,
                ProductId = ?5
            WHERE Id = ?1
            "#,
        )
        .bind(order.id)
        .bind(order.status.as_str())
        .bind(order.created_date)
        .bind(order.updated_date)
        .bind(order.product_id)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            debug!(id = order.id, "No order to update");
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting order");

        let mut conn = self.pool.acquire().await?;

        sqlx::query(r#"DELETE FROM "Order" WHERE Id = ?1"#)
            .bind(id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    async fn get_by_filter(&self, filter: &OrderFilter) -> DbResult<Vec<OrderDetails>> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_DETAILS);
        push_conditions(&mut builder, filter, "o.");
        builder.push(" ORDER BY o.Id");

        let mut conn = self.pool.acquire().await?;

        let rows: Vec<OrderProductRow> = builder
            .build_query_as()
            .fetch_all(&mut *conn)
            .await?;

        debug!(rows = rows.len(), ?filter, "Fetched orders");

        fold_rows(rows)
    }

    async fn delete_by_filter(&self, filter: &OrderFilter) -> DbResult<u64> {
        let mut builder = QueryBuilder::<Sqlite>::new(r#"DELETE FROM "Order""#);
        push_conditions(&mut builder, filter, "");

        let mut tx = self.pool.begin().await?;

        match builder.build().execute(&mut *tx).await {
            Ok(result) => {
                tx.commit().await?;
                let deleted = result.rows_affected();
                debug!(deleted, ?filter, "Deleted orders by filter");
                Ok(deleted)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "Rollback after failed bulk delete also failed");
                }
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Execute;

    fn sql_for(filter: &OrderFilter, qualifier: &str) -> String {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT 1 FROM \"Order\" o");
        push_conditions(&mut builder, filter, qualifier);
        builder.build().sql().to_string()
    }

    #[test]
    fn test_empty_filter_has_no_where() {
        let sql = sql_for(&OrderFilter::new(), "o.");
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn test_conditions_joined_with_and() {
        let filter = OrderFilter::new().year(2023).status("Not Started").product_id(7);
        let sql = sql_for(&filter, "o.");

        assert!(sql.contains(" WHERE CAST(strftime('%Y', o.CreatedDate) AS INTEGER) = ?"));
        assert!(sql.contains(" AND o.Status = ?"));
        assert!(sql.contains(" AND o.ProductId = ?"));
        assert_eq!(sql.matches("WHERE").count(), 1);
        assert!(!sql.contains("%m"));
    }

    #[test]
    fn test_unqualified_columns_for_delete() {
        let filter = OrderFilter::new().month(2);
        let sql = sql_for(&filter, "");

        assert!(sql.contains("strftime('%m', CreatedDate)"));
        assert!(!sql.contains("o."));
    }

    #[test]
    fn test_values_are_bound_not_inlined() {
        let filter = OrderFilter::new().status("x' OR '1'='1");
        let sql = sql_for(&filter, "o.");
        assert!(!sql.contains("OR '1'='1"));
    }
}
