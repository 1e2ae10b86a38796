//! # Order Repository (tracked)
//!
//! Graph reads use `find_also_related`, which loads each order with its
//! product in one statement. Rows come back already paired, so the only
//! remaining work is the first-seen fold shared with the mapped strategy.
//!
//! Filters become a `Condition::all()`. Year and month use SQLite's
//! `strftime` through a custom expression with bound values.

use async_trait::async_trait;
use depot_core::{fold_first_seen, Order, OrderCondition, OrderDetails, OrderFilter, Product};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};
use tracing::{debug, warn};

use super::entity::{order, product};
use crate::error::DbResult;
use crate::repository::OrderRepository;

/// Turns a filter into a sea-orm condition. `None` when nothing is constrained.
fn condition_for(filter: &OrderFilter) -> Option<Condition> {
    if filter.is_unconstrained() {
        return None;
    }

    let condition = filter
        .conditions()
        .into_iter()
        .fold(Condition::all(), |acc, condition| match condition {
            OrderCondition::CreatedYear(year) => acc.add(Expr::cust_with_values(
                r#"CAST(strftime('%Y', "Order"."CreatedDate") AS INTEGER) = ?"#,
                [i64::from(year)],
            )),
            OrderCondition::CreatedMonth(month) => acc.add(Expr::cust_with_values(
                r#"CAST(strftime('%m', "Order"."CreatedDate") AS INTEGER) = ?"#,
                [i64::from(month)],
            )),
            OrderCondition::Status(status) => acc.add(order::Column::Status.eq(status)),
            OrderCondition::ProductId(product_id) => {
                acc.add(order::Column::ProductId.eq(product_id))
            }
        });

    Some(condition)
}

fn filtered(filter: &OrderFilter) -> Select<order::Entity> {
    let select = order::Entity::find();
    match condition_for(filter) {
        Some(condition) => select.filter(condition),
        None => select,
    }
}

fn fold_models(rows: Vec<(order::Model, Option<product::Model>)>) -> DbResult<Vec<OrderDetails>> {
    let mut pairs = Vec::with_capacity(rows.len());

    // The FK is NOT NULL, so a missing product only shows up if the
    // constraint was bypassed. Those orders are not part of any graph.
    for (order, product) in rows {
        if let Some(product) = product {
            pairs.push((Order::from(order), Product::try_from(product)?));
        }
    }

    Ok(fold_first_seen(pairs))
}

/// Order repository backed by sea-orm entities.
#[derive(Debug, Clone)]
pub struct TrackedOrderRepository {
    db: DatabaseConnection,
}

impl TrackedOrderRepository {
    /// Creates a new TrackedOrderRepository.
    pub fn new(db: DatabaseConnection) -> Self {
        TrackedOrderRepository { db }
    }
}

#[async_trait]
impl OrderRepository for TrackedOrderRepository {
    async fn list_all(&self) -> DbResult<Vec<OrderDetails>> {
        self.get_by_filter(&OrderFilter::new()).await
    }

    async fn get_by_id(&self, id: i64) -> DbResult<Option<OrderDetails>> {
        let rows = order::Entity::find_by_id(id)
            .find_also_related(product::Entity)
            .all(&self.db)
            .await?;

        Ok(fold_models(rows)?.into_iter().next())
    }

    async fn add(&self, new: &Order) -> DbResult<()> {
        debug!(status = %new.status, product_id = new.product_id, "Inserting order");

        let model = order::ActiveModel {
            status: Set(new.status.clone()),
            created_date: Set(new.created_date),
            updated_date: Set(new.updated_date),
            product_id: Set(new.product_id),
            ..Default::default()
        };

        order::Entity::insert(model).exec(&self.db).await?;
        Ok(())
    }

    async fn update(&self, changed: &Order) -> DbResult<()> {
        debug!(id = changed.id, "Updating order");

        let Some(existing) = order::Entity::find_by_id(changed.id).one(&self.db).await? else {
            debug!(id = changed.id, "No order to update");
            return Ok(());
        };

        let mut model = existing.into_active_model();
        model.status = Set(changed.status.clone());
        model.created_date = Set(changed.created_date);
        model.updated_date = Set(changed.updated_date);
        model.product_id = Set(changed.product_id);

        match model.update(&self.db).await {
            Err(DbErr::RecordNotUpdated) => Ok(()),
            other => other.map(|_| ()).map_err(Into::into),
        }
    }

    async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting order");

        order::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    async fn get_by_filter(&self, filter: &OrderFilter) -> DbResult<Vec<OrderDetails>> {
        let rows = filtered(filter)
            .find_also_related(product::Entity)
            .order_by_asc(order::Column::Id)
            .all(&self.db)
            .await?;

        debug!(rows = rows.len(), ?filter, "Fetched orders");

        fold_models(rows)
    }

    async fn delete_by_filter(&self, filter: &OrderFilter) -> DbResult<u64> {
        let txn = self.db.begin().await?;

        // Collect the matching ids inside the transaction, then remove each
        // entity. Only the key column is read.
        let outcome = async {
            let doomed: Vec<i64> = filtered(filter)
                .select_only()
                .column(order::Column::Id)
                .into_tuple()
                .all(&txn)
                .await?;

            let mut deleted = 0;
            for id in doomed {
                deleted += order::Entity::delete_by_id(id)
                    .exec(&txn)
                    .await?
                    .rows_affected;
            }

            Ok::<u64, DbErr>(deleted)
        }
        .await;

        match outcome {
            Ok(deleted) => {
                txn.commit().await?;
                debug!(deleted, ?filter, "Deleted orders by filter");
                Ok(deleted)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
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
    use crate::pool::{Database, DbConfig};
    use crate::repository::ProductRepository;
    use chrono::{TimeZone, Utc};
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn test_unconstrained_filter_has_no_where() {
        let sql = filtered(&OrderFilter::new())
            .build(DbBackend::Sqlite)
            .to_string();
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn test_date_conditions_use_strftime() {
        let filter = OrderFilter::new().year(2023).month(1);
        let sql = filtered(&filter).build(DbBackend::Sqlite).to_string();

        assert!(sql.contains("strftime('%Y', \"Order\".\"CreatedDate\")"));
        assert!(sql.contains("strftime('%m', \"Order\".\"CreatedDate\")"));
        assert!(sql.contains("2023"));
    }

    #[tokio::test]
    async fn test_date_round_trip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.tracked_products().add(&Product::new("Crate")).await.unwrap();
        let product_id = db.tracked_products().list_all().await.unwrap()[0].id;

        let created = Utc.with_ymd_and_hms(2023, 3, 14, 15, 9, 26).unwrap();
        let repo = db.tracked_orders();
        repo.add(&Order::new("Not Started", product_id, created))
            .await
            .unwrap();

        let stored = repo.list_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].order.created_date, created);
        assert_eq!(stored[0].order.updated_date, created);
    }
}
