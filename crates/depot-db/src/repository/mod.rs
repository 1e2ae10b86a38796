//! # Repository Module
//!
//! Repository contracts for products and orders, and the two strategies
//! that implement them.
//!
//! ## Two Strategies, One Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │             ProductRepository          OrderRepository                  │
//! │                    ▲                          ▲                         │
//! │          ┌─────────┴────────┐       ┌─────────┴────────┐                │
//! │          │                  │       │                  │                │
//! │   MappedProduct…    TrackedProduct…  MappedOrder…   TrackedOrder…       │
//! │   (sqlx, raw SQL)   (sea-orm)        (sqlx, raw SQL) (sea-orm)          │
//! │                                                                         │
//! │  mapped:  hand-written SQL, FromRow row structs, flat join rows        │
//! │           folded by first-seen order id                                │
//! │  tracked: entity models, find_also_related graph reads, ActiveModel    │
//! │           change tracking for writes                                   │
//! │                                                                         │
//! │  Both pass the same conformance suite (tests/conformance.rs).          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Per-Call Lifecycle
//! acquire connection → execute → (commit, bulk delete only) → release.
//! Release happens on drop, so it also happens on every error path.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use depot_core::{Order, OrderDetails, OrderFilter, Product};

use crate::error::{DbError, DbResult};

pub mod mapped;
pub mod tracked;

// =============================================================================
// Contracts
// =============================================================================

/// CRUD over products.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Every product, by id. Empty when there are none.
    async fn list_all(&self) -> DbResult<Vec<Product>>;

    /// The product with this id, or `None`.
    async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>>;

    /// Inserts a product. `product.id` is ignored; the store assigns one.
    /// Re-query to learn it.
    async fn add(&self, product: &Product) -> DbResult<()>;

    /// Replaces every field except the id for the row matching `product.id`.
    /// Matching nothing is not an error.
    async fn update(&self, product: &Product) -> DbResult<()>;

    /// Removes the product. Missing ids are not an error.
    async fn delete(&self, id: i64) -> DbResult<()>;
}

/// CRUD, filtering and bulk delete over orders.
///
/// Every read joins the referenced product and returns [`OrderDetails`].
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Every order with its product, by id.
    async fn list_all(&self) -> DbResult<Vec<OrderDetails>>;

    /// The order with this id and its product, or `None`.
    async fn get_by_id(&self, id: i64) -> DbResult<Option<OrderDetails>>;

    /// Inserts status, dates and product id. `order.id` is ignored.
    async fn add(&self, order: &Order) -> DbResult<()>;

    /// Replaces status, dates and product id for the row matching `order.id`.
    /// Matching nothing is not an error.
    async fn update(&self, order: &Order) -> DbResult<()>;

    /// Removes the order. Missing ids are not an error.
    async fn delete(&self, id: i64) -> DbResult<()>;

    /// Orders matching every supplied filter field, with their products.
    async fn get_by_filter(&self, filter: &OrderFilter) -> DbResult<Vec<OrderDetails>>;

    /// Deletes every matching order in one transaction and returns how many
    /// rows went. On failure nothing is deleted and the store error is
    /// returned.
    async fn delete_by_filter(&self, filter: &OrderFilter) -> DbResult<u64>;
}

// =============================================================================
// Strategy Selection
// =============================================================================

/// Which implementation backs the repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Hand-written SQL with explicit row mapping (sqlx).
    Mapped,
    /// Change-tracking ORM (sea-orm).
    Tracked,
}

impl Strategy {
    /// Every strategy, in declaration order.
    pub const ALL: [Strategy; 2] = [Strategy::Mapped, Strategy::Tracked];

    /// Lowercase name, as accepted by `FromStr`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Mapped => "mapped",
            Strategy::Tracked => "tracked",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mapped" | "sql" => Ok(Strategy::Mapped),
            "tracked" | "orm" => Ok(Strategy::Tracked),
            other => Err(DbError::InvalidConfig(format!("unknown strategy '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_parse() {
        assert_eq!("mapped".parse::<Strategy>().unwrap(), Strategy::Mapped);
        assert_eq!(" ORM ".parse::<Strategy>().unwrap(), Strategy::Tracked);
        assert!("cached".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_strategy_display_round_trips() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.to_string().parse::<Strategy>().unwrap(), strategy);
        }
    }
}
