//! # Order Filters
//!
//! Optional order predicates and the fragments they compose into.
//!
//! ## Composition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Filter → Conditions → Query                          │
//! │                                                                         │
//! │  OrderFilter { year: Some(2023), month: None,                          │
//! │                status: Some("Not Started"), product_id: None }         │
//! │       │                                                                 │
//! │       │  conditions()  (absent fields contribute nothing)               │
//! │       ▼                                                                 │
//! │  [CreatedYear(2023), Status("Not Started")]                             │
//! │       │                                                                 │
//! │       │  each strategy translates the fragments itself                  │
//! │       ▼                                                                 │
//! │  mapped:  WHERE year(CreatedDate) = ?1 AND Status = ?2                  │
//! │  tracked: Condition::all().add(..).add(..)                              │
//! │                                                                         │
//! │  No fragments → no WHERE clause → every row                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::types::Order;

/// Optional constraints on orders, combined with logical AND.
///
/// ## Example
/// ```rust
/// use depot_core::OrderFilter;
///
/// let filter = OrderFilter::new().year(2023).month(1).status("Not Started");
/// assert_eq!(filter.conditions().len(), 3);
/// assert!(OrderFilter::new().is_unconstrained());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFilter {
    /// Year component of `created_date`.
    pub year: Option<i32>,

    /// Month component (1-12) of `created_date`.
    pub month: Option<u32>,

    /// Exact status. An empty string counts as absent.
    pub status: Option<String>,

    pub product_id: Option<i64>,
}

/// A single predicate fragment produced by [`OrderFilter::conditions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderCondition<'a> {
    CreatedYear(i32),
    CreatedMonth(u32),
    Status(&'a str),
    ProductId(i64),
}

impl OrderFilter {
    /// A filter that matches every order.
    pub fn new() -> Self {
        OrderFilter::default()
    }

    /// Builds a filter from the four nullable parameters in one call.
    pub fn from_parts(
        year: Option<i32>,
        month: Option<u32>,
        status: Option<&str>,
        product_id: Option<i64>,
    ) -> Self {
        OrderFilter {
            year,
            month,
            status: status.map(str::to_string),
            product_id,
        }
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn product_id(mut self, product_id: i64) -> Self {
        self.product_id = Some(product_id);
        self
    }

    /// The status constraint, if it is present and non-empty.
    fn effective_status(&self) -> Option<&str> {
        self.status.as_deref().filter(|status| !status.is_empty())
    }

    /// Returns the fragments for every supplied constraint, in field order.
    pub fn conditions(&self) -> Vec<OrderCondition<'_>> {
        let mut conditions = Vec::with_capacity(4);

        if let Some(year) = self.year {
            conditions.push(OrderCondition::CreatedYear(year));
        }
        if let Some(month) = self.month {
            conditions.push(OrderCondition::CreatedMonth(month));
        }
        if let Some(status) = self.effective_status() {
            conditions.push(OrderCondition::Status(status));
        }
        if let Some(product_id) = self.product_id {
            conditions.push(OrderCondition::ProductId(product_id));
        }

        conditions
    }

    /// True when no constraint is supplied (matches every order).
    pub fn is_unconstrained(&self) -> bool {
        self.conditions().is_empty()
    }

    /// Evaluates the filter against an order in memory.
    ///
    /// Stores compare `created_date` in UTC, and so does this.
    pub fn matches(&self, order: &Order) -> bool {
        self.conditions()
            .into_iter()
            .all(|condition| condition.matches(order))
    }
}

impl OrderCondition<'_> {
    /// Evaluates this single fragment against an order.
    pub fn matches(&self, order: &Order) -> bool {
        match *self {
            OrderCondition::CreatedYear(year) => order.created_date.year() == year,
            OrderCondition::CreatedMonth(month) => order.created_date.month() == month,
            OrderCondition::Status(status) => order.status == status,
            OrderCondition::ProductId(product_id) => order.product_id == product_id,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
