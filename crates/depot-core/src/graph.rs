//! # Join Graph Folding
//!
//! Turns flat `(order, product)` join rows into [`OrderDetails`].
//!
//! ## First-Seen Rule
//! ```text
//! rows from the store              result
//! ───────────────────────          ─────────────────────────
//! (order 1, product A)   ───────►  OrderDetails(order 1, A)
//! (order 2, product A)   ───────►  OrderDetails(order 2, A)
//! (order 1, product B)   ──╳       discarded: order 1 already seen
//! ```
//! The first row for an order id decides both the order fields and the
//! attached product. Output keeps the order in which ids first appeared.

use std::collections::HashSet;

use crate::types::{Order, OrderDetails, Product};

/// Folds join rows into order details, keeping the first row per order id.
pub fn fold_first_seen<I>(rows: I) -> Vec<OrderDetails>
where
    I: IntoIterator<Item = (Order, Product)>,
{
    let mut seen = HashSet::new();

    rows.into_iter()
        .filter(|(order, _)| seen.insert(order.id))
        .map(|(order, product)| OrderDetails { order, product })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn order(id: i64, status: &str, product_id: i64) -> Order {
        let created = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        Order {
            id,
            ..Order::new(status, product_id, created)
        }
    }

    fn product(id: i64, name: &str) -> Product {
        Product {
            id,
            ..Product::new(name)
        }
    }

    #[test]
    fn test_distinct_rows_pass_through() {
        let details = fold_first_seen(vec![
            (order(1, "Not Started", 10), product(10, "A")),
            (order(2, "In Progress", 10), product(10, "A")),
        ]);

        assert_eq!(details.len(), 2);
        assert_eq!(details[0].order.id, 1);
        assert_eq!(details[1].order.id, 2);
        assert_eq!(details[1].product.id, 10);
    }

    #[test]
    fn test_duplicate_order_keeps_first_row() {
        let details = fold_first_seen(vec![
            (order(1, "Not Started", 10), product(10, "A")),
            (order(2, "In Progress", 10), product(10, "A")),
            (order(1, "Changed", 11), product(11, "B")),
        ]);

        assert_eq!(details.len(), 2);
        assert_eq!(details[0].order.status, "Not Started");
        assert_eq!(details[0].product.name, "A");
    }

    #[test]
    fn test_empty_input() {
        assert!(fold_first_seen(Vec::new()).is_empty());
    }
}
