//! # Domain Types
//!
//! Entity shapes shared by every repository strategy.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    Product      │   │      Order      │   │    OrderDetails     │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id (store)     │◄──│  product_id(FK) │   │  order   (Order)    │   │
//! │  │  name           │   │  id (store)     │   │  product (Product)  │   │
//! │  │  description?   │   │  status         │   │                     │   │
//! │  │  weight/height/ │   │  created_date   │   │  read-only join     │   │
//! │  │  width/length?  │   │  updated_date   │   │  projection         │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `id` is assigned by the store on insert. Write paths that create rows
//! ignore whatever value the caller put there; update and delete match on it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Product
// =============================================================================

/// A product that orders can reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Store-assigned identity. Ignored on insert.
    pub id: i64,

    /// Display name (required).
    pub name: String,

    /// Optional free-text description.
    pub description: Option<String>,

    #[ts(as = "Option<String>")]
    pub weight: Option<Decimal>,

    #[ts(as = "Option<String>")]
    pub height: Option<Decimal>,

    #[ts(as = "Option<String>")]
    pub width: Option<Decimal>,

    #[ts(as = "Option<String>")]
    pub length: Option<Decimal>,
}

impl Product {
    /// Creates an unsaved product with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Product {
            name: name.into(),
            ..Product::default()
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets all four measurements at once.
    pub fn with_dimensions(
        mut self,
        weight: Decimal,
        height: Decimal,
        width: Decimal,
        length: Decimal,
    ) -> Self {
        self.weight = Some(weight);
        self.height = Some(height);
        self.width = Some(width);
        self.length = Some(length);
        self
    }

    /// Compares every field except `id`.
    ///
    /// ## Usage
    /// Checking what came back from the store against what was written,
    /// since the store assigns the identity.
    pub fn same_content(&self, other: &Product) -> bool {
        self.name == other.name
            && self.description == other.description
            && self.weight == other.weight
            && self.height == other.height
            && self.width == other.width
            && self.length == other.length
    }
}

// =============================================================================
// Order
// =============================================================================

/// An order for exactly one product.
///
/// `status` is free-form text. Values seen in practice include
/// `"Not Started"` and `"In Progress"`, but nothing is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    /// Store-assigned identity. Ignored on insert.
    pub id: i64,

    pub status: String,

    #[ts(as = "String")]
    pub created_date: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_date: DateTime<Utc>,

    /// Foreign key to [`Product::id`].
    pub product_id: i64,
}

impl Order {
    /// Creates an unsaved order; `updated_date` starts equal to `created_date`.
    pub fn new(status: impl Into<String>, product_id: i64, created_date: DateTime<Utc>) -> Self {
        Order {
            id: 0,
            status: status.into(),
            created_date,
            updated_date: created_date,
            product_id,
        }
    }
}

// =============================================================================
// Order Details (join projection)
// =============================================================================

/// An order together with the product it references.
///
/// Only read paths build this. Writes take a plain [`Order`]; the product
/// is never written through the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderDetails {
    #[serde(flatten)]
    pub order: Order,

    pub product: Product,
}

impl OrderDetails {
    /// Drops the attached product.
    pub fn into_order(self) -> Order {
        self.order
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_product_builder() {
        let product = Product::new("Crate")
            .with_description("Pine")
            .with_dimensions(dec!(1.5), dec!(10.0), dec!(5.0), dec!(20.0));

        assert_eq!(product.id, 0);
        assert_eq!(product.description.as_deref(), Some("Pine"));
        assert_eq!(product.weight, Some(dec!(1.5)));
        assert_eq!(product.length, Some(dec!(20)));
    }

    #[test]
    fn test_same_content_ignores_id() {
        let a = Product::new("Crate").with_description("Pine");
        let mut b = a.clone();
        b.id = 42;

        assert!(a.same_content(&b));
        assert_ne!(a, b);

        b.description = None;
        assert!(!a.same_content(&b));
    }

    #[test]
    fn test_new_order_starts_unmodified() {
        let created = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let order = Order::new("Not Started", 7, created);

        assert_eq!(order.created_date, order.updated_date);
        assert_eq!(order.product_id, 7);
    }

    #[test]
    fn test_order_details_serializes_flat() {
        let created = Utc.with_ymd_and_hms(2023, 2, 1, 0, 0, 0).unwrap();
        let mut product = Product::new("Crate").with_dimensions(
            dec!(1.5),
            dec!(10.0),
            dec!(5.0),
            dec!(20.0),
        );
        product.id = 3;
        let details = OrderDetails {
            order: Order::new("In Progress", 3, created),
            product,
        };

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["status"], "In Progress");
        assert_eq!(json["product_id"], 3);
        assert_eq!(json["product"]["id"], 3);
        // serde-with-str keeps decimals exact on the wire
        assert_eq!(json["product"]["weight"], "1.5");
    }
}
