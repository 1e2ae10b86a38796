//! sea-orm entity definitions for the `Product` and `"Order"` tables.
//!
//! Column names are spelled out because the schema uses PascalCase while the
//! model fields are snake_case. Measurements stay `Option<String>` here and
//! are parsed when a model becomes a [`depot_core::Product`].

pub mod order;
pub mod product;
