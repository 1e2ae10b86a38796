//! # depot-core: Entity Model for Depot
//!
//! This crate holds the data model shared by every repository strategy,
//! as pure types and functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Depot Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Callers (any front end)                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ depot-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  filter   │  │   graph   │  │  measure  │  │   │
//! │  │   │  Product  │  │OrderFilter│  │first-seen │  │ decimal ⇄ │  │   │
//! │  │   │  Order    │  │ Condition │  │   fold    │  │   text    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    depot-db (Database Layer)                    │   │
//! │  │        SQLite pool, migrations, mapped + tracked repositories   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `Product`, `Order` and the `OrderDetails` join projection
//! - [`filter`] - Optional order predicates and their fragments
//! - [`graph`] - Folding flat join rows into order details
//! - [`measure`] - Decimal measurement storage encoding
//! - [`error`] - Domain error types

pub mod error;
pub mod filter;
pub mod graph;
pub mod measure;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult};
pub use filter::{OrderCondition, OrderFilter};
pub use graph::fold_first_seen;
pub use types::*;
