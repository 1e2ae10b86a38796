//! # depot-db: Database Layer for Depot
//!
//! This crate persists products and orders in SQLite and offers two
//! interchangeable repository strategies over the same pool.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Depot Data Flow                                │
//! │                                                                         │
//! │  Caller (seed binary, service code, tests)                             │
//! │       │  Arc<dyn OrderRepository> / Arc<dyn ProductRepository>         │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     depot-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ mapped (sqlx) │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ tracked       │    │ 001_initial_ │  │   │
//! │  │   │ + sea-orm     │    │   (sea-orm)   │    │   schema.sql │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │        SQLite Database: Product, "Order" (FK ProductId)         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool, configuration and repository accessors
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository contracts and both strategies
//!
//! ## Usage
//!
//! ```rust,ignore
//! use depot_core::OrderFilter;
//! use depot_db::{Database, DbConfig, Strategy};
//!
//! let db = Database::new(DbConfig::from_env()?).await?;
//!
//! let repos = db.repositories(Strategy::Mapped);
//! let january = repos
//!     .orders
//!     .get_by_filter(&OrderFilter::new().year(2023).month(1))
//!     .await?;
//!
//! let removed = repos
//!     .orders
//!     .delete_by_filter(&OrderFilter::new().status("Completed"))
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig, Repositories};

// Repository re-exports for convenience
pub use repository::mapped::{MappedOrderRepository, MappedProductRepository};
pub use repository::tracked::{TrackedOrderRepository, TrackedProductRepository};
pub use repository::{OrderRepository, ProductRepository, Strategy};
