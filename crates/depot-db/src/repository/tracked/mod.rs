//! # Tracked Strategy
//!
//! sea-orm over the same SQLite pool the mapped strategy uses. Reads go
//! through entity finders; writes load a model, mark the changed columns on
//! its `ActiveModel` and let the ORM emit the statement.
//!
//! ```text
//! Database.pool ──clone──► SqlxSqliteConnector::from_sqlx_sqlite_pool
//!                                   │
//!                                   ▼
//!                          DatabaseConnection (shared by both repos)
//! ```

pub mod entity;
pub mod order;
pub mod product;

pub use order::TrackedOrderRepository;
pub use product::TrackedProductRepository;
