//! # Mapped Strategy
//!
//! Hand-written SQL through sqlx. Rows land in `FromRow` structs that mirror
//! the result columns and are then converted into `depot-core` entities.
//!
//! Each call checks a connection out of the pool with `acquire()` and runs
//! every statement on it. The `PoolConnection` guard returns it on drop.

pub mod order;
pub mod product;

pub use order::MappedOrderRepository;
pub use product::MappedProductRepository;
