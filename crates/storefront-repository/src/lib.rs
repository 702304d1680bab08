//! # Storefront Repository
//!
//! Product persistence on PostgreSQL.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn ProductRepository>
//! PostgresProductRepository
//!   ↓  Arc<dyn DatabasePoolInterface>
//! PostgreSQL (products LEFT JOIN categories)
//! ```

pub mod pool;
pub mod postgres;
pub mod traits;

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

pub use pool::*;
pub use postgres::*;
pub use traits::*;

#[cfg(any(test, feature = "test-utils"))]
pub use memory::InMemoryProductRepository;
