//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Provides the concrete [`RowStore`](crate::domain::ports::RowStore) backed
//! by PostgreSQL through `diesel-async` with `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapter**: the row store only translates between Diesel rows and
//!   domain types. Eviction policy lives in the domain.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: pool and Diesel failures are mapped to
//!   [`RowStoreError`](crate::domain::ports::RowStoreError).
//!
//! # Example
//!
//! ```ignore
//! use find_my_bike::outbound::persistence::{DbPool, DieselRowStore, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/bikes")).await?;
//! let store = DieselRowStore::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_row_store;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_row_store::DieselRowStore;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
