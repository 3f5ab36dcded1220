//! Infrastructure Database Layer
//!
//! This crate provides the database infrastructure for the agency core
//! system on PostgreSQL using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern, providing data access
//! abstractions that hide the database implementation details from the
//! domain layer. Queries are runtime-checked (`sqlx::query_as` with
//! `FromRow` rows) so the workspace builds without a live database.
//!
//! # Counter Store
//!
//! The one piece with a real concurrency contract lives in [`counter`]:
//! a named serial counter mutated exclusively through a single atomic
//! upsert-increment statement, so concurrent callers can never observe
//! duplicate serials.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, DatabaseConfig, CounterStore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/agency")).await?;
//! let counters = CounterStore::new(pool.clone());
//! let serial = counters.next_serial("quotation").await?;
//! ```

pub mod pool;
pub mod error;
pub mod counter;
pub mod repositories;

pub use pool::{DatabasePool, create_pool, create_pool_from_url, DatabaseConfig};
pub use error::DatabaseError;
pub use counter::CounterStore;

/// Applies the embedded migrations to the given pool
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), DatabaseError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
}
