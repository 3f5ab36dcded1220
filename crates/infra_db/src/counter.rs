//! Counter store and serial issuer
//!
//! A persisted mapping from counter name to the last issued integer. Every
//! lead and quotation number in the system hangs off this one invariant:
//! for a given name the value never decreases, and no two callers ever
//! receive the same serial.
//!
//! The read-increment-write is a single atomic statement
//! (`INSERT .. ON CONFLICT .. DO UPDATE .. RETURNING`), never a read
//! followed by a separate write. For N concurrent calls with the same name
//! the returned values are N distinct consecutive integers and the stored
//! value ends at the starting value plus N. Ordering across concurrent
//! callers is not guaranteed, only distinctness.
//!
//! Counters are created implicitly on first use (the first serial for a
//! new name is 1) and never deleted in normal operation.

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use tracing::debug;

use core_kernel::numbering::format_document_number;
use crate::error::DatabaseError;

/// Issues strictly-increasing serials per named sequence
#[derive(Debug, Clone)]
pub struct CounterStore {
    pool: PgPool,
}

impl CounterStore {
    /// Creates a new CounterStore with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Atomically increments the named counter and returns the new value.
    ///
    /// The first call for a new name returns 1. If this returns an error,
    /// the caller must not assume a serial was issued.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::QueryFailed` for an empty name and the
    /// underlying storage error when the database is unreachable.
    pub async fn next_serial(&self, name: &str) -> Result<i64, DatabaseError> {
        if name.is_empty() {
            return Err(DatabaseError::QueryFailed(
                "counter name cannot be empty".to_string(),
            ));
        }

        let (value,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO counters (name, value, updated_at)
            VALUES ($1, 1, $2)
            ON CONFLICT (name)
            DO UPDATE SET value = counters.value + 1, updated_at = $2
            RETURNING value
            "#,
        )
        .bind(name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        debug!(counter = name, serial = value, "Issued serial");
        Ok(value)
    }

    /// Issues the next serial for `name` and formats it as a document
    /// number for the given date.
    pub async fn next_document_number(
        &self,
        name: &str,
        date: NaiveDate,
    ) -> Result<String, DatabaseError> {
        let serial = self.next_serial(name).await?;
        Ok(format_document_number(date, serial))
    }

    /// Reads the current value of a counter without incrementing it.
    ///
    /// Returns `None` for a counter that has never issued a serial.
    pub async fn current(&self, name: &str) -> Result<Option<i64>, DatabaseError> {
        let row: Option<(i64,)> =
            sqlx::query_as("SELECT value FROM counters WHERE name = $1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(v,)| v))
    }
}
