//! # Bursar DB
//!
//! Storage and generic querying for the Bursar API.
//!
//! - [`value`]: Scalar values and column kinds
//! - [`filter`]: Filter and order specs, plus their query-string syntax
//! - [`predicate`]: Raw predicates such as case-insensitive equality
//! - [`entity`]: The [`Entity`] trait tying a Rust type to a table
//! - [`query`]: Compiling specs into SQL and in-memory matchers
//! - [`store`]: The [`Store`] trait and [`AnyStore`]
//! - [`postgres`]: The PostgreSQL store
//! - [`executor`]: [`QueryExecutor`] (`fetch_one`, `fetch_many`, `fetch_paginated`, ...)
//! - [`repository`]: Generic lookups over any entity
//!
//! With the `test-utils` feature, [`memory::MemoryStore`] provides an
//! in-process store that behaves like the PostgreSQL one.

pub mod entity;
pub mod error;
pub mod executor;
pub mod filter;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod postgres;
pub mod predicate;
pub mod query;
pub mod repository;
pub mod store;
#[cfg(test)]
mod testing;
pub mod value;

use bursar_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;

// Re-export commonly used types at crate root
pub use entity::{Column, Draft, Entity, Record};
pub use error::{QueryError, StoreError};
pub use executor::QueryExecutor;
pub use filter::{Filter, FilterOp, FilterSpec, Order, OrderSpec, SortDirection};
#[cfg(any(test, feature = "test-utils"))]
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use predicate::{LowerEq, RawPredicate};
pub use repository::Repository;
pub use store::{AnyStore, Store};
pub use value::{ColumnKind, Value};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Opens the PostgreSQL connection pool.
///
/// Called once at start-up; the pool is cloned into [`PgStore`] and shared.
///
/// # Errors
///
/// Returns the driver error if the first connection cannot be established.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
}
