//! Database library providing the PostgreSQL connector and utilities shared
//! by the workspace applications.
//!
//! # Features
//!
//! - `postgres` (default) - PostgreSQL support with SeaORM
//! - `config` - Configuration support with `core_config::FromEnv`
//!
//! # Example
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let config = PostgresConfig::from_env()?;
//! let db = postgres::connect_from_config_with_retry(&config, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "catalog-api").await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

// Re-exports for convenience
pub use common::{DatabaseError, DatabaseResult};
