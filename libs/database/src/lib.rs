//! Database connectors shared by the catalog services
//!
//! # Features
//!
//! - `postgres` (default) - PostgreSQL support with SeaORM
//! - `config` - `core_config::FromEnv` for connection settings
//!
//! # Example
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config(PostgresConfig::new("postgresql://localhost/shop")).await?;
//! postgres::run_migrations::<Migrator>(&db, "catalog").await?;
//! ```

#[cfg(feature = "postgres")]
pub mod postgres;
