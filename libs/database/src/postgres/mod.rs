//! PostgreSQL connection management and migration running.

mod config;
mod connector;

pub use config::PostgresConfig;
pub use connector::{connect, connect_from_config, run_migrations};

pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
pub use sea_orm_migration::MigratorTrait;
