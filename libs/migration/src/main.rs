//! Migration CLI for the catalog schema.
//!
//! Reads `DATABASE_URL`; run `migration up` to create the `products` table.

use migration::Migrator;
use sea_orm_migration::cli;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
