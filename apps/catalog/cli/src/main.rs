//! Catalog CLI
//!
//! Runs storefront and admin catalog queries against PostgreSQL and prints
//! the results as JSON.

use clap::{Args, Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv};
use domain_catalog::{
    CategoryId, PgProductRepository, Product, ProductCatalogService, encode_path,
};
use eyre::{Result, eyre};
use serde::Serialize;
use tracing::info;

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Query and maintain the product catalog")]
struct Cli {
    /// Apply pending database migrations before running the command
    #[arg(long, global = true)]
    migrate: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Admin listing with optional keyword and category filters
    List {
        #[arg(short, long, default_value_t = 1)]
        page: i64,

        /// Column to sort by (id, title, alias, price)
        #[arg(long)]
        sort_field: Option<String>,

        /// `asc` sorts ascending; anything else sorts descending
        #[arg(long)]
        sort_dir: Option<String>,

        #[arg(short, long)]
        keyword: Option<String>,

        /// Category to restrict to; 0 or below means all categories
        #[arg(short, long)]
        category: Option<i32>,
    },

    /// Storefront listing of one category
    Category {
        id: i32,

        #[arg(short, long, default_value_t = 1)]
        page: i64,
    },

    /// Keyword search across the catalog
    Search {
        keyword: String,

        #[arg(short, long, default_value_t = 1)]
        page: i64,
    },

    /// Random product from the featured category
    Featured,

    /// Fetch a single product
    Get(GetArgs),

    /// Delete a product by id
    Delete { id: i32 },

    /// Check whether a title is free to use
    CheckUnique {
        title: String,

        /// Id of the product being edited; omit when creating
        #[arg(long)]
        id: Option<i32>,
    },

    /// Create or update a product
    Save {
        /// Id of the product to update; omit to create
        #[arg(long)]
        id: Option<i32>,

        #[arg(long)]
        title: String,

        /// Price in minor units
        #[arg(long)]
        price: i64,

        /// URL slug; derived from the title when omitted
        #[arg(long)]
        alias: Option<String>,

        /// Category ids, the product's own category and all its ancestors
        #[arg(long, value_delimiter = ',')]
        categories: Vec<i32>,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct GetArgs {
    #[arg(long)]
    id: Option<i32>,

    #[arg(long)]
    alias: Option<String>,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn category_path(raw: &[i32]) -> Result<String> {
    let categories = raw
        .iter()
        .map(|&id| CategoryId::new(id).ok_or_else(|| eyre!("Invalid category id {id}")))
        .collect::<Result<Vec<_>>>()?;
    Ok(encode_path(&categories))
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();

    let environment = Environment::from_env();
    init_tracing(&environment);

    let cli = Cli::parse();
    let config = Config::from_env()?;

    info!("Connecting to database...");
    let db = database::postgres::connect_from_config(config.database.clone())
        .await
        .map_err(|e| eyre!("Database connection failed: {}", e))?;

    if cli.migrate {
        database::postgres::run_migrations::<migration::Migrator>(&db, "catalog").await?;
    }

    let service =
        ProductCatalogService::with_config(PgProductRepository::new(db), config.catalog);

    match cli.command {
        Commands::List {
            page,
            sort_field,
            sort_dir,
            keyword,
            category,
        } => {
            let result = service
                .list_by_page(
                    page,
                    sort_field.as_deref(),
                    sort_dir.as_deref(),
                    keyword.as_deref(),
                    category,
                )
                .await?;
            print_json(&result)?;
        }

        Commands::Category { id, page } => {
            print_json(&service.list_by_category(page, id).await?)?;
        }

        Commands::Search { keyword, page } => {
            print_json(&service.search(&keyword, page).await?)?;
        }

        Commands::Featured => {
            print_json(&service.get_random_amount_of_products().await?)?;
        }

        Commands::Get(GetArgs { id, alias }) => {
            let product = match (id, alias) {
                (Some(id), _) => service.get_product(id).await?,
                (None, Some(alias)) => service.get_product_by_alias(&alias).await?,
                (None, None) => return Err(eyre!("Pass either --id or --alias")),
            };
            print_json(&product)?;
        }

        Commands::Delete { id } => {
            service.delete_product(id).await?;
            info!(product_id = id, "Product deleted");
        }

        Commands::CheckUnique { title, id } => {
            println!("{}", service.check_unique(id, &title).await?);
        }

        Commands::Save {
            id,
            title,
            price,
            alias,
            categories,
        } => {
            let mut product = Product::new(title, price, category_path(&categories)?);
            if let Some(id) = id {
                product = product.with_id(id);
            }
            if let Some(alias) = alias {
                product = product.with_alias(alias);
            }

            service.save_product(product).await?;
            info!("Product saved");
        }
    }

    Ok(())
}
