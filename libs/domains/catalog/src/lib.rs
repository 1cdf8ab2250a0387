//! Catalog Domain
//!
//! Product catalog queries for a storefront: category listings, keyword search,
//! paginated admin listings, alias (slug) derivation and price formatting.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Service   │  ← Parameter normalization, not-found policy, price formatting
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory and Postgres implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product, category tokens, filters, page requests
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{InMemoryProductRepository, ProductCatalogService};
//!
//! # async fn demo() -> domain_catalog::ProductResult<()> {
//! let service = ProductCatalogService::new(InMemoryProductRepository::new());
//!
//! // Second storefront page of category 4
//! let page = service.list_by_category(2, 4).await?;
//! println!("{} of {} products", page.len(), page.total_items);
//! # Ok(())
//! # }
//! ```

pub mod category;
pub mod config;
pub mod entity;
pub mod error;
pub mod filter;
pub mod models;
pub mod pagination;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod slug;

// Re-export commonly used types
pub use category::{CategoryId, CategoryMatchToken, decode_path, encode_path};
pub use config::CatalogConfig;
pub use error::{ProductError, ProductLookup, ProductResult};
pub use filter::ProductFilter;
pub use models::{Product, Uniqueness};
pub use pagination::{
    PageContext, PageRequest, PageResult, Sort, SortDirection, SortField, build_page,
};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductCatalogService;
