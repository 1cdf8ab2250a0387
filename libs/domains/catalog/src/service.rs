//! Product catalog service - business logic layer

use rand::Rng;
use rand::seq::SliceRandom;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use crate::category::CategoryId;
use crate::config::CatalogConfig;
use crate::error::{ProductError, ProductLookup, ProductResult};
use crate::filter::ProductFilter;
use crate::models::{Product, Uniqueness};
use crate::pagination::{PageContext, PageResult, build_page};
use crate::repository::ProductRepository;
use crate::slug;

/// How many featured products the storefront shows at once.
const FEATURED_SAMPLE_SIZE: usize = 1;

/// Catalog operations used by the storefront and admin pages.
///
/// Normalizes raw caller parameters, delegates retrieval to the repository and
/// decorates every product it returns with a formatted price.
pub struct ProductCatalogService<R: ProductRepository> {
    repository: Arc<R>,
    config: CatalogConfig,
}

impl<R: ProductRepository> ProductCatalogService<R> {
    pub fn new(repository: R) -> Self {
        Self::with_config(repository, CatalogConfig::default())
    }

    pub fn with_config(repository: R, config: CatalogConfig) -> Self {
        Self {
            repository: Arc::new(repository),
            config,
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Storefront listing of one category.
    #[instrument(skip(self))]
    pub async fn list_by_category(
        &self,
        page_num: i64,
        category_id: i32,
    ) -> ProductResult<PageResult<Product>> {
        let category = CategoryId::new(category_id).ok_or_else(|| {
            ProductError::Validation(format!("category id must be positive, got {category_id}"))
        })?;
        let page = build_page(page_num, PageContext::Storefront.page_size(), None, None)?;

        let result = self
            .repository
            .find_page(ProductFilter::InCategory { category }, page)
            .await?;

        Ok(self.decorate_page(result))
    }

    /// Admin listing with optional keyword and category filters.
    #[instrument(skip(self))]
    pub async fn list_by_page(
        &self,
        page_num: i64,
        sort_field: Option<&str>,
        sort_dir: Option<&str>,
        keyword: Option<&str>,
        category_id: Option<i32>,
    ) -> ProductResult<PageResult<Product>> {
        let page = build_page(
            page_num,
            PageContext::Admin.page_size(),
            sort_field,
            sort_dir,
        )?;
        let filter = ProductFilter::from_params(keyword, category_id);
        debug!(?filter, ?page, "Dispatching admin listing");

        let result = self.repository.find_page(filter, page).await?;
        Ok(self.decorate_page(result))
    }

    /// Keyword search across the catalog.
    #[instrument(skip(self))]
    pub async fn search(&self, keyword: &str, page_num: i64) -> ProductResult<PageResult<Product>> {
        let page = build_page(page_num, PageContext::Search.page_size(), None, None)?;
        let filter = ProductFilter::Search {
            keyword: keyword.to_string(),
        };

        let result = self.repository.find_page(filter, page).await?;
        Ok(self.decorate_page(result))
    }

    /// Every product in the catalog. An empty catalog is an error, not an empty list.
    #[instrument(skip(self))]
    pub async fn get_all_products(&self) -> ProductResult<Vec<Product>> {
        let products = self.repository.find_all().await?;

        if products.is_empty() {
            warn!("Catalog has no products");
            return Err(ProductError::NotFound(ProductLookup::Any));
        }

        Ok(self.decorate_all(products))
    }

    /// One product drawn at random from the featured category.
    #[instrument(skip(self))]
    pub async fn get_random_amount_of_products(&self) -> ProductResult<Vec<Product>> {
        let featured = self.config.featured_category;
        let products = self.repository.find_all_in_category(featured).await?;

        if products.is_empty() {
            warn!(category = %featured, "Featured category is empty");
            return Err(ProductError::NotFound(ProductLookup::Category(featured)));
        }

        Ok(self.sample(products, &mut rand::rng()))
    }

    /// Shuffle `products` and keep the first [`FEATURED_SAMPLE_SIZE`].
    pub fn sample<G: Rng + ?Sized>(&self, mut products: Vec<Product>, rng: &mut G) -> Vec<Product> {
        products.shuffle(rng);
        products.truncate(FEATURED_SAMPLE_SIZE);
        self.decorate_all(products)
    }

    /// Derive or normalize the alias, then persist.
    #[instrument(skip(self, product), fields(title = %product.title))]
    pub async fn save_product(&self, mut product: Product) -> ProductResult<()> {
        product.validate()?;

        product.alias = slug::alias_for(&product.title, Some(product.alias.as_str()));
        if product.alias.is_empty() {
            return Err(ProductError::Validation(format!(
                "title '{}' yields an empty alias; supply one explicitly",
                product.title
            )));
        }
        product.formatted_price = Some(self.format_price(product.price));

        let saved = self.repository.save(product).await?;
        info!(product_id = saved.id, alias = %saved.alias, "Product saved");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> ProductResult<Product> {
        let product = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(ProductLookup::Id(id)))?;

        Ok(self.decorate(product))
    }

    #[instrument(skip(self))]
    pub async fn get_product_by_alias(&self, alias: &str) -> ProductResult<Product> {
        let product = self
            .repository
            .find_by_alias(alias)
            .await?
            .ok_or_else(|| ProductError::NotFound(ProductLookup::Alias(alias.to_string())))?;

        Ok(self.decorate(product))
    }

    /// Delete a product that must exist.
    ///
    /// The existence check and the delete are separate store calls; a product
    /// removed concurrently in between also surfaces as `NotFound`.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> ProductResult<()> {
        if self.repository.count_by_id(id).await? == 0 {
            return Err(ProductError::NotFound(ProductLookup::Id(id)));
        }

        if !self.repository.delete_by_id(id).await? {
            warn!(product_id = id, "Product vanished between existence check and delete");
            return Err(ProductError::NotFound(ProductLookup::Id(id)));
        }

        info!(product_id = id, "Product deleted");
        Ok(())
    }

    /// Whether `title` is free for a product being created (`id` absent or 0)
    /// or edited (`id` present).
    #[instrument(skip(self))]
    pub async fn check_unique(&self, id: Option<i32>, title: &str) -> ProductResult<Uniqueness> {
        let existing = self.repository.find_by_title(title).await?;

        let creating_new = matches!(id, None | Some(0));
        let duplicate = match existing {
            None => false,
            Some(_) if creating_new => true,
            Some(found) => Some(found.id) != id,
        };

        Ok(if duplicate {
            Uniqueness::Duplicate
        } else {
            Uniqueness::Unique
        })
    }

    pub fn format_price(&self, price: i64) -> String {
        format!("{price} {}", self.config.currency_symbol)
    }

    fn decorate(&self, mut product: Product) -> Product {
        product.formatted_price = Some(self.format_price(product.price));
        product
    }

    fn decorate_all(&self, products: Vec<Product>) -> Vec<Product> {
        products.into_iter().map(|p| self.decorate(p)).collect()
    }

    fn decorate_page(&self, mut page: PageResult<Product>) -> PageResult<Product> {
        page.for_each_mut(|p| p.formatted_price = Some(self.format_price(p.price)));
        page
    }
}

impl<R: ProductRepository> Clone for ProductCatalogService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            config: self.config.clone(),
        }
    }
}
