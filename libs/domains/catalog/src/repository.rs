use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::category::CategoryId;
use crate::error::{ProductError, ProductLookup, ProductResult};
use crate::filter::ProductFilter;
use crate::models::Product;
use crate::pagination::{PageRequest, PageResult, SortDirection, SortField};

/// Repository trait for Product persistence
///
/// Implementations own storage only. Formatting, alias derivation and the
/// not-found policy live in the service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// One page of products selected by `filter`
    async fn find_page(
        &self,
        filter: ProductFilter,
        page: PageRequest,
    ) -> ProductResult<PageResult<Product>>;

    /// Every product, ordered by id
    async fn find_all(&self) -> ProductResult<Vec<Product>>;

    /// Every product in a category, ordered by id
    async fn find_all_in_category(&self, category: CategoryId) -> ProductResult<Vec<Product>>;

    async fn find_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    async fn find_by_alias(&self, alias: &str) -> ProductResult<Option<Product>>;

    async fn find_by_title(&self, title: &str) -> ProductResult<Option<Product>>;

    /// Number of products with this id (0 or 1)
    async fn count_by_id(&self, id: i32) -> ProductResult<u64>;

    /// Returns whether a row was deleted
    async fn delete_by_id(&self, id: i32) -> ProductResult<bool>;

    /// Insert when `product.id == 0`, otherwise update; returns the stored product
    async fn save(&self, product: Product) -> ProductResult<Product>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<BTreeMap<i32, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with products that already carry ids.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let products = products
            .into_iter()
            .map(|mut p| {
                p.formatted_price = None;
                (p.id, p)
            })
            .collect();
        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }
}

fn compare(a: &Product, b: &Product, field: SortField) -> std::cmp::Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Title => a.title.cmp(&b.title),
        SortField::Alias => a.alias.cmp(&b.alias),
        SortField::Price => a.price.cmp(&b.price),
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_page(
        &self,
        filter: ProductFilter,
        page: PageRequest,
    ) -> ProductResult<PageResult<Product>> {
        let products = self.products.read().await;

        // BTreeMap iteration is id-ascending, the default order
        let mut matched: Vec<Product> = products
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();

        if let Some(sort) = page.sort {
            matched.sort_by(|a, b| {
                let ordering = compare(a, b, sort.field).then_with(|| a.id.cmp(&b.id));
                match sort.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        let total = matched.len() as u64;
        let items = matched
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.page_size as usize)
            .collect();

        Ok(PageResult::new(items, &page, total))
    }

    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products.values().cloned().collect())
    }

    async fn find_all_in_category(&self, category: CategoryId) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products
            .values()
            .filter(|p| p.in_category(category))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn find_by_alias(&self, alias: &str) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.values().find(|p| p.alias == alias).cloned())
    }

    async fn find_by_title(&self, title: &str) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.values().find(|p| p.title == title).cloned())
    }

    async fn count_by_id(&self, id: i32) -> ProductResult<u64> {
        let products = self.products.read().await;
        Ok(u64::from(products.contains_key(&id)))
    }

    async fn delete_by_id(&self, id: i32) -> ProductResult<bool> {
        let mut products = self.products.write().await;

        if products.remove(&id).is_some() {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn save(&self, mut product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;

        // Aliases are unique; mirror the store's unique index
        let alias_taken = products
            .values()
            .any(|p| p.alias == product.alias && p.id != product.id);
        if alias_taken {
            return Err(ProductError::Database(format!(
                "duplicate key value violates unique constraint on alias '{}'",
                product.alias
            )));
        }

        if product.is_new() {
            product.id = match products.keys().next_back() {
                None => 1,
                Some(last) => last.checked_add(1).ok_or_else(|| {
                    ProductError::Database("product id sequence exhausted".to_string())
                })?,
            };
        } else if !products.contains_key(&product.id) {
            return Err(ProductError::NotFound(ProductLookup::Id(product.id)));
        }

        product.formatted_price = None;
        products.insert(product.id, product.clone());

        tracing::info!(product_id = product.id, alias = %product.alias, "Saved product");
        Ok(product)
    }
}
