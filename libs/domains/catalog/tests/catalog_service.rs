//! Service tests over the in-memory repository
//!
//! These exercise the full path from raw caller parameters through filter
//! dispatch, pagination and price decoration.

use domain_catalog::*;
use std::collections::HashSet;

fn catalog() -> ProductCatalogService<InMemoryProductRepository> {
    let products = (1..=12).map(|id| {
        let path = if id % 2 == 0 { "-1-4-" } else { "-1-12-" };
        Product::new(format!("Lamp {id:02}"), i64::from(id) * 10, path)
            .with_id(id)
            .with_alias(format!("lamp_{id:02}"))
    });
    ProductCatalogService::new(InMemoryProductRepository::with_products(products))
}

// ============================================================================
// Listings
// ============================================================================

#[tokio::test]
async fn test_list_by_category_decorates_prices() {
    let repo = InMemoryProductRepository::with_products([
        Product::new("A", 100, "-2-").with_id(1).with_alias("a"),
        Product::new("B", 200, "-3-").with_id(2).with_alias("b"),
    ]);
    let service = ProductCatalogService::new(repo);

    let page = service.list_by_category(1, 2).await.unwrap();

    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].id, 1);
    assert_eq!(page.items[0].formatted_price.as_deref(), Some("100 ₪"));
}

#[tokio::test]
async fn test_category_filter_does_not_match_longer_ids() {
    let service = catalog();

    // Every product sits in category 1; only odd ids sit in 12
    let in_twelve = service.list_by_category(1, 12).await.unwrap();
    assert_eq!(in_twelve.total_items, 6);
    assert!(in_twelve.iter().all(|p| p.id % 2 == 1));

    let in_two = service.list_by_category(1, 2).await.unwrap();
    assert_eq!(in_two.total_items, 0);
    assert!(in_two.is_empty());
}

#[tokio::test]
async fn test_storefront_pages_hold_ten_products() {
    let service = catalog();

    let first = service.list_by_category(1, 1).await.unwrap();
    assert_eq!(first.len(), 10);
    assert_eq!(first.total_pages(), 2);

    let second = service.list_by_category(2, 1).await.unwrap();
    let ids: Vec<i32> = second.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![11, 12]);
}

#[tokio::test]
async fn test_list_by_page_dispatch() {
    let service = catalog();

    let all = service.list_by_page(1, None, None, None, None).await.unwrap();
    assert_eq!(all.total_items, 12);
    assert_eq!(all.len(), 5);

    let in_category = service
        .list_by_page(1, None, None, None, Some(4))
        .await
        .unwrap();
    assert_eq!(in_category.total_items, 6);

    let search = service
        .list_by_page(1, None, None, Some("lamp 1"), None)
        .await
        .unwrap();
    assert_eq!(search.total_items, 3);

    let both = service
        .list_by_page(1, None, None, Some("lamp 1"), Some(4))
        .await
        .unwrap();
    let ids: Vec<i32> = both.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![10, 12]);
}

#[tokio::test]
async fn test_list_by_page_treats_empty_keyword_and_zero_category_as_absent() {
    let service = catalog();

    let page = service
        .list_by_page(1, None, None, Some(""), Some(0))
        .await
        .unwrap();
    assert_eq!(page.total_items, 12);
}

#[tokio::test]
async fn test_list_by_page_sorting() {
    let service = catalog();

    let page = service
        .list_by_page(1, Some("price"), Some("asc"), None, None)
        .await
        .unwrap();
    let prices: Vec<i64> = page.iter().map(|p| p.price).collect();
    assert_eq!(prices, vec![10, 20, 30, 40, 50]);

    // Anything other than the literal "asc" sorts descending
    let page = service
        .list_by_page(1, Some("price"), Some("ASC"), None, None)
        .await
        .unwrap();
    assert_eq!(page.items[0].price, 120);

    let err = service
        .list_by_page(1, Some("colour"), None, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, ProductError::Validation(_)));
}

#[tokio::test]
async fn test_page_number_too_large_for_an_offset_is_rejected() {
    let service = catalog();

    assert!(matches!(
        service.list_by_page(i64::MAX, None, None, None, None).await,
        Err(ProductError::InvalidPage(i64::MAX))
    ));
    assert!(matches!(
        service.search("lamp", i64::MAX).await,
        Err(ProductError::InvalidPage(i64::MAX))
    ));
}

#[tokio::test]
async fn test_search_pages_hold_ten_results() {
    let service = catalog();

    let page = service.search("lamp", 1).await.unwrap();
    assert_eq!(page.total_items, 12);
    assert_eq!(page.len(), 10);
    assert_eq!(page.page_size, 10);

    assert!(matches!(
        service.search("lamp", 0).await,
        Err(ProductError::InvalidPage(0))
    ));
}

// ============================================================================
// Lookups
// ============================================================================

#[tokio::test]
async fn test_lookups_by_id_and_alias() {
    let service = catalog();

    let by_id = service.get_product(3).await.unwrap();
    assert_eq!(by_id.alias, "lamp_03");
    assert_eq!(by_id.formatted_price.as_deref(), Some("30 ₪"));

    let by_alias = service.get_product_by_alias("lamp_03").await.unwrap();
    assert_eq!(by_alias, by_id);

    assert!(matches!(
        service.get_product(99).await,
        Err(ProductError::NotFound(ProductLookup::Id(99)))
    ));
    assert!(matches!(
        service.get_product_by_alias("nope").await,
        Err(ProductError::NotFound(ProductLookup::Alias(_)))
    ));
}

#[tokio::test]
async fn test_empty_catalog_is_not_found() {
    let service = ProductCatalogService::new(InMemoryProductRepository::new());

    assert!(matches!(
        service.get_all_products().await,
        Err(ProductError::NotFound(ProductLookup::Any))
    ));
    assert!(matches!(
        service.get_random_amount_of_products().await,
        Err(ProductError::NotFound(ProductLookup::Category(_)))
    ));
}

#[tokio::test]
async fn test_get_all_products_is_ordered_and_decorated() {
    let service = catalog();

    let all = service.get_all_products().await.unwrap();
    assert_eq!(all.len(), 12);
    assert_eq!(all[0].id, 1);
    assert!(all.iter().all(|p| p.formatted_price.is_some()));
}

#[tokio::test]
async fn test_random_pick_comes_from_featured_category() {
    let service = catalog();
    let mut seen = HashSet::new();

    for _ in 0..200 {
        let picked = service.get_random_amount_of_products().await.unwrap();
        assert_eq!(picked.len(), 1);
        assert!(picked[0].in_category(CategoryId::new(4).unwrap()));
        seen.insert(picked[0].id);
    }

    // Six candidates; 200 draws that always pick the same one would be a broken shuffle
    assert!(seen.len() > 1);
}

// ============================================================================
// Mutations
// ============================================================================

#[tokio::test]
async fn test_save_generates_alias_from_title() {
    let service = ProductCatalogService::new(InMemoryProductRepository::new());

    service
        .save_product(Product::new("Red Shoes", 100, "-4-"))
        .await
        .unwrap();
    service
        .save_product(Product::new("Чорна сумка", 250, "-4-"))
        .await
        .unwrap();

    let shoes = service.get_product_by_alias("red_shoes").await.unwrap();
    assert_eq!(shoes.id, 1);
    let bag = service.get_product_by_alias("chorna_sumka").await.unwrap();
    assert_eq!(bag.formatted_price.as_deref(), Some("250 ₪"));
}

#[tokio::test]
async fn test_save_updates_existing_product() {
    let service = catalog();

    let mut product = service.get_product(2).await.unwrap();
    product.title = "Bright Lamp".to_string();
    product.price = 999;
    service.save_product(product).await.unwrap();

    let updated = service.get_product(2).await.unwrap();
    assert_eq!(updated.title, "Bright Lamp");
    assert_eq!(updated.alias, "lamp_02");
    assert_eq!(updated.formatted_price.as_deref(), Some("999 ₪"));
}

#[tokio::test]
async fn test_delete_product() {
    let service = catalog();

    service.delete_product(5).await.unwrap();
    assert!(service.get_product(5).await.unwrap_err().is_not_found());
    assert!(service.delete_product(5).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_check_unique() {
    let service = catalog();

    assert_eq!(
        service.check_unique(None, "Lamp 01").await.unwrap(),
        Uniqueness::Duplicate
    );
    assert_eq!(
        service.check_unique(Some(1), "Lamp 01").await.unwrap(),
        Uniqueness::Unique
    );
    assert_eq!(
        service.check_unique(Some(2), "Lamp 01").await.unwrap(),
        Uniqueness::Duplicate
    );
    assert_eq!(
        service.check_unique(None, "Sofa").await.unwrap(),
        Uniqueness::Unique
    );
}

#[tokio::test]
async fn test_custom_currency_symbol() {
    let config = CatalogConfig {
        currency_symbol: "€".to_string(),
        ..CatalogConfig::default()
    };
    let service =
        ProductCatalogService::with_config(InMemoryProductRepository::new(), config);

    assert_eq!(service.format_price(42), "42 €");
}
