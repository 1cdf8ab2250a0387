use async_trait::async_trait;
use sea_orm::sea_query::LikeExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};

use crate::{
    category::CategoryId,
    entity,
    error::{ProductError, ProductLookup, ProductResult},
    filter::ProductFilter,
    models::Product,
    pagination::{PageRequest, PageResult, Sort, SortDirection, SortField},
    repository::ProductRepository,
};

pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Base query for a filter. Category membership compiles to
/// `category_path LIKE '%-<id>-%'`.
pub(crate) fn filtered(filter: &ProductFilter) -> Select<entity::Entity> {
    let query = entity::Entity::find();

    match filter {
        ProductFilter::SearchInCategory { keyword, category } => query
            .filter(keyword_condition(keyword))
            .filter(category_condition(*category)),
        ProductFilter::Search { keyword } => query.filter(keyword_condition(keyword)),
        ProductFilter::InCategory { category } => query.filter(category_condition(*category)),
        ProductFilter::All => query,
    }
}

const LIKE_ESCAPE: char = '\\';

/// Escape `LIKE` metacharacters so the keyword matches literally.
pub(crate) fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for ch in keyword.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

/// Case-insensitive literal substring match on title or alias, the same
/// semantics as [`ProductFilter::matches`].
fn keyword_condition(keyword: &str) -> Condition {
    let pattern = || LikeExpr::new(format!("%{}%", escape_like(keyword))).escape(LIKE_ESCAPE);

    Condition::any()
        .add(entity::Column::Title.ilike(pattern()))
        .add(entity::Column::Alias.ilike(pattern()))
}

fn category_condition(category: CategoryId) -> Condition {
    Condition::all().add(entity::Column::CategoryPath.contains(category.token().as_str()))
}

fn column_for(field: SortField) -> entity::Column {
    match field {
        SortField::Id => entity::Column::Id,
        SortField::Title => entity::Column::Title,
        SortField::Alias => entity::Column::Alias,
        SortField::Price => entity::Column::Price,
    }
}

fn order_for(direction: SortDirection) -> Order {
    match direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    }
}

fn ordered(query: Select<entity::Entity>, sort: Option<Sort>) -> Select<entity::Entity> {
    match sort {
        // id breaks ties so pages never overlap
        Some(sort) => query
            .order_by(column_for(sort.field), order_for(sort.direction))
            .order_by(entity::Column::Id, order_for(sort.direction)),
        None => query.order_by_asc(entity::Column::Id),
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_page(
        &self,
        filter: ProductFilter,
        page: PageRequest,
    ) -> ProductResult<PageResult<Product>> {
        let query = filtered(&filter);
        let total = query.clone().count(&self.db).await?;

        let models = ordered(query, page.sort)
            .offset(page.offset())
            .limit(page.page_size)
            .all(&self.db)
            .await?;

        let items = models.into_iter().map(Into::into).collect();
        Ok(PageResult::new(items, &page, total))
    }

    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_all_in_category(&self, category: CategoryId) -> ProductResult<Vec<Product>> {
        let models = filtered(&ProductFilter::InCategory { category })
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn find_by_alias(&self, alias: &str) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Alias.eq(alias))
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_by_title(&self, title: &str) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Title.eq(title))
            .order_by_asc(entity::Column::Id)
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn count_by_id(&self, id: i32) -> ProductResult<u64> {
        let count = entity::Entity::find_by_id(id).count(&self.db).await?;
        Ok(count)
    }

    async fn delete_by_id(&self, id: i32) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn save(&self, product: Product) -> ProductResult<Product> {
        let id = product.id;
        let is_new = product.is_new();
        let active_model: entity::ActiveModel = product.into();

        let model = if is_new {
            active_model.insert(&self.db).await?
        } else {
            active_model.update(&self.db).await.map_err(|e| match e {
                DbErr::RecordNotUpdated => ProductError::NotFound(ProductLookup::Id(id)),
                other => other.into(),
            })?
        };

        tracing::info!(product_id = model.id, alias = %model.alias, "Saved product");
        Ok(model.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::build_page;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, QueryTrait, Value};
    use std::collections::BTreeMap;

    fn sql_for(filter: &ProductFilter) -> String {
        filtered(filter).build(DatabaseBackend::Postgres).to_string()
    }

    fn lamp() -> entity::Model {
        entity::Model {
            id: 1,
            title: "Desk Lamp".to_string(),
            alias: "desk_lamp".to_string(),
            price: 300,
            category_path: "-1-12-".to_string(),
        }
    }

    #[test]
    fn test_category_filter_uses_delimited_token() {
        let filter = ProductFilter::from_params(None, Some(12));
        let sql = sql_for(&filter);
        assert!(sql.contains("LIKE"), "{sql}");
        assert!(sql.contains("%-12-%"), "{sql}");
        assert!(!sql.contains("%12%"), "{sql}");
    }

    #[test]
    fn test_search_in_category_combines_both_conditions() {
        let filter = ProductFilter::from_params(Some("lamp"), Some(4));
        let sql = sql_for(&filter);
        assert!(sql.contains("%lamp%"), "{sql}");
        assert!(sql.contains("%-4-%"), "{sql}");
        assert!(sql.contains(" OR "), "{sql}");
        assert!(sql.contains(" AND "), "{sql}");
    }

    #[test]
    fn test_keyword_wildcards_are_escaped() {
        let sql = sql_for(&ProductFilter::from_params(Some("red_shoes"), None));
        assert!(sql.contains("ILIKE"), "{sql}");
        assert!(sql.contains("ESCAPE"), "{sql}");
        assert!(!sql.contains("%red_shoes%"), "{sql}");

        let sql = sql_for(&ProductFilter::from_params(Some("50%"), None));
        assert!(!sql.contains("%50%%"), "{sql}");
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("lamp"), "lamp");
        assert_eq!(escape_like("red_shoes"), r"red\_shoes");
        assert_eq!(escape_like(r"50%\off"), r"50\%\\off");
    }

    #[test]
    fn test_unfiltered_listing_has_no_where_clause() {
        let sql = sql_for(&ProductFilter::All);
        assert!(!sql.contains("WHERE"), "{sql}");
    }

    #[test]
    fn test_sort_falls_back_to_id() {
        let sql = ordered(filtered(&ProductFilter::All), None)
            .build(DatabaseBackend::Postgres)
            .to_string();
        assert!(sql.contains(r#"ORDER BY "products"."id" ASC"#), "{sql}");
    }

    #[tokio::test]
    async fn test_find_by_alias_maps_model() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![lamp()]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let product = repo.find_by_alias("desk_lamp").await.unwrap().unwrap();
        assert_eq!(product.id, 1);
        assert_eq!(product.category_path, "-1-12-");
        assert_eq!(product.formatted_price, None);
    }

    #[tokio::test]
    async fn test_find_page_counts_then_fetches() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([(
                "num_items".to_string(),
                Value::from(11i64),
            )])]])
            .append_query_results([vec![lamp()]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let page = build_page(3, 5, None, None).unwrap();
        let result = repo
            .find_page(ProductFilter::from_params(None, Some(12)), page)
            .await
            .unwrap();

        assert_eq!(result.total_items, 11);
        assert_eq!(result.total_pages(), 3);
        assert_eq!(result.items.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_reports_missing_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let repo = PgProductRepository::new(db);

        assert!(!repo.delete_by_id(42).await.unwrap());
    }
}
