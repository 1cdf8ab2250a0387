use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

/// Sea-ORM Entity for the products table
///
/// There is no column for the formatted price: it is derived on every read.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(unique)]
    pub alias: String,
    pub price: i64,
    #[sea_orm(column_type = "Text")]
    pub category_path: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            alias: model.alias,
            price: model.price,
            category_path: model.category_path,
            formatted_price: None,
        }
    }
}

impl From<crate::models::Product> for ActiveModel {
    fn from(product: crate::models::Product) -> Self {
        ActiveModel {
            // Let the serial column assign ids to new products
            id: if product.is_new() {
                NotSet
            } else {
                Set(product.id)
            },
            title: Set(product.title),
            alias: Set(product.alias),
            price: Set(product.price),
            category_path: Set(product.category_path),
        }
    }
}
