use std::fmt;

use thiserror::Error;

use crate::category::CategoryId;

/// What a failed lookup was keyed by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductLookup {
    Id(i32),
    Alias(String),
    /// A category that was required to hold products but is empty
    Category(CategoryId),
    /// The catalog as a whole
    Any,
}

impl fmt::Display for ProductLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductLookup::Id(id) => write!(f, "with id {id}"),
            ProductLookup::Alias(alias) => write!(f, "with alias '{alias}'"),
            ProductLookup::Category(category) => write!(f, "in category {category}"),
            ProductLookup::Any => f.write_str("in the catalog"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Couldn't find any product {0}")]
    NotFound(ProductLookup),

    #[error("Invalid page number {0}: pages start at 1")]
    InvalidPage(i64),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl ProductError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProductError::NotFound(_))
    }
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<sea_orm::DbErr> for ProductError {
    fn from(err: sea_orm::DbErr) -> Self {
        ProductError::Database(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ProductError {
    fn from(err: validator::ValidationErrors) -> Self {
        ProductError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_messages_name_the_key() {
        let by_id = ProductError::NotFound(ProductLookup::Id(7));
        assert_eq!(by_id.to_string(), "Couldn't find any product with id 7");

        let by_alias = ProductError::NotFound(ProductLookup::Alias("red_shoes".into()));
        assert_eq!(
            by_alias.to_string(),
            "Couldn't find any product with alias 'red_shoes'"
        );

        let featured = CategoryId::new(4).unwrap();
        let empty = ProductError::NotFound(ProductLookup::Category(featured));
        assert_eq!(empty.to_string(), "Couldn't find any product in category 4");
        assert!(empty.is_not_found());
    }

    #[test]
    fn test_invalid_page_is_not_a_not_found() {
        let err = ProductError::InvalidPage(0);
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("pages start at 1"));
    }
}
