use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::{Validate, ValidationError};

use crate::category::{CategoryId, decode_path};

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::new("blank_title"));
    }
    Ok(())
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Product {
    /// Stable identity; `0` for a product that has not been saved yet
    #[serde(default)]
    pub id: i32,
    #[validate(length(min = 1, max = 255), custom(function = "validate_title"))]
    pub title: String,
    /// URL-safe slug, unique across the catalog
    #[serde(default)]
    pub alias: String,
    /// Price in minor units
    #[validate(range(min = 0))]
    pub price: i64,
    /// Concatenated `-<id>-` membership tokens
    #[serde(default)]
    pub category_path: String,
    /// Display price, recomputed on every read and never stored
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub formatted_price: Option<String>,
}

impl Product {
    pub fn new(title: impl Into<String>, price: i64, category_path: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            alias: String::new(),
            price,
            category_path: category_path.into(),
            formatted_price: None,
        }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    pub fn is_new(&self) -> bool {
        self.id == 0
    }

    pub fn categories(&self) -> Vec<CategoryId> {
        decode_path(&self.category_path)
    }

    pub fn in_category(&self, category: CategoryId) -> bool {
        category.token().matches(&self.category_path)
    }
}

/// Outcome of a title uniqueness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum Uniqueness {
    #[strum(serialize = "OK")]
    #[serde(rename = "OK")]
    Unique,
    Duplicate,
}
