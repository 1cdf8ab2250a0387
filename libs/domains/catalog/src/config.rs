use core_config::{ConfigError, FromEnv, env_or_default, env_parse};

use crate::category::{CategoryId, DEFAULT_FEATURED_CATEGORY};

pub const DEFAULT_FEATURED_CATEGORY_ID: i32 = DEFAULT_FEATURED_CATEGORY.get();
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₪";

/// Storefront-wide catalog settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Category the storefront draws its random featured product from
    pub featured_category: CategoryId,
    /// Appended to every formatted price
    pub currency_symbol: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            featured_category: DEFAULT_FEATURED_CATEGORY,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

/// Environment variables:
/// - `CATALOG_FEATURED_CATEGORY_ID` (default: 4, must be positive)
/// - `CATALOG_CURRENCY_SYMBOL` (default: `₪`)
impl FromEnv for CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw = env_parse("CATALOG_FEATURED_CATEGORY_ID", DEFAULT_FEATURED_CATEGORY_ID)?;
        let featured_category = CategoryId::new(raw).ok_or_else(|| ConfigError::InvalidValue {
            key: "CATALOG_FEATURED_CATEGORY_ID".to_string(),
            details: format!("category id must be positive, got {raw}"),
        })?;

        Ok(Self {
            featured_category,
            currency_symbol: env_or_default("CATALOG_CURRENCY_SYMBOL", DEFAULT_CURRENCY_SYMBOL),
        })
    }
}
