//! Configuration for the catalog command line

use core_config::{ConfigError, FromEnv};
use database::postgres::PostgresConfig;
use domain_catalog::CatalogConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub database: PostgresConfig,
    pub catalog: CatalogConfig,
}

impl FromEnv for Config {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database: PostgresConfig::from_env()?,
            catalog: CatalogConfig::from_env()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url_is_required() {
        temp_env::with_var_unset("DATABASE_URL", || {
            let err = Config::from_env().unwrap_err();
            assert!(matches!(err, ConfigError::MissingEnvVar(key) if key == "DATABASE_URL"));
        });
    }

    #[test]
    fn test_loads_both_sections() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("postgres://localhost/catalog")),
                ("CATALOG_FEATURED_CATEGORY_ID", Some("7")),
                ("CATALOG_CURRENCY_SYMBOL", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.database.url(), "postgres://localhost/catalog");
                assert_eq!(config.catalog.featured_category.get(), 7);
                assert_eq!(config.catalog.currency_symbol, "₪");
            },
        );
    }
}
