use crate::category::CategoryId;
use crate::models::Product;

/// What a listing query selects.
///
/// Exactly one variant applies to any combination of keyword and category, so
/// repositories match on it exhaustively instead of chaining optional filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductFilter {
    /// Keyword match restricted to a category
    SearchInCategory {
        keyword: String,
        category: CategoryId,
    },
    /// Keyword match across the catalog
    Search { keyword: String },
    /// Every product in a category
    InCategory { category: CategoryId },
    /// Every product
    All,
}

impl ProductFilter {
    /// Dispatch raw parameters to a filter.
    ///
    /// A keyword counts when it is present and non-empty. A category counts when
    /// it is present and positive; `0` and negative ids mean "no category".
    pub fn from_params(keyword: Option<&str>, category_id: Option<i32>) -> Self {
        let keyword = keyword.filter(|k| !k.is_empty());
        let category = CategoryId::from_param(category_id);

        match (keyword, category) {
            (Some(keyword), Some(category)) => ProductFilter::SearchInCategory {
                keyword: keyword.to_string(),
                category,
            },
            (Some(keyword), None) => ProductFilter::Search {
                keyword: keyword.to_string(),
            },
            (None, Some(category)) => ProductFilter::InCategory { category },
            (None, None) => ProductFilter::All,
        }
    }

    pub fn keyword(&self) -> Option<&str> {
        match self {
            ProductFilter::SearchInCategory { keyword, .. } | ProductFilter::Search { keyword } => {
                Some(keyword.as_str())
            }
            ProductFilter::InCategory { .. } | ProductFilter::All => None,
        }
    }

    pub fn category(&self) -> Option<CategoryId> {
        match self {
            ProductFilter::SearchInCategory { category, .. }
            | ProductFilter::InCategory { category } => Some(*category),
            ProductFilter::Search { .. } | ProductFilter::All => None,
        }
    }

    /// Reference predicate for stores that filter in memory.
    ///
    /// Keywords match case-insensitively against the title or the alias.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            ProductFilter::SearchInCategory { keyword, category } => {
                product.in_category(*category) && keyword_matches(keyword, product)
            }
            ProductFilter::Search { keyword } => keyword_matches(keyword, product),
            ProductFilter::InCategory { category } => product.in_category(*category),
            ProductFilter::All => true,
        }
    }
}

fn keyword_matches(keyword: &str, product: &Product) -> bool {
    let needle = keyword.to_lowercase();
    product.title.to_lowercase().contains(&needle) || product.alias.to_lowercase().contains(&needle)
}
