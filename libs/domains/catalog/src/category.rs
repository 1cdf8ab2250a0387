//! Category membership encoding.
//!
//! A product's `category_path` stores every category it belongs to (its own
//! and all ancestors) as delimiter-wrapped ids sharing their delimiters:
//! `-1-4-12-`. Membership in category `n` is a substring test for `-n-`; the
//! delimiters on both sides keep `-1-` from matching inside `-12-`.

use std::fmt;

const DELIMITER: char = '-';

/// Category the storefront features when nothing else is configured.
pub const DEFAULT_FEATURED_CATEGORY: CategoryId = CategoryId(4);

/// A valid (strictly positive) category id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(i32);

impl CategoryId {
    /// Returns `None` for ids `<= 0`, which callers use to mean "no category filter".
    pub fn new(raw: i32) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }

    /// Folds the nullable form used by callers: absent and non-positive ids both mean "none".
    pub fn from_param(raw: Option<i32>) -> Option<Self> {
        raw.and_then(Self::new)
    }

    pub const fn get(self) -> i32 {
        self.0
    }

    pub fn token(self) -> CategoryMatchToken {
        CategoryMatchToken(format!("{DELIMITER}{}{DELIMITER}", self.0))
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The `-<id>-` form of a category id, tested for containment in a category path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CategoryMatchToken(String);

impl CategoryMatchToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, category_path: &str) -> bool {
        category_path.contains(self.0.as_str())
    }
}

impl fmt::Display for CategoryMatchToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encode memberships as a category path: `[1, 4, 12]` becomes `-1-4-12-`.
pub fn encode_path(categories: &[CategoryId]) -> String {
    if categories.is_empty() {
        return String::new();
    }

    let mut path = String::from(DELIMITER);
    for category in categories {
        path.push_str(&category.0.to_string());
        path.push(DELIMITER);
    }
    path
}

/// Decode a category path back into ids.
///
/// Fragments that are not canonical positive integers (empty, signed, or with
/// leading zeros) can never be matched by a token and are skipped.
pub fn decode_path(category_path: &str) -> Vec<CategoryId> {
    category_path
        .split(DELIMITER)
        .filter(|fragment| is_canonical(fragment))
        .filter_map(|fragment| fragment.parse().ok().and_then(CategoryId::new))
        .collect()
}

fn is_canonical(fragment: &str) -> bool {
    !fragment.is_empty()
        && !fragment.starts_with('0')
        && fragment.bytes().all(|b| b.is_ascii_digit())
}
