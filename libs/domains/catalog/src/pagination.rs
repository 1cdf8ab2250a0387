//! Page requests and page results.
//!
//! Callers speak in 1-based page numbers; stores want a zero-based page index
//! and a row offset. Page sizes are fixed per calling context.

use serde::Serialize;
use std::str::FromStr;
use strum::{Display, EnumString};

use crate::error::{ProductError, ProductResult};

pub const PRODUCTS_PER_PAGE: u64 = 10;
pub const SEARCH_RESULTS_PER_PAGE: u64 = 10;
pub const PRODUCTS_PER_ADMIN_PAGE: u64 = 5;

/// The caller a page is built for; each has its own fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageContext {
    Storefront,
    Search,
    Admin,
}

impl PageContext {
    pub fn page_size(self) -> u64 {
        match self {
            PageContext::Storefront => PRODUCTS_PER_PAGE,
            PageContext::Search => SEARCH_RESULTS_PER_PAGE,
            PageContext::Admin => PRODUCTS_PER_ADMIN_PAGE,
        }
    }
}

/// Sortable product columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum SortField {
    Id,
    Title,
    Alias,
    Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Only the exact literal `"asc"` sorts ascending; anything else, including
    /// no value at all, sorts descending.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

/// A validated, zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page_index: u64,
    pub page_size: u64,
    /// `None` leaves ordering to the store, which orders by id ascending
    pub sort: Option<Sort>,
}

impl PageRequest {
    /// Number of rows to skip. [`build_page`] guarantees this fits in a `u64`.
    pub fn offset(&self) -> u64 {
        self.page_index.saturating_mul(self.page_size)
    }
}

/// Turn a caller's 1-based page number and raw sort parameters into a [`PageRequest`].
pub fn build_page(
    page_num: i64,
    page_size: u64,
    sort_field: Option<&str>,
    sort_dir: Option<&str>,
) -> ProductResult<PageRequest> {
    if page_num < 1 {
        return Err(ProductError::InvalidPage(page_num));
    }
    if page_size == 0 {
        return Err(ProductError::Validation(
            "page size must be positive".to_string(),
        ));
    }

    let sort = match sort_field {
        Some(raw) => {
            let field = SortField::from_str(raw).map_err(|_| {
                ProductError::Validation(format!("cannot sort products by '{raw}'"))
            })?;
            Some(Sort {
                field,
                direction: SortDirection::from_param(sort_dir),
            })
        }
        None => None,
    };

    let page_index = (page_num - 1) as u64;
    if page_index.checked_mul(page_size).is_none() {
        return Err(ProductError::InvalidPage(page_num));
    }

    Ok(PageRequest {
        page_index,
        page_size,
        sort,
    })
}

/// One page of results plus the totals needed to render pagination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub page_index: u64,
    pub page_size: u64,
    pub total_items: u64,
}

impl<T> PageResult<T> {
    pub fn new(items: Vec<T>, request: &PageRequest, total_items: u64) -> Self {
        Self {
            items,
            page_index: request.page_index,
            page_size: request.page_size,
            total_items,
        }
    }

    /// 1-based page number, as callers count pages.
    pub fn page_number(&self) -> u64 {
        self.page_index + 1
    }

    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_items.div_ceil(self.page_size)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn for_each_mut(&mut self, f: impl FnMut(&mut T)) {
        self.items.iter_mut().for_each(f);
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            page_index: self.page_index,
            page_size: self.page_size,
            total_items: self.total_items,
        }
    }
}
