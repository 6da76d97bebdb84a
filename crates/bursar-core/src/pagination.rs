//! Page-based pagination.
//!
//! Listing endpoints accept `page` and `per_page` query parameters and answer
//! with a [`Paginated`] envelope:
//!
//! ```json
//! { "page": 2, "total_pages": 3, "data": [...] }
//! ```
//!
//! `total_pages` is computed from a separate count of every matching row,
//! so it stays correct regardless of which page is requested.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Rows per page when the caller gives none, zero, or a negative value.
pub const DEFAULT_PER_PAGE: i64 = 10;

/// Upper bound applied to `per_page` at the HTTP layer.
pub const MAX_PER_PAGE: i64 = 100;

/// Deserializes an optional string into an optional i64.
///
/// Handles the case where query parameters may be empty strings,
/// which should be treated as `None`.
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Normalizes a requested page number: anything below 1 becomes 1.
#[must_use]
pub fn effective_page(page: i64) -> i64 {
    page.max(1)
}

/// Normalizes a requested page size: zero or negative becomes [`DEFAULT_PER_PAGE`].
#[must_use]
pub fn effective_per_page(per_page: i64) -> i64 {
    if per_page <= 0 {
        DEFAULT_PER_PAGE
    } else {
        per_page
    }
}

/// `ceil(total / per_page)`, with `per_page` normalized first.
#[must_use]
pub fn total_pages(total: i64, per_page: i64) -> i64 {
    let per_page = effective_per_page(per_page);
    if total <= 0 {
        0
    } else {
        total / per_page + i64::from(total % per_page != 0)
    }
}

/// Rows to skip before `page`, or `None` if that is beyond `i64`.
#[must_use]
pub fn page_offset(page: i64, per_page: i64) -> Option<i64> {
    (effective_page(page) - 1).checked_mul(effective_per_page(per_page))
}

/// Query parameters for page-based pagination.
///
/// # Example
///
/// ```ignore
/// // GET /api/v1/accounts?page=3&per_page=20
/// let params = PaginationParams { page: Some(3), per_page: Some(20) };
///
/// assert_eq!(params.page(), 3);
/// assert_eq!(params.per_page(), 20);
/// ```
#[derive(Debug, Clone, Default, Hash, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    /// Rows per page (default: 10, max: 100)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub per_page: Option<i64>,
}

impl PaginationParams {
    /// Returns the effective page number, clamped to a minimum of 1.
    #[must_use]
    pub fn page(&self) -> i64 {
        effective_page(self.page.unwrap_or(1))
    }

    /// Returns the effective page size, clamped to [`MAX_PER_PAGE`].
    #[must_use]
    pub fn per_page(&self) -> i64 {
        effective_per_page(self.per_page.unwrap_or(DEFAULT_PER_PAGE)).min(MAX_PER_PAGE)
    }
}

/// One page of results plus the page count for the whole filtered set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Paginated<T> {
    pub page: i64,
    pub total_pages: i64,
    pub data: Vec<T>,
}

impl<T> Paginated<T> {
    /// Converts every row while keeping the page metadata.
    pub fn map<U, F>(self, f: F) -> Paginated<U>
    where
        F: FnMut(T) -> U,
    {
        Paginated {
            page: self.page,
            total_pages: self.total_pages,
            data: self.data.into_iter().map(f).collect(),
        }
    }
}
