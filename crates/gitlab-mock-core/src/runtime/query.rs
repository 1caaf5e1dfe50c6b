// crates/gitlab-mock-core/src/runtime/query.rs
// ============================================================================
// Module: Query Engine
// Description: Filter, sort, and paginate collections like the GitLab API.
// Purpose: Reproduce query-parameter semantics with statically typed sort keys.
// Dependencies: crate::core, crate::runtime::store, serde
// ============================================================================

//! ## Overview
//! [`apply`] runs filter -> stable sort -> skip over borrowed items. Sort keys
//! are enums implementing [`SortKey`], never field names looked up at runtime.
//!
//! Pagination only skips: `(max(page, 1) - 1) * per_page` leading items are
//! dropped and the tail is returned whole. Callers that need exactly one page
//! truncate to `per_page` themselves.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use crate::core::MockError;
use crate::runtime::store::Release;
use crate::runtime::store::User;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Page size used when a page is requested without `per_page`.
pub const DEFAULT_PER_PAGE: i64 = 20;

// ============================================================================
// SECTION: Plan Types
// ============================================================================

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest key first.
    Ascending,
    /// Largest key first.
    Descending,
}

impl SortDirection {
    /// Parses a `sort` parameter; unrecognised or absent values use `default`.
    #[must_use]
    pub fn from_param(value: Option<&str>, default: Self) -> Self {
        match value {
            Some("asc") => Self::Ascending,
            Some("desc") => Self::Descending,
            _ => default,
        }
    }
}

/// Page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index; values below one are treated as the first page.
    pub page: i64,
    /// Page size; values below zero skip nothing.
    pub per_page: i64,
}

impl Pagination {
    /// Builds a pagination from optional parameters; `None` when no page was requested.
    #[must_use]
    pub fn from_params(page: Option<i64>, per_page: Option<i64>) -> Option<Self> {
        page.map(|page| Self {
            page,
            per_page: per_page.unwrap_or(DEFAULT_PER_PAGE),
        })
    }

    /// Returns how many leading items are skipped.
    #[must_use]
    pub fn skip_count(&self) -> usize {
        let pages_before = self.page.max(1) - 1;
        let skipped = pages_before.saturating_mul(self.per_page.max(0));
        usize::try_from(skipped).unwrap_or(usize::MAX)
    }
}

/// Comparator selected by a tagged sort key.
pub trait SortKey<T> {
    /// Compares two items in ascending key order.
    fn compare(&self, left: &T, right: &T) -> Ordering;
}

/// Resolved query plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan<K> {
    /// Sort key and direction; `None` keeps insertion order.
    pub order: Option<(K, SortDirection)>,
    /// Page selection; `None` returns everything.
    pub pagination: Option<Pagination>,
}

impl<K> QueryPlan<K> {
    /// Plan that returns items untouched.
    #[must_use]
    pub const fn passthrough() -> Self {
        Self {
            order: None,
            pagination: None,
        }
    }
}

// ============================================================================
// SECTION: Engine
// ============================================================================

/// Applies filter, sort, and skip to a collection.
///
/// Sorting is stable in both directions: descending order uses a reversed
/// comparator, so items with equal keys keep their input order.
pub fn apply<'a, T, K>(
    items: impl IntoIterator<Item = &'a T>,
    plan: &QueryPlan<K>,
    predicate: impl Fn(&T) -> bool,
) -> Vec<&'a T>
where
    T: 'a,
    K: SortKey<T>,
{
    let mut selected: Vec<&'a T> = items.into_iter().filter(|item| predicate(item)).collect();
    if let Some((key, direction)) = &plan.order {
        match direction {
            SortDirection::Ascending => selected.sort_by(|left, right| key.compare(left, right)),
            SortDirection::Descending => selected.sort_by(|left, right| key.compare(right, left)),
        }
    }
    match plan.pagination {
        Some(pagination) => selected.into_iter().skip(pagination.skip_count()).collect(),
        None => selected,
    }
}

// ============================================================================
// SECTION: Release Queries
// ============================================================================

/// Release sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOrderKey {
    /// Order by creation instant.
    CreatedAt,
    /// Order by publication instant.
    ReleasedAt,
}

impl ReleaseOrderKey {
    /// Parses an `order_by` parameter: `created_at`, otherwise `released_at`.
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("created_at") => Self::CreatedAt,
            _ => Self::ReleasedAt,
        }
    }
}

impl SortKey<Release> for ReleaseOrderKey {
    fn compare(&self, left: &Release, right: &Release) -> Ordering {
        match self {
            Self::CreatedAt => left.created_at().cmp(&right.created_at()),
            Self::ReleasedAt => left.released_at().cmp(&right.released_at()),
        }
    }
}

/// Query parameters of the release list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseQuery {
    /// `created_at` or `released_at`.
    #[serde(default)]
    pub order_by: Option<String>,
    /// `asc` or `desc` (default).
    #[serde(default)]
    pub sort: Option<String>,
    /// 1-based page index.
    #[serde(default)]
    pub page: Option<i64>,
    /// Page size (default 20).
    #[serde(default)]
    pub per_page: Option<i64>,
    /// Ask for rendered HTML descriptions.
    #[serde(default)]
    pub include_html_description: Option<bool>,
}

impl ReleaseQuery {
    /// Resolves the parameters into a plan.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::NotSupported`] when HTML descriptions are requested.
    pub fn plan(&self) -> Result<QueryPlan<ReleaseOrderKey>, MockError> {
        if self.include_html_description == Some(true) {
            return Err(MockError::not_supported("include_html_description"));
        }
        Ok(QueryPlan {
            order: Some((
                ReleaseOrderKey::from_param(self.order_by.as_deref()),
                SortDirection::from_param(self.sort.as_deref(), SortDirection::Descending),
            )),
            pagination: Pagination::from_params(self.page, self.per_page),
        })
    }
}

// ============================================================================
// SECTION: User Queries
// ============================================================================

/// User sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserOrderKey {
    /// Order by id.
    Id,
    /// Order by display name.
    Name,
    /// Order by username.
    Username,
    /// Order by creation instant.
    CreatedAt,
}

impl UserOrderKey {
    /// Parses an `order_by` parameter; unknown values fall back to `id`.
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("name") => Self::Name,
            Some("username") => Self::Username,
            Some("created_at") => Self::CreatedAt,
            _ => Self::Id,
        }
    }
}

impl SortKey<User> for UserOrderKey {
    fn compare(&self, left: &User, right: &User) -> Ordering {
        match self {
            Self::Id => left.id().cmp(&right.id()),
            Self::Name => left.name().cmp(right.name()),
            Self::Username => left.username().cmp(right.username()),
            Self::CreatedAt => left.created_at().cmp(&right.created_at()),
        }
    }
}

/// Query parameters of the user list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserQuery {
    /// Case-insensitive substring over username, name, and email.
    #[serde(default)]
    pub search: Option<String>,
    /// `id` (default), `name`, `username`, or `created_at`.
    #[serde(default)]
    pub order_by: Option<String>,
    /// `asc` (default) or `desc`.
    #[serde(default)]
    pub sort: Option<String>,
    /// 1-based page index.
    #[serde(default)]
    pub page: Option<i64>,
    /// Page size (default 20).
    #[serde(default)]
    pub per_page: Option<i64>,
}

impl UserQuery {
    /// Resolves the ordering and pagination parameters into a plan.
    #[must_use]
    pub fn plan(&self) -> QueryPlan<UserOrderKey> {
        QueryPlan {
            order: Some((
                UserOrderKey::from_param(self.order_by.as_deref()),
                SortDirection::from_param(self.sort.as_deref(), SortDirection::Ascending),
            )),
            pagination: Pagination::from_params(self.page, self.per_page),
        }
    }

    /// Returns true when `user` matches the search term.
    #[must_use]
    pub fn matches(&self, user: &User) -> bool {
        let Some(term) = self.search.as_deref() else {
            return true;
        };
        let needle = term.to_lowercase();
        [user.username(), user.name(), user.email()]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}
