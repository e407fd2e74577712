//! Pagination utilities for list endpoints
//!
//! Listings come from the store as lazy streams, so pages are cut from the
//! stream instead of with SQL `LIMIT`/`OFFSET`, and no total is computed.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use futures::{Stream, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};

/// Pagination query parameters
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PaginationParams {
    /// Page number (1-indexed)
    pub page: Option<u32>,

    /// Items per page
    pub per_page: Option<u32>,
}

impl PaginationParams {
    /// Maximum allowed items per page
    pub const MAX_PER_PAGE: u32 = 100;

    /// Returns the clamped per_page value
    pub fn per_page(&self) -> u32 {
        self.per_page.unwrap_or(20).clamp(1, Self::MAX_PER_PAGE)
    }

    /// Returns the page (1-indexed, minimum 1)
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Number of records before the first one on this page
    pub fn offset(&self) -> usize {
        (self.page() as usize - 1) * self.per_page() as usize
    }

    pub fn limit(&self) -> usize {
        self.per_page() as usize
    }
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub per_page: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Paginated response wrapper
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T: Serialize> Paginated<T> {
    /// Collect one page from `items`, reading a single record past the page
    /// to learn whether another page follows.
    pub async fn collect<S, E>(items: S, params: &PaginationParams) -> Result<Self, E>
    where
        S: Stream<Item = Result<T, E>>,
    {
        let limit = params.limit();
        let mut data: Vec<T> = items
            .skip(params.offset())
            .take(limit + 1)
            .try_collect()
            .await?;

        let has_next = data.len() > limit;
        data.truncate(limit);

        Ok(Self {
            data,
            pagination: PaginationMeta {
                page: params.page(),
                per_page: params.per_page(),
                has_next,
                has_prev: params.page() > 1,
            },
        })
    }
}

impl<T: Serialize> IntoResponse for Paginated<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
