//! Page-based pagination model shared by every list endpoint.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Pagination metadata returned next to list `data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Pagination {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// The request for the following page, if any.
    pub fn next_request(&self) -> Option<PageRequest> {
        self.has_next().then(|| PageRequest {
            page: Some(self.page + 1),
            limit: Some(self.limit),
        })
    }
}

/// Requested page window. `None` lets the backend pick its default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Result<Self, CoreError> {
        if page == 0 {
            return Err(CoreError::invalid_page("page numbers start at 1"));
        }
        if limit == 0 {
            return Err(CoreError::invalid_page("limit must be positive"));
        }
        Ok(Self {
            page: Some(page),
            limit: Some(limit),
        })
    }

    pub fn first(limit: u32) -> Result<Self, CoreError> {
        Self::new(1, limit)
    }
}
