use serde::{Deserialize, Serialize};

use super::Review;

/// Envelope shared by the list endpoints.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    pub results: Vec<T>,
}

/// Pagination parameters for a single call, sent as query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub offset: u64,
    pub limit: u32,
}

impl PageRequest {
    pub fn new(offset: u64, limit: u32) -> Self {
        Self { offset, limit }
    }
}

/// One fetched page of reviews plus the total the API reported with it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewPage {
    pub reviews: Vec<Review>,
    pub total: u64,
}

impl From<Page<Review>> for ReviewPage {
    fn from(page: Page<Review>) -> Self {
        Self {
            reviews: page.results,
            total: page.count,
        }
    }
}
