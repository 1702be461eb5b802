use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopProfile {
    pub shop_id: u64,
    pub shop_name: String,
    pub url: String,
    /// Total number of reviews as declared by the API.
    pub review_count: u64,
    pub review_average: Option<f64>,
    pub num_favorites: Option<u64>,
}
