use async_trait::async_trait;
use crate::error::Result;
use crate::models::{PageRequest, ReviewPage, ShopProfile};

/// Where the harvester pulls shops and review pages from.
#[async_trait]
pub trait ReviewSource {
    async fn resolve_shop(&self, shop_name: &str) -> Result<ShopProfile>;

    async fn fetch_review_page(&self, shop_id: u64, page: PageRequest) -> Result<ReviewPage>;
}
