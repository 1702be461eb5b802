use std::env::VarError;
use async_trait::async_trait;
use http::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};
use crate::clients::HttpClient;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::extractors::ReviewSource;
use crate::models::{Page, PageRequest, Review, ReviewPage, ShopProfile};

/// Largest page the reviews endpoint serves.
pub const PAGE_LIMIT: u32 = 100;

pub struct EtsyApi {
    client: HttpClient,
    base_url: String,
}

impl EtsyApi {
    /// Reads the API key from the environment variable named in `settings`.
    pub fn from_env(settings: &Settings) -> Result<Self> {
        let key_env = &settings.api.key_env;
        let api_key = api_key_from(key_env, std::env::var(key_env))?;
        Self::new(settings, &api_key)
    }

    pub fn new(settings: &Settings, api_key: &str) -> Result<Self> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(Error::Authentication("API key is empty".to_string()));
        }

        Ok(Self {
            client: HttpClient::new(api_key)?,
            base_url: settings.api.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    pub async fn check_connectivity(&self) -> bool {
        let url = self.url("openapi-ping");
        match self.client.send(self.client.get(&url)).await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(error = %e, url = url, "Ping failed");
                false
            }
        }
    }

    pub async fn resolve_shop(&self, shop_name: &str) -> Result<ShopProfile> {
        let url = self.url("shops");
        let request = self
            .client
            .get(&url)
            .query(&[("shop_name", shop_name), ("limit", "1")]);
        let response = self.client.send(request).await?;

        if matches!(response.status(), StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            error!(status = status, body = %body, "API key rejected");
            return Err(Error::Authentication(format!("API key rejected with status {status}")));
        }

        let page: Page<ShopProfile> = parse_success(response, "shop lookup").await?;
        match page.results.into_iter().next() {
            Some(shop) if shop.shop_name == shop_name => {
                info!(
                    shop_id = shop.shop_id,
                    shop_name = %shop.shop_name,
                    review_count = shop.review_count,
                    "Resolved shop"
                );
                Ok(shop)
            }
            Some(shop) => {
                debug!(requested = shop_name, returned = %shop.shop_name, "Shop name mismatch");
                Err(Error::ShopNotFound { name: shop_name.to_string() })
            }
            None => Err(Error::ShopNotFound { name: shop_name.to_string() }),
        }
    }

    pub async fn fetch_review_page(&self, shop_id: u64, page: PageRequest) -> Result<ReviewPage> {
        let url = self.url(&format!("shops/{shop_id}/reviews"));
        let request = self.client.get(&url).query(&page);
        let response = self.client.send(request).await?;

        let reviews: Page<Review> = parse_success(response, "review page").await?;
        debug!(
            shop_id = shop_id,
            offset = page.offset,
            returned = reviews.results.len(),
            reported_total = reviews.count,
            "Fetched review page"
        );
        Ok(reviews.into())
    }
}

fn api_key_from(key_env: &str, value: std::result::Result<String, VarError>) -> Result<String> {
    value.map_err(|e| match e {
        VarError::NotPresent => {
            Error::Authentication(format!("environment variable {key_env} is not set"))
        }
        VarError::NotUnicode(_) => {
            Error::Authentication(format!("environment variable {key_env} is not valid UTF-8"))
        }
    })
}

async fn parse_success<T: DeserializeOwned>(response: reqwest::Response, what: &str) -> Result<T> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let body = String::from_utf8_lossy(&body).into_owned();
        error!(status = status.as_u16(), body = %body, "Unexpected status for {what}");
        return Err(Error::ApiResponse { status: status.as_u16(), body });
    }

    serde_json::from_slice(&body).map_err(|e| {
        let body_str = String::from_utf8_lossy(&body);
        error!(
            error = %e,
            body = %body_str,
            "Failed to parse {what} response"
        );
        Error::from(e)
    })
}

#[async_trait]
impl ReviewSource for EtsyApi {
    async fn resolve_shop(&self, shop_name: &str) -> Result<ShopProfile> {
        EtsyApi::resolve_shop(self, shop_name).await
    }

    async fn fetch_review_page(&self, shop_id: u64, page: PageRequest) -> Result<ReviewPage> {
        EtsyApi::fetch_review_page(self, shop_id, page).await
    }
}
