use std::path::PathBuf;
use chrono::Utc;
use tracing::{debug, error, info, warn};
use crate::error::Result;
use crate::extractors::ReviewSource;
use crate::models::{PageRequest, Review, ShopProfile};
use crate::services::etsy::PAGE_LIMIT;
use crate::storage::CsvExporter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarvestState {
    Idle,
    Resolving,
    Fetching,
    Done,
    Failed,
}

/// Reviews collected for one shop.
#[derive(Debug, Clone)]
pub struct Harvest {
    pub shop: ShopProfile,
    pub reviews: Vec<Review>,
    pub pages: usize,
}

#[derive(Debug, Clone)]
pub struct HarvestReport {
    pub shop: ShopProfile,
    pub review_count: usize,
    pub pages: usize,
    pub output_path: PathBuf,
}

pub struct ReviewHarvester<S> {
    source: S,
    exporter: CsvExporter,
    page_limit: u32,
    state: HarvestState,
}

impl<S: ReviewSource> ReviewHarvester<S> {
    pub fn new(source: S, exporter: CsvExporter) -> Self {
        Self {
            source,
            exporter,
            page_limit: PAGE_LIMIT,
            state: HarvestState::Idle,
        }
    }

    pub fn state(&self) -> HarvestState {
        self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Resolves the shop, pages through its reviews and exports them.
    /// Any error aborts the run without writing a file.
    pub async fn run(&mut self, shop_name: &str) -> Result<HarvestReport> {
        let result = self.run_inner(shop_name).await;
        if let Err(e) = &result {
            error!(error = %e, shop_name = shop_name, "Harvest failed");
            self.transition(HarvestState::Failed);
        }
        result
    }

    async fn run_inner(&mut self, shop_name: &str) -> Result<HarvestReport> {
        let started_at = Utc::now();

        self.transition(HarvestState::Resolving);
        let shop = self.source.resolve_shop(shop_name).await?;

        self.transition(HarvestState::Fetching);
        let harvest = self.collect(shop).await?;

        let output_path = self.exporter.export(&harvest.shop.shop_name, &harvest.reviews)?;
        self.transition(HarvestState::Done);

        info!(
            shop_name = %harvest.shop.shop_name,
            reviews = harvest.reviews.len(),
            pages = harvest.pages,
            elapsed_ms = (Utc::now() - started_at).num_milliseconds(),
            "Harvest complete"
        );

        Ok(HarvestReport {
            review_count: harvest.reviews.len(),
            pages: harvest.pages,
            output_path,
            shop: harvest.shop,
        })
    }

    /// Fetches pages until the expected total is reached or a short page
    /// signals the end of the data.
    pub async fn collect(&self, shop: ShopProfile) -> Result<Harvest> {
        let expected = shop.review_count;
        let mut reviews: Vec<Review> = Vec::new();
        let mut offset: u64 = 0;
        let mut pages = 0;

        while (reviews.len() as u64) < expected {
            let request = PageRequest::new(offset, self.page_limit);
            let page = self.source.fetch_review_page(shop.shop_id, request).await?;
            pages += 1;

            let received = page.reviews.len();
            // The shop's declared count stays authoritative.
            if page.total != expected {
                warn!(
                    declared = expected,
                    reported = page.total,
                    offset = offset,
                    "Page reports a different review total"
                );
            }

            reviews.extend(page.reviews);
            offset += received as u64;

            info!(
                page = pages,
                received = received,
                collected = reviews.len(),
                expected = expected,
                "Collected review page"
            );

            if received < self.page_limit as usize {
                debug!(received = received, limit = self.page_limit, "Short page, stopping");
                break;
            }
        }

        let collected = reviews.len() as u64;
        if collected != shop.review_count {
            warn!(
                declared = shop.review_count,
                collected = collected,
                "Collected count differs from the shop's declared review count"
            );
        }

        Ok(Harvest { shop, reviews, pages })
    }

    fn transition(&mut self, next: HarvestState) {
        debug!(from = ?self.state, to = ?next, "Harvest state change");
        self.state = next;
    }
}
