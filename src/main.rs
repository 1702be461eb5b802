use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

use etsy_reviews::config::Settings;
use etsy_reviews::{init_tracing, CsvExporter, EtsyApi, ReviewHarvester};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let settings = Settings::new()?;

    let shop_name = std::env::args()
        .nth(1)
        .or_else(|| settings.shop.name.clone())
        .context("no shop name given: pass it as the first argument or set APP__SHOP__NAME")?;

    info!(
        shop_name = %shop_name,
        started_at = %Utc::now().format("%Y-%m-%d %H:%M:%S"),
        "Starting review extraction"
    );

    // Fails here, before any request, when the key is missing.
    let api = EtsyApi::from_env(&settings)?;
    let mut harvester = ReviewHarvester::new(api, CsvExporter::new(&settings.output.dir));

    let report = harvester.run(&shop_name).await?;

    println!("\nExtraction Summary:");
    println!("Shop: {} ({})", report.shop.shop_name, report.shop.url);
    println!("Declared Reviews: {}", report.shop.review_count);
    println!("Reviews Collected: {}", report.review_count);
    println!("Pages Fetched: {}", report.pages);
    println!("Output File: {}", report.output_path.display());

    Ok(())
}
