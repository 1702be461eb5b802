use anyhow::{bail, Result};

use etsy_reviews::config::Settings;
use etsy_reviews::{init_tracing, EtsyApi};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let settings = Settings::new()?;
    let api = EtsyApi::from_env(&settings)?;

    if !api.check_connectivity().await {
        bail!("Etsy API at {} did not answer the ping", settings.api.base_url);
    }

    println!("Etsy API reachable at {}", settings.api.base_url);
    Ok(())
}
