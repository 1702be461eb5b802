pub mod etsy;
pub mod harvester;

pub use etsy::{EtsyApi, PAGE_LIMIT};
pub use harvester::{Harvest, HarvestReport, HarvestState, ReviewHarvester};
