use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;
use crate::error::Result;
use crate::models::Review;

/// Writes reviews to `{dir}/{shop_name}_etsy_reviews.csv`.
pub struct CsvExporter {
    output_dir: PathBuf,
}

impl CsvExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn path_for(&self, shop_name: &str) -> PathBuf {
        self.output_dir.join(format!("{shop_name}_etsy_reviews.csv"))
    }

    /// Replaces any previous export for the shop and returns its path.
    pub fn export(&self, shop_name: &str, reviews: &[Review]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.path_for(shop_name);
        write_reviews(&path, reviews)?;

        info!(
            path = %path.display(),
            rows = reviews.len(),
            "Exported reviews"
        );

        Ok(path)
    }
}

fn write_reviews(path: &Path, reviews: &[Review]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(file));

    // Written by hand so an empty export still carries the header row.
    writer.write_record(["listing_id", "buyer_user_id", "rating", "review", "create_timestamp"])?;
    for review in reviews {
        writer.serialize(review)?;
    }
    writer.flush()?;
    Ok(())
}
