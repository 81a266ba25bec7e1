pub mod cache_file;
pub mod json_version;
pub mod serde_version;

use anyhow::{Result, anyhow};
use async_trait::async_trait;

use crate::models::BarSeries;

#[async_trait]
pub trait CreateBarSeries {
    // Either load a bar series OR return an anyhow::error
    async fn create_bar_series(&self) -> Result<BarSeries>;

    /// A unique identifier for this implementation (so that afterwards we know which one we used).
    fn signature(&self) -> &'static str;
}

/// Try each provider in turn and return the first series produced.
pub async fn get_bar_series_async(
    implementations: &[Box<dyn CreateBarSeries>],
) -> Result<(BarSeries, &'static str)> {
    for imp in implementations {
        match imp.create_bar_series().await {
            Ok(series) => {
                let signature = imp.signature();
                return Ok((series, signature));
            }
            Err(e) => {
                log::info!("{} could not provide bars: {:#}", imp.signature(), e);
                // Continue to the next implementation
            }
        }
    }
    Err(anyhow!("All bar sources failed to create data"))
}
