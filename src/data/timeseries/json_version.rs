use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::{PERSISTENCE, bar_json_filename};
use crate::data::timeseries::CreateBarSeries;
use crate::domain::{Bar, TickerTimeframe};
use crate::models::BarSeries;

pub const JSON_SIGNATURE: &str = "JSON Bar File";

/// Parse a JSON array of `{timestamp, open, high, low, close, volume}` objects
pub fn load_bar_file(path: &Path, ticker_timeframe: TickerTimeframe) -> Result<BarSeries> {
    let file = File::open(path).context(format!("Failed to open bar file: {:?}", path))?;
    let bars: Vec<Bar> = serde_json::from_reader(BufReader::new(file))
        .context(format!("Failed to parse bar file: {:?}", path))?;
    BarSeries::new(ticker_timeframe, bars).context(format!("Invalid bars in {:?}", path))
}

pub struct JsonFileVersion {
    pub directory: PathBuf,
    pub ticker_timeframe: TickerTimeframe,
}

impl JsonFileVersion {
    pub fn new(ticker_timeframe: TickerTimeframe) -> Self {
        Self {
            directory: PathBuf::from(PERSISTENCE.bar_files.directory),
            ticker_timeframe,
        }
    }

    pub fn path(&self) -> PathBuf {
        self.directory.join(bar_json_filename(
            &self.ticker_timeframe.ticker,
            &self.ticker_timeframe.timeframe,
        ))
    }
}

#[async_trait]
impl CreateBarSeries for JsonFileVersion {
    fn signature(&self) -> &'static str {
        JSON_SIGNATURE
    }

    async fn create_bar_series(&self) -> Result<BarSeries> {
        let path = self.path();
        let ticker_timeframe = self.ticker_timeframe.clone();

        #[cfg(debug_assertions)]
        let start_time = DEBUG_FLAGS.print_serde.then(|| {
            log::info!("Reading bar file: {:?}...", path);
            std::time::Instant::now()
        });

        let series = tokio::task::spawn_blocking(move || load_bar_file(&path, ticker_timeframe))
            .await
            .context("Bar file task panicked")??;

        #[cfg(debug_assertions)]
        if let Some(start) = start_time {
            log::info!(
                "✅ Bar file loaded: {} bars in {:.2}s",
                series.len(),
                start.elapsed().as_secs_f64()
            );
        }

        Ok(series)
    }
}
