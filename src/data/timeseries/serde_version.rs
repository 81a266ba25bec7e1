#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::timeseries::json_version::JSON_SIGNATURE;
use crate::data::timeseries::{CreateBarSeries, cache_file::CacheFile};
use crate::domain::TickerTimeframe;
use crate::models::BarSeries;
use crate::utils::time_utils::how_many_seconds_ago;
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub const CACHE_SIGNATURE: &str = "Local Cache";

pub fn check_local_data_validity(
    path: &Path,
    recency_required_secs: i64,
    version_required: f64,
    ticker_timeframe: &TickerTimeframe,
) -> Result<()> {
    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_serde {
        log::info!("Checking validity of local cache at {:?}...", path);
    }
    let cache = CacheFile::load_from_path(path)?;

    // Check version
    if cache.version != version_required {
        bail!(
            "Cache version mismatch: file v{} vs required v{}",
            cache.version,
            version_required
        );
    }

    // Check ticker and interval match
    if &cache.data.ticker_timeframe != ticker_timeframe {
        bail!(
            "Cache holds {}, expected {}",
            cache.data.ticker_timeframe,
            ticker_timeframe
        );
    }

    // Check recency
    let seconds_ago = how_many_seconds_ago(cache.timestamp_ms);
    if seconds_ago > recency_required_secs {
        bail!(
            "Cache too old: created {} seconds ago (limit: {} seconds)",
            seconds_ago,
            recency_required_secs
        );
    }

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_serde {
        log::info!(
            "✅ Cache valid: v{}, {}s old (limit {}s), {}",
            cache.version,
            seconds_ago,
            recency_required_secs,
            cache.data.ticker_timeframe
        );
    }

    Ok(())
}

/// Write a bar series to the binary cache file.
/// Only series freshly parsed from a JSON bar file are written.
pub fn write_bar_cache_locally(
    series_signature: &'static str,
    series: &BarSeries,
    path: &Path,
    version: f64,
) -> Result<()> {
    if series_signature != JSON_SIGNATURE {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_serde {
            log::info!("Skipping cache write (data came from {})", series_signature);
        }
        return Ok(());
    }

    #[cfg(debug_assertions)]
    let start_time = DEBUG_FLAGS.print_serde.then(|| {
        log::info!("Writing cache to disk: {:?}...", path);
        std::time::Instant::now()
    });

    CacheFile::new(series.clone(), version).save_to_path(path)?;

    #[cfg(debug_assertions)]
    if let Some(start) = start_time {
        let file_size = std::fs::metadata(path)?.len();
        log::info!(
            "✅ Cache written: {:?} ({:.1} KB in {:.2}s)",
            path,
            file_size as f64 / 1024.0,
            start.elapsed().as_secs_f64()
        );
    }

    Ok(())
}

/// Async wrapper for write_bar_cache_locally
pub async fn write_bar_cache_async(
    series_signature: &'static str,
    series: BarSeries,
    path: PathBuf,
    version: f64,
) -> Result<()> {
    tokio::task::spawn_blocking(move || {
        write_bar_cache_locally(series_signature, &series, &path, version)
    })
    .await
    .context("Cache write task panicked")?
}

pub struct SerdeVersion {
    pub path: PathBuf,
}

#[async_trait]
impl CreateBarSeries for SerdeVersion {
    fn signature(&self) -> &'static str {
        CACHE_SIGNATURE
    }

    async fn create_bar_series(&self) -> Result<BarSeries> {
        let full_path = self.path.clone();

        #[cfg(debug_assertions)]
        let start_time = DEBUG_FLAGS.print_serde.then(|| {
            log::info!("Reading cache from: {:?}...", full_path);
            std::time::Instant::now()
        });

        let cache = tokio::task::spawn_blocking(move || CacheFile::load_from_path(&full_path))
            .await
            .context("Deserialization task panicked")?
            .context("Failed to load cache file")?;

        #[cfg(debug_assertions)]
        if let Some(start) = start_time {
            log::info!(
                "✅ Cache loaded: {} bars in {:.2}s",
                cache.data.len(),
                start.elapsed().as_secs_f64()
            );
        }

        Ok(cache.data)
    }
}
