// Async bar loading run from main before any analysis

use anyhow::{Context, Result};

use crate::Cli;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::PERSISTENCE;
use crate::data::timeseries::cache_file::CacheFile;
use crate::data::timeseries::json_version::JsonFileVersion;
use crate::data::timeseries::serde_version::{SerdeVersion, check_local_data_validity};
use crate::data::timeseries::{CreateBarSeries, get_bar_series_async};
use crate::domain::TickerTimeframe;
use crate::models::BarSeries;

/// Load the bars requested on the command line.
///
/// If the local cache fails validation, the JSON bar file is the only source. Otherwise both
/// are available and the cache is tried first unless `--prefer-json` is given.
pub async fn fetch_bar_data(args: &Cli) -> Result<(BarSeries, &'static str)> {
    let ticker_timeframe = TickerTimeframe::new(&args.ticker, &args.timeframe)?;
    let cache_path = CacheFile::default_cache_path(&ticker_timeframe);

    let json_source = {
        let mut source = JsonFileVersion::new(ticker_timeframe.clone());
        if let Some(dir) = &args.data_dir {
            source.directory = dir.clone();
        }
        source
    };

    let providers: Vec<Box<dyn CreateBarSeries>> = match (
        args.prefer_json,
        check_local_data_validity(
            &cache_path,
            PERSISTENCE.cache.acceptable_age_secs,
            PERSISTENCE.cache.version,
            &ticker_timeframe,
        ),
    ) {
        (false, Ok(_)) => vec![
            Box::new(SerdeVersion { path: cache_path }),
            Box::new(json_source),
        ], // cache first
        (true, Ok(_)) => vec![
            Box::new(json_source),
            Box::new(SerdeVersion { path: cache_path }),
        ], // JSON first
        (_, Err(e)) => {
            log::warn!("⚠️  Local cache validation failed: {:#}", e);
            vec![Box::new(json_source)] // JSON only
        }
    };

    let (series, signature) = get_bar_series_async(&providers)
        .await
        .context(format!("No bars available for {}", ticker_timeframe))?;

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_serde {
        log::info!(
            "Loaded {} bars for {} using: {}.",
            series.len(),
            ticker_timeframe,
            signature
        );
    }

    Ok((series, signature))
}
