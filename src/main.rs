use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;
use tokio::runtime::Runtime;

use range_sniper::config::PERSISTENCE;
use range_sniper::data::timeseries::cache_file::CacheFile;
use range_sniper::data::write_bar_cache_async;
use range_sniper::utils::time_utils::format_utc;
use range_sniper::{ChartTool, Cli, TickerTimeframe, ToolResult, fetch_bar_data};

#[derive(Serialize)]
struct AnalysisOutput<'a> {
    series: &'a TickerTimeframe,
    bar_count: usize,
    first_timestamp: Option<DateTime<Utc>>,
    last_timestamp: Option<DateTime<Utc>>,
    /// (lowest low, highest high)
    price_bounds: Option<(f64, f64)>,
    result: &'a ToolResult,
}

fn main() -> Result<()> {
    // A. Init Logging
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {:?}", panic_info);
    }));
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);
    let config = args.range_config()?;

    // C. Data Loading (Blocking)
    let rt = Runtime::new().context("Failed to create Tokio runtime")?;
    let (mut series, series_signature) = rt.block_on(fetch_bar_data(&args))?;

    // D. Background Cache Write (full history, before trimming)
    let cache_write = rt.spawn(write_bar_cache_async(
        series_signature,
        series.clone(),
        CacheFile::default_cache_path(&series.ticker_timeframe),
        PERSISTENCE.cache.version,
    ));

    // E. Analysis
    series.truncate_to_most_recent(args.max_bars);
    if let (Some(first), Some(last)) = (series.first_timestamp(), series.last_timestamp()) {
        log::info!(
            "Running {} on {} bars of {} from {} to {} (source: {})",
            args.tool,
            series.len(),
            series.ticker_timeframe,
            format_utc(&first),
            format_utc(&last),
            series_signature
        );
    }

    let tool = ChartTool::new(args.tool, config);
    let result = tool.historical(series.bars())?;

    let json = if args.render {
        serde_json::to_string_pretty(&tool.render(series.bars(), &result))?
    } else {
        serde_json::to_string_pretty(&AnalysisOutput {
            series: &series.ticker_timeframe,
            bar_count: series.len(),
            first_timestamp: series.first_timestamp(),
            last_timestamp: series.last_timestamp(),
            price_bounds: series.price_bounds(),
            result: &result,
        })?
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, json).context(format!("Failed to write output: {:?}", path))?;
            log::info!("Output written to {:?}", path);
        }
        None => println!("{}", json),
    }

    // The runtime drops with main, so wait for the cache write here
    match rt.block_on(cache_write) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => log::error!("⚠️  Failed to write cache: {:#}", e),
        Err(e) => log::error!("⚠️  Cache write task failed: {}", e),
    }

    Ok(())
}
