use anyhow::{Context, Result};
use clap::Parser;
use range_sniper::config::{PERSISTENCE, RANGE};
use range_sniper::data::timeseries::cache_file::CacheFile;
use range_sniper::data::timeseries::json_version::{JsonFileVersion, load_bar_file};
use range_sniper::domain::TickerTimeframe;
use std::path::PathBuf;

/// Convert a JSON bar file into the binary bar cache
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "BTC")]
    ticker: String,

    #[arg(long, default_value = "1D")]
    timeframe: String,

    /// Directory holding <TICKER>-<timeframe>.json bar files
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Keep only the most recent bars
    #[arg(long, default_value_t = RANGE.max_bars_to_analyse)]
    max_bars: usize,
}

fn main() -> Result<()> {
    build_bar_cache(&Args::parse())
}

fn build_bar_cache(args: &Args) -> Result<()> {
    let ticker_timeframe = TickerTimeframe::new(&args.ticker, &args.timeframe)?;
    let mut source = JsonFileVersion::new(ticker_timeframe.clone());
    if let Some(dir) = &args.data_dir {
        source.directory = dir.clone();
    }

    let source_path = source.path();
    let mut series = load_bar_file(&source_path, ticker_timeframe)
        .with_context(|| format!("Failed to load bar file {:?}", source_path))?;

    println!("Loaded {} bars from {:?}", series.len(), source_path);

    series.truncate_to_most_recent(args.max_bars);

    let output_path = CacheFile::default_cache_path(&series.ticker_timeframe);
    let output_cache = CacheFile::new(series, PERSISTENCE.cache.version);
    output_cache.save_to_path(&output_path)?;

    println!(
        "✅ Bar cache written to {:?} with {} bars.",
        output_path,
        output_cache.data.len()
    );
    Ok(())
}
