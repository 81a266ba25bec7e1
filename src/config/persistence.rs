//! File persistence and serialization configuration

use crate::utils::TimeUtils;

/// Bar files produced by the (external) acquisition step
pub struct BarFileConfig {
    /// Directory holding `<TICKER>-<timeframe>.json` files
    pub directory: &'static str,
}

/// Binary cache of already-parsed bars
pub struct BarCacheConfig {
    pub directory: &'static str,
    pub filename_without_ext: &'static str,
    /// Bumped whenever the cached layout changes
    pub version: f64,
    /// Caches older than this are ignored
    pub acceptable_age_secs: i64,
}

pub struct PersistenceConfig {
    pub bar_files: BarFileConfig,
    pub cache: BarCacheConfig,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    bar_files: BarFileConfig {
        directory: "AlpacaData",
    },
    cache: BarCacheConfig {
        directory: "bar_cache",
        filename_without_ext: "bars",
        version: 1.0,
        acceptable_age_secs: 60 * 60 * 24,
    },
};

/// Filename of the JSON bar file for a ticker/timeframe.
/// Example: "BTC-1D.json". Minute bars are stored as "BTC-1min.json".
pub fn bar_json_filename(ticker: &str, timeframe: &str) -> String {
    let timeframe = if timeframe.contains("1m") {
        "1min"
    } else {
        timeframe
    };
    format!("{}-{}.json", ticker, timeframe)
}

/// Generate ticker/interval-specific cache filename
/// Example: "bars_BTC_1d_v1.bin"
pub fn bar_cache_filename(ticker: &str, interval_ms: i64) -> String {
    let interval_str = TimeUtils::interval_to_string(interval_ms);
    format!(
        "{}_{}_{}_v{}.bin",
        PERSISTENCE.cache.filename_without_ext, ticker, interval_str, PERSISTENCE.cache.version
    )
}
