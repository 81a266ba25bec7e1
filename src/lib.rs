// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod models;
pub mod toolbox;
pub mod utils;

// Re-export commonly used types
pub use analysis::{Classification, RangeDetector, classify_bars, detect_range_zones};
pub use config::RangeConfig;
pub use data::fetch_bar_data;
pub use domain::{Bar, TickerTimeframe};
pub use models::{BarClassification, BarSeries, ConfirmedZone, ZoneType};
pub use toolbox::{ChartTool, Tool, ToolName, ToolResult};

// CLI argument parsing
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Ticker to analyse (quoted in USD)
    #[arg(long, default_value = "BTC")]
    pub ticker: String,

    /// Bar timeframe: 1m, 15m, 30m, 1H, 4H, 1D, 1W or 1M
    #[arg(long, default_value = "1D")]
    pub timeframe: String,

    /// Directory holding <TICKER>-<timeframe>.json bar files
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Use the JSON bar file as primary source instead of the local cache
    #[arg(long, default_value_t = false)]
    pub prefer_json: bool,

    /// Only the most recent bars are analysed
    #[arg(long, default_value_t = crate::config::RANGE.max_bars_to_analyse)]
    pub max_bars: usize,

    /// JSON file with range parameters (missing fields use defaults)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub lookback_period: Option<usize>,
    #[arg(long)]
    pub min_points_distance: Option<usize>,
    #[arg(long)]
    pub max_points_distance: Option<usize>,
    /// Minimum gap between the two pivots, in percent
    #[arg(long)]
    pub min_zone_size: Option<f64>,
    /// Maximum gap between the two pivots, in percent
    #[arg(long)]
    pub max_zone_size: Option<f64>,

    /// Tool to run
    #[arg(long, default_value = "Range")]
    pub tool: ToolName,

    /// Emit chart elements instead of the analysis report
    #[arg(long, default_value_t = false)]
    pub render: bool,

    /// Write JSON here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Range parameters from the config file (if any) with per-flag overrides applied.
    pub fn range_config(&self) -> Result<RangeConfig> {
        let mut config = match &self.config {
            Some(path) => RangeConfig::load_from_path(path)?,
            None => RangeConfig::default(),
        };

        if let Some(v) = self.lookback_period {
            config.lookback_period = v;
        }
        if let Some(v) = self.min_points_distance {
            config.min_points_distance = v;
        }
        if let Some(v) = self.max_points_distance {
            config.max_points_distance = v;
        }
        if let Some(v) = self.min_zone_size {
            config.min_zone_size = v;
        }
        if let Some(v) = self.max_zone_size {
            config.max_zone_size = v;
        }

        Ok(config.normalized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_range_constants() {
        let cli = Cli::try_parse_from(["range-sniper"]).unwrap();
        assert_eq!(cli.ticker, "BTC");
        assert_eq!(cli.timeframe, "1D");
        assert_eq!(cli.max_bars, 20_000);
        assert_eq!(cli.tool, ToolName::Range);
        assert_eq!(cli.range_config().unwrap(), RangeConfig::default());
    }

    #[test]
    fn flags_override_config_file() {
        let path = std::env::temp_dir().join("range_sniper_cli_config.json");
        std::fs::write(&path, r#"{"lookback_period": 20, "max_zone_size": 12.5}"#).unwrap();

        let cli = Cli::try_parse_from([
            "range-sniper",
            "--config",
            path.to_str().unwrap(),
            "--min-zone-size",
            "2.5",
        ])
        .unwrap();
        let config = cli.range_config().unwrap();

        assert_eq!(config.lookback_period, 20);
        // min_points_distance (50) already satisfies the clamp
        assert_eq!(config.min_points_distance, 50);
        assert_eq!(config.min_zone_size, 2.5);
        assert_eq!(config.max_zone_size, 12.5);
    }

    #[test]
    fn overrides_are_normalized() {
        let cli = Cli::try_parse_from([
            "range-sniper",
            "--lookback-period",
            "80",
            "--max-points-distance",
            "10",
        ])
        .unwrap();
        let config = cli.range_config().unwrap();
        assert_eq!(config.min_points_distance, 80);
        assert_eq!(config.max_points_distance, 80);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let cli = Cli::try_parse_from(["range-sniper", "--config", "/nonexistent/range.json"])
            .unwrap();
        assert!(cli.range_config().is_err());
    }
}
