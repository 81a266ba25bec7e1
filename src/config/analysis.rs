//! Range detection configuration

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default window settings for pivot detection
pub struct PivotSettings {
    // Looking for highest/lowest close within lookback_period * 2 + 1 bars
    pub lookback_period: usize,
    // Min bars between the two closes forming a range. Must be at least lookback_period
    pub min_points_distance: usize,
    // Max bars between the two closes forming a range
    pub max_points_distance: usize,
}

/// Default price-gap settings (percent) between the two pivots of a range
pub struct ZoneSizeSettings {
    pub min_zone_size_pct: f64,
    pub max_zone_size_pct: f64,
}

/// The Master Range Configuration
pub struct RangeDefaults {
    pub pivots: PivotSettings,
    pub zone_size: ZoneSizeSettings,
    // Only the most recent bars are analysed (older history is ignored)
    pub max_bars_to_analyse: usize,
}

pub const RANGE: RangeDefaults = RangeDefaults {
    pivots: PivotSettings {
        lookback_period: 50,
        min_points_distance: 50,
        max_points_distance: 400,
    },
    zone_size: ZoneSizeSettings {
        min_zone_size_pct: 5.0,
        max_zone_size_pct: 15.0,
    },
    max_bars_to_analyse: 20_000,
};

/// Runtime parameters for range detection.
///
/// Any combination is accepted; call [`RangeConfig::normalized`] to get the
/// clamped values the detector actually uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeConfig {
    pub lookback_period: usize,
    pub min_points_distance: usize,
    pub max_points_distance: usize,
    pub min_zone_size: f64,
    pub max_zone_size: f64,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            lookback_period: RANGE.pivots.lookback_period,
            min_points_distance: RANGE.pivots.min_points_distance,
            max_points_distance: RANGE.pivots.max_points_distance,
            min_zone_size: RANGE.zone_size.min_zone_size_pct,
            max_zone_size: RANGE.zone_size.max_zone_size_pct,
        }
    }
}

impl RangeConfig {
    /// Resolve the parameters the detector actually uses.
    ///
    /// A field left at zero (or a non-finite size) takes its default. The result is then clamped
    /// into a consistent set: `min_points_distance >= lookback_period`,
    /// `max_points_distance >= min_points_distance`, `min_zone_size >= 0` and
    /// `max_zone_size >= min_zone_size`.
    pub fn normalized(&self) -> Self {
        let defaults = Self::default();

        let or_default = |value: usize, default: usize| if value == 0 { default } else { value };
        let size_or_default = |value: f64, default: f64| {
            if value == 0.0 || !value.is_finite() {
                default
            } else {
                value
            }
        };

        let lookback_period = or_default(self.lookback_period, defaults.lookback_period);
        let min_points_distance = or_default(self.min_points_distance, defaults.min_points_distance)
            .max(lookback_period);
        let max_points_distance = or_default(self.max_points_distance, defaults.max_points_distance)
            .max(min_points_distance);

        let min_zone_size = size_or_default(self.min_zone_size, defaults.min_zone_size).max(0.0);
        let max_zone_size =
            size_or_default(self.max_zone_size, defaults.max_zone_size).max(min_zone_size);

        Self {
            lookback_period,
            min_points_distance,
            max_points_distance,
            min_zone_size,
            max_zone_size,
        }
    }

    /// Minimum number of bars needed before a single pivot can be finalised
    pub fn min_bars_required(&self) -> usize {
        self.lookback_period * 2 + 1
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let config = serde_json::from_reader(BufReader::new(file))
            .context(format!("Failed to parse range config: {:?}", path))?;
        Ok(config)
    }
}
