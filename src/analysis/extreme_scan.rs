//! Pivot scanning and potential range building.
//!
//! A pivot is the most extreme close seen since the last pivot that has not been beaten for
//! `lookback_period` consecutive bars. Consecutive pivots of the same polarity are paired into
//! potential ranges when their distance (in bars) and price gap (in percent) are within bounds.

use crate::config::RangeConfig;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::Bar;
use crate::models::range_zone::{ExtremePoint, PotentialZone, ZoneType};
use crate::utils::maths_utils::pct_difference;

/// Scan `bars` for potential ranges of one polarity.
///
/// `config` is expected to be normalized. Indices `[L, n - L)` are scanned so a pivot always has
/// `L` bars on either side; fewer than `2L + 1` bars produces nothing.
pub fn find_potential_zones(
    bars: &[Bar],
    zone_type: ZoneType,
    config: &RangeConfig,
) -> Vec<PotentialZone> {
    let lookback = config.lookback_period;
    let scan_end = bars.len().saturating_sub(lookback);

    let mut point: Option<ExtremePoint> = None;
    let mut point_prev: Option<ExtremePoint> = None;
    let mut right_offset = 0usize;
    let mut potential_zones = Vec::new();

    for (i, bar) in bars.iter().enumerate().take(scan_end).skip(lookback) {
        let close = bar.close;
        match point {
            Some(current) if !zone_type.is_more_extreme(close, current.price) => {
                right_offset += 1;
            }
            _ => {
                point = Some(ExtremePoint { price: close, index: i });
                right_offset = 0;
            }
        }

        if right_offset < lookback {
            continue;
        }

        // No improvement for a full window: the pivot is final
        let Some(finalised) = point.take() else {
            continue;
        };

        if let Some(prev) = point_prev
            && is_potential_zone(finalised, prev, config)
        {
            let zone = PotentialZone::from_pivots(finalised, prev, zone_type);
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_pivot_scan {
                log::info!(
                    "{} potential range [{} .. {}] entry {:.4} breach {:.4}",
                    zone_type,
                    zone.starting_index,
                    zone.ending_index,
                    zone.entry_price,
                    zone.breach_price
                );
            }
            potential_zones.push(zone);
        } else {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_pivot_scan {
                log::info!(
                    "{} pivot at {} ({:.4}) did not pair with {:?}",
                    zone_type,
                    finalised.index,
                    finalised.price,
                    point_prev
                );
            }
        }

        right_offset = 0;
        point_prev = Some(finalised);
    }

    potential_zones
}

/// Distance and price-gap constraints between two consecutive pivots
fn is_potential_zone(point: ExtremePoint, point_prev: ExtremePoint, config: &RangeConfig) -> bool {
    let points_distance = point.index - point_prev.index;
    let points_difference = pct_difference(point.price, point_prev.price);

    (config.min_points_distance..=config.max_points_distance).contains(&points_distance)
        && points_difference >= config.min_zone_size
        && points_difference <= config.max_zone_size
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    /// Bars whose open/high/low all equal the close
    pub(crate) fn flat_bars(closes: &[f64]) -> Vec<Bar> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::new(start + Duration::hours(i as i64), c, c, c, c, 1.0))
            .collect()
    }

    pub(crate) fn small_config() -> RangeConfig {
        RangeConfig {
            lookback_period: 3,
            min_points_distance: 3,
            max_points_distance: 100,
            min_zone_size: 5.0,
            max_zone_size: 15.0,
        }
    }

    /// Two resistance pivots: 110 at index 4 and 100 at index 11
    pub(crate) fn two_peak_closes() -> Vec<f64> {
        vec![
            90.0, 90.0, 90.0, 90.0, 110.0, 90.0, 90.0, 90.0, 90.0, 90.0, 90.0, 100.0, 90.0, 90.0,
            90.0, 90.0, 90.0, 90.0,
        ]
    }

    #[test]
    fn pairs_two_resistance_pivots() {
        let bars = flat_bars(&two_peak_closes());
        let zones = find_potential_zones(&bars, ZoneType::Resistance, &small_config());

        // First pivot finalised at i=7, second (100 at 11) finalised at i=14
        assert_eq!(zones.len(), 1);
        let zone = zones[0];
        assert_eq!(zone.breach_price, 110.0);
        assert_eq!(zone.entry_price, 100.0);
        assert_eq!((zone.starting_index, zone.ending_index), (4, 11));
    }

    #[test]
    fn too_short_series_yields_nothing() {
        let config = small_config();
        let bars = flat_bars(&[100.0; 6]); // < 2L + 1
        assert!(find_potential_zones(&bars, ZoneType::Resistance, &config).is_empty());
        assert!(find_potential_zones(&[], ZoneType::Support, &config).is_empty());
    }

    #[test]
    fn price_gap_outside_bounds_is_rejected() {
        let mut closes = two_peak_closes();
        closes[11] = 108.0; // ~1.9% below 110
        let bars = flat_bars(&closes);
        assert!(find_potential_zones(&bars, ZoneType::Resistance, &small_config()).is_empty());

        closes[11] = 60.0; // next pivot becomes 90 at index 8, ~22% below 110
        let bars = flat_bars(&closes);
        assert!(find_potential_zones(&bars, ZoneType::Resistance, &small_config()).is_empty());
    }

    #[test]
    fn pivot_distance_above_max_is_rejected() {
        let bars = flat_bars(&two_peak_closes());
        let config = RangeConfig {
            max_points_distance: 5, // pivots are 7 bars apart
            ..small_config()
        };
        assert!(find_potential_zones(&bars, ZoneType::Resistance, &config).is_empty());
    }

    #[test]
    fn support_scan_mirrors_resistance() {
        let closes: Vec<f64> = two_peak_closes()
            .iter()
            .map(|&c| if c == 110.0 { 80.0 } else if c == 100.0 { 86.0 } else { 95.0 })
            .collect();
        let bars = flat_bars(&closes);
        let zones = find_potential_zones(&bars, ZoneType::Support, &small_config());

        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].breach_price, 80.0);
        assert_eq!(zones[0].entry_price, 86.0);
        assert_eq!(zones[0].implied_type(), ZoneType::Support);
    }

    #[test]
    fn ties_do_not_move_the_pivot() {
        // Equal peaks at 4 and 6: the earlier one stays the pivot
        let mut closes = two_peak_closes();
        closes[6] = 110.0;
        let bars = flat_bars(&closes);
        let zones = find_potential_zones(&bars, ZoneType::Resistance, &small_config());

        assert_eq!(zones.len(), 1);
        assert_eq!((zones[0].starting_index, zones[0].ending_index), (4, 11));
    }
}
