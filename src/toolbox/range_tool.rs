use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{
    Classification, RangeDetector, ZoneEfficacyStats, classify_bars, compute_zone_efficacy,
};
use crate::config::{PLOT_CONFIG, RangeConfig, Rgba};
use crate::domain::Bar;
use crate::models::{ConfirmedZone, ZoneType};
use crate::toolbox::{ChartElement, Tool};

/// Support/resistance ranges detected from pairs of pivots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeTool {
    pub config: RangeConfig,
}

impl RangeTool {
    pub fn new(config: RangeConfig) -> Self {
        Self {
            config: config.normalized(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeReport {
    /// Parameters after normalization
    pub config: RangeConfig,
    pub potential_zone_count: usize,
    /// Zones as confirmed (polarity at confirmation time)
    pub zones: Vec<ConfirmedZone>,
    /// Per-bar labels and the zones after any flips
    pub classification: Classification,
    pub stats: ZoneEfficacyStats,
}

impl Tool for RangeTool {
    type Output = RangeReport;

    fn historical(&self, bars: &[Bar]) -> Result<RangeReport> {
        let detector = RangeDetector::new(self.config);
        let detection = detector.detect(bars);
        let classification = classify_bars(bars, &detection.zones);
        let stats = compute_zone_efficacy(&classification);

        Ok(RangeReport {
            config: *detector.config(),
            potential_zone_count: detection.potential_zone_count,
            zones: detection.zones,
            classification,
            stats,
        })
    }

    /// Three rectangles per zone: formation, pending validation, validated (to the last bar).
    fn render(&self, bars: &[Bar], output: &RangeReport) -> Vec<ChartElement> {
        let Some(last) = bars.last() else {
            return Vec::new();
        };

        output
            .zones
            .iter()
            .filter_map(|zone| zone_rects(bars, zone, last.timestamp))
            .flatten()
            .collect()
    }
}

fn zone_rects(
    bars: &[Bar],
    zone: &ConfirmedZone,
    last_timestamp: DateTime<Utc>,
) -> Option<[ChartElement; 3]> {
    let timestamp = |idx: usize| bars.get(idx).map(|bar| bar.timestamp);
    let formation_start = timestamp(zone.formation.0)?;
    let formation_end = timestamp(zone.formation.1)?;
    let validated = timestamp(zone.starting_index)?;

    let (potential_fill, pending_fill) = match zone.zone_type {
        ZoneType::Resistance => (
            PLOT_CONFIG.resistance_potential_color,
            PLOT_CONFIG.resistance_pending_color,
        ),
        ZoneType::Support => (
            PLOT_CONFIG.support_potential_color,
            PLOT_CONFIG.support_pending_color,
        ),
    };

    let rect = |name: String, x0: DateTime<Utc>, x1: DateTime<Utc>, fill: Rgba| {
        ChartElement::Rect {
            name,
            x0,
            x1,
            y0: zone.price_low,
            y1: zone.price_high,
            fill,
            border_width: PLOT_CONFIG.zone_border_width,
        }
    };

    Some([
        rect(
            format!("Potential {} Range", zone.zone_type),
            formation_start,
            formation_end,
            potential_fill,
        ),
        rect(
            format!("Pending validation {} Range", zone.zone_type),
            formation_end,
            validated,
            pending_fill,
        ),
        rect(
            format!("Validated {} Range", zone.zone_type),
            validated,
            last_timestamp,
            PLOT_CONFIG.validated_color,
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::extreme_scan::tests::{flat_bars, small_config, two_peak_closes};
    use crate::models::BarClassification;

    /// Resistance [100, 110] formed by pivots 4 and 11, confirmed by a wick at bar 16
    fn confirmed_bars() -> Vec<Bar> {
        let mut bars = flat_bars(&two_peak_closes());
        bars[16].high = 101.0;
        bars
    }

    #[test]
    fn historical_reports_zones_labels_and_stats() {
        let bars = confirmed_bars();
        let report = RangeTool::new(small_config()).historical(&bars).unwrap();

        assert_eq!(report.potential_zone_count, 1);
        assert_eq!(report.zones.len(), 1);
        assert_eq!(report.zones[0].starting_index, 16);
        assert_eq!(report.classification.labels.len(), bars.len());
        assert!(
            report
                .classification
                .labels
                .iter()
                .all(|&l| l == BarClassification::Neutral)
        );
        assert_eq!(report.stats.total_bars, bars.len());
    }

    #[test]
    fn renders_three_rectangles_per_zone() {
        let bars = confirmed_bars();
        let tool = RangeTool::new(small_config());
        let report = tool.historical(&bars).unwrap();
        let elements = tool.render(&bars, &report);

        let names: Vec<&str> = elements.iter().map(|e| e.name()).collect();
        assert_eq!(
            names,
            [
                "Potential Resistance Range",
                "Pending validation Resistance Range",
                "Validated Resistance Range"
            ]
        );

        let spans: Vec<_> = elements
            .iter()
            .map(|element| match element {
                ChartElement::Rect { x0, x1, y0, y1, .. } => (*x0, *x1, *y0, *y1),
            })
            .collect();
        let ts = |idx: usize| bars[idx].timestamp;
        assert_eq!(spans[0], (ts(4), ts(11), 100.0, 110.0));
        assert_eq!(spans[1], (ts(11), ts(16), 100.0, 110.0));
        assert_eq!(spans[2], (ts(16), ts(17), 100.0, 110.0));

        match &elements[2] {
            ChartElement::Rect { fill, .. } => assert_eq!(*fill, PLOT_CONFIG.validated_color),
        }
    }

    #[test]
    fn nothing_to_render_without_bars_or_zones() {
        let tool = RangeTool::new(small_config());
        let bars = flat_bars(&two_peak_closes());
        let report = tool.historical(&bars).unwrap();
        assert!(report.zones.is_empty());
        assert!(tool.render(&bars, &report).is_empty());
        assert!(tool.render(&[], &report).is_empty());
    }

    #[test]
    fn zones_outside_the_bars_are_skipped() {
        let bars = confirmed_bars();
        let tool = RangeTool::new(small_config());
        let report = tool.historical(&bars).unwrap();
        assert!(tool.render(&bars[..10], &report).is_empty());
    }
}
