use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::analysis::bar_classifier::Classification;
use crate::models::range_zone::BarClassification;
use crate::utils::maths_utils::percentile;

/// Summary statistics describing how price action interacted with the confirmed zones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneEfficacyStats {
    /// Total number of bars classified.
    pub total_bars: usize,
    pub bars_in_resistance: usize,
    pub bars_in_support: usize,
    /// Percentage of bars labelled with either zone type (0–100).
    pub time_in_zones_pct: f64,
    /// Number of zone flips (breaches) during the pass.
    pub flip_count: usize,
    /// Contiguous labelled-run statistics (in bars).
    pub dwell_durations: Option<DwellDurationStats>,
}

/// Summary of contiguous dwell durations (measured in bar counts).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DwellDurationStats {
    pub total_runs: usize,
    pub median_bars: f64,
    pub p90_bars: f64,
    pub max_bars: usize,
}

pub fn compute_zone_efficacy(classification: &Classification) -> ZoneEfficacyStats {
    let labels = &classification.labels;
    let total_bars = labels.len();

    let bars_in_resistance = labels
        .iter()
        .filter(|&&label| label == BarClassification::Resistance)
        .count();
    let bars_in_support = labels
        .iter()
        .filter(|&&label| label == BarClassification::Support)
        .count();

    let time_in_zones_pct = if total_bars > 0 {
        ((bars_in_resistance + bars_in_support) as f64 / total_bars as f64 * 100.0)
            .clamp(0.0, 100.0)
    } else {
        0.0
    };

    // A run ends whenever the label changes, so a breach-then-reentry counts twice
    let mut run_lengths: Vec<usize> = labels
        .iter()
        .dedup_with_count()
        .filter(|(_, label)| **label != BarClassification::Neutral)
        .map(|(count, _)| count)
        .collect();

    let dwell_durations = if run_lengths.is_empty() {
        None
    } else {
        run_lengths.sort_unstable();
        Some(DwellDurationStats {
            total_runs: run_lengths.len(),
            median_bars: percentile(&run_lengths, 0.5),
            p90_bars: percentile(&run_lengths, 0.9),
            max_bars: *run_lengths.last().unwrap_or(&0),
        })
    };

    ZoneEfficacyStats {
        total_bars,
        bars_in_resistance,
        bars_in_support,
        time_in_zones_pct,
        flip_count: classification.flip_count,
        dwell_durations,
    }
}
