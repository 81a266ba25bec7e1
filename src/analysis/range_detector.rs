//! Two-phase range detection: pivot scan + validation, per polarity.

use serde::{Deserialize, Serialize};

use crate::analysis::extreme_scan::find_potential_zones;
use crate::analysis::zone_validator::validate_zones;
use crate::config::RangeConfig;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::Bar;
use crate::models::range_zone::{ConfirmedZone, ZoneType};

/// Result of one detection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeDetection {
    /// Proposals built by the pivot scan across both polarities
    pub potential_zone_count: usize,
    /// Confirmed resistance zones followed by confirmed support zones
    pub zones: Vec<ConfirmedZone>,
}

#[derive(Debug, Clone, Default)]
pub struct RangeDetector {
    config: RangeConfig,
}

impl RangeDetector {
    /// The config is normalized (clamped) here; it is never rejected.
    pub fn new(config: RangeConfig) -> Self {
        Self {
            config: config.normalized(),
        }
    }

    pub fn config(&self) -> &RangeConfig {
        &self.config
    }

    pub fn detect(&self, bars: &[Bar]) -> RangeDetection {
        // The polarities share nothing, so they run side by side
        let ((resistance_proposals, resistance), (support_proposals, support)) = rayon::join(
            || self.detect_polarity(bars, ZoneType::Resistance),
            || self.detect_polarity(bars, ZoneType::Support),
        );

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_detection_summary {
            log::info!(
                "Range detection over {} bars: resistance {}/{} confirmed, support {}/{} confirmed",
                bars.len(),
                resistance.len(),
                resistance_proposals,
                support.len(),
                support_proposals
            );
        }

        let mut zones = resistance;
        zones.extend(support);

        RangeDetection {
            potential_zone_count: resistance_proposals + support_proposals,
            zones,
        }
    }

    fn detect_polarity(&self, bars: &[Bar], zone_type: ZoneType) -> (usize, Vec<ConfirmedZone>) {
        let potential = find_potential_zones(bars, zone_type, &self.config);
        let proposals = potential.len();
        (proposals, validate_zones(bars, potential, zone_type, &self.config))
    }
}

/// Detect confirmed range zones in `bars`. Pure function of `(bars, config)`.
pub fn detect_range_zones(bars: &[Bar], config: &RangeConfig) -> Vec<ConfirmedZone> {
    RangeDetector::new(*config).detect(bars).zones
}
