//! Confirmation of potential ranges.
//!
//! Bars are replayed forward from `lookback_period`. A pending range becomes a
//! [`ConfirmedZone`] on its first valid touch after its formation window has passed, and leaves
//! the pending pool at that moment. Ranges never touched are dropped.

use crate::config::RangeConfig;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::Bar;
use crate::models::range_zone::{ConfirmedZone, PotentialZone, ZoneType};

/// Confirm `potential_zones` (all of polarity `zone_type`) against `bars`.
///
/// Output is in confirmation order. Pending zones are tested oldest-inserted first.
pub fn validate_zones(
    bars: &[Bar],
    potential_zones: Vec<PotentialZone>,
    zone_type: ZoneType,
    config: &RangeConfig,
) -> Vec<ConfirmedZone> {
    let lookback = config.lookback_period;
    let mut pending = potential_zones;
    let mut confirmed = Vec::new();

    for (i, bar) in bars.iter().enumerate().skip(lookback) {
        if pending.is_empty() {
            break;
        }

        let mut j = 0;
        while j < pending.len() {
            let zone = &pending[j];
            // A zone cannot be confirmed from within its own formation window
            if i > zone.ending_index + lookback && zone.is_valid_touch(bar, zone_type) {
                let zone = pending.remove(j);
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_zone_validation {
                    log::info!(
                        "{} range [{} .. {}] confirmed at bar {} (high {:.4} low {:.4} close {:.4})",
                        zone_type,
                        zone.starting_index,
                        zone.ending_index,
                        i,
                        bar.high,
                        bar.low,
                        bar.close
                    );
                }
                confirmed.push(ConfirmedZone::confirm(&zone, zone_type, i));
            } else {
                j += 1;
            }
        }
    }

    confirmed
}
