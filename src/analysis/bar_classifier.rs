//! Per-bar zone membership.
//!
//! A single forward pass with one piece of state: the active zone (if any). While a zone is
//! active each close either stays inside it, bounces out of the near side, or breaches the far
//! side. A breach flips the zone's polarity (broken resistance becomes support and vice versa).
//! Zones live in an arena owned by the classifier and are only ever mutated by index.

use serde::{Deserialize, Serialize};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::Bar;
use crate::models::range_zone::{BarClassification, ConfirmedZone, ZoneType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassifierState {
    #[default]
    Inactive,
    /// Index into the zone arena
    Active(usize),
}

/// Outcome of feeding one bar to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: ClassifierState,
    pub label: BarClassification,
    /// Arena index of a zone whose polarity must flip
    pub flip: Option<usize>,
}

/// Pure transition function over `(state, zones, bar)`.
pub fn transition(
    state: ClassifierState,
    zones: &[ConfirmedZone],
    bar_index: usize,
    bar: &Bar,
) -> Transition {
    let close = bar.close;

    if let ClassifierState::Active(zone_idx) = state
        && let Some(zone) = zones.get(zone_idx)
    {
        let (breached, bounced) = match zone.zone_type {
            ZoneType::Resistance => (close > zone.price_high, close < zone.price_low),
            ZoneType::Support => (close < zone.price_low, close > zone.price_high),
        };

        return if breached {
            Transition {
                next: ClassifierState::Inactive,
                label: BarClassification::Neutral,
                flip: Some(zone_idx),
            }
        } else if bounced {
            Transition {
                next: ClassifierState::Inactive,
                label: BarClassification::Neutral,
                flip: None,
            }
        } else {
            Transition {
                next: state,
                label: zone.zone_type.into(),
                flip: None,
            }
        };
    }

    // Inactive: the first zone (in collection order) strictly containing the close wins
    match zones
        .iter()
        .position(|zone| bar_index >= zone.starting_index && zone.strictly_contains(close))
    {
        Some(zone_idx) => Transition {
            next: ClassifierState::Active(zone_idx),
            label: zones[zone_idx].zone_type.into(),
            flip: None,
        },
        None => Transition {
            next: ClassifierState::Inactive,
            label: BarClassification::Neutral,
            flip: None,
        },
    }
}

/// Stateful walker applying [`transition`] bar by bar.
#[derive(Debug, Clone, Default)]
pub struct ZoneClassifier {
    zones: Vec<ConfirmedZone>,
    state: ClassifierState,
    flip_count: usize,
}

impl ZoneClassifier {
    pub fn new(zones: Vec<ConfirmedZone>) -> Self {
        Self {
            zones,
            state: ClassifierState::Inactive,
            flip_count: 0,
        }
    }

    /// Earliest bar at which any zone exists
    pub fn first_zone_index(&self) -> Option<usize> {
        self.zones.iter().map(|zone| zone.starting_index).min()
    }

    /// Feed the next bar. Bars must be fed in increasing index order.
    pub fn step(&mut self, bar_index: usize, bar: &Bar) -> BarClassification {
        let Transition { next, label, flip } = transition(self.state, &self.zones, bar_index, bar);

        if let Some(zone_idx) = flip {
            let zone = &mut self.zones[zone_idx];
            zone.zone_type = zone.zone_type.flipped();
            self.flip_count += 1;
        }

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_classifier_transitions && next != self.state {
            log::info!(
                "bar {}: {:?} -> {:?} (close {:.4}, flip {:?})",
                bar_index,
                self.state,
                next,
                bar.close,
                flip
            );
        }

        self.state = next;
        label
    }

    pub fn state(&self) -> ClassifierState {
        self.state
    }

    pub fn zones(&self) -> &[ConfirmedZone] {
        &self.zones
    }

    pub fn flip_count(&self) -> usize {
        self.flip_count
    }
}

/// Labels for every bar plus the zones as they stand after the pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub labels: Vec<BarClassification>,
    pub zones: Vec<ConfirmedZone>,
    pub flip_count: usize,
}

/// Classify every bar against `zones`. The input zones are not modified; flipped polarities
/// are reported in the returned [`Classification::zones`].
pub fn classify_bars(bars: &[Bar], zones: &[ConfirmedZone]) -> Classification {
    let mut labels = vec![BarClassification::Neutral; bars.len()];
    let mut classifier = ZoneClassifier::new(zones.to_vec());

    // No opinion before any zone exists
    if let Some(first_idx) = classifier.first_zone_index() {
        for (bar_index, bar) in bars.iter().enumerate().skip(first_idx) {
            labels[bar_index] = classifier.step(bar_index, bar);
        }
    }

    Classification {
        labels,
        flip_count: classifier.flip_count(),
        zones: classifier.zones,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::extreme_scan::tests::flat_bars;

    fn zone(low: f64, high: f64, start: usize, zone_type: ZoneType) -> ConfirmedZone {
        ConfirmedZone {
            price_low: low,
            price_high: high,
            starting_index: start,
            zone_type,
            entry_price: low,
            breach_price: high,
            formation: (0, 1),
        }
    }

    use BarClassification::{Neutral, Resistance, Support};

    #[test]
    fn bars_before_first_zone_are_neutral() {
        let bars = flat_bars(&[105.0; 6]);
        let zones = [zone(100.0, 110.0, 3, ZoneType::Resistance)];
        let result = classify_bars(&bars, &zones);

        assert_eq!(
            result.labels,
            vec![Neutral, Neutral, Neutral, Resistance, Resistance, Resistance]
        );
    }

    #[test]
    fn breach_flips_zone_and_labels_bar_none() {
        let bars = flat_bars(&[105.0, 112.0, 105.0, 110.0, 95.0]);
        let zones = [zone(100.0, 110.0, 0, ZoneType::Resistance)];
        let result = classify_bars(&bars, &zones);

        // 0: enter as resistance, 1: breach, 2: re-enter with flipped polarity,
        // 3: close on the boundary stays inside, 4: support broken below flips back
        assert_eq!(result.labels, vec![Resistance, Neutral, Support, Support, Neutral]);
        assert_eq!(result.flip_count, 2);
        assert_eq!(result.zones[0].zone_type, ZoneType::Resistance);
        // Caller's zones are untouched
        assert_eq!(zones[0].zone_type, ZoneType::Resistance);
    }

    #[test]
    fn bar_after_breach_needs_strict_reentry() {
        let bars = flat_bars(&[105.0, 112.0, 110.0, 104.0]);
        let zones = [zone(100.0, 110.0, 0, ZoneType::Resistance)];
        let result = classify_bars(&bars, &zones);

        // 110 sits on the boundary so the flipped zone is not re-entered until 104
        assert_eq!(result.labels, vec![Resistance, Neutral, Neutral, Support]);
        assert_eq!(result.zones[0].zone_type, ZoneType::Support);
    }

    #[test]
    fn bounce_exits_without_flip() {
        let bars = flat_bars(&[105.0, 95.0, 105.0]);
        let zones = [zone(100.0, 110.0, 0, ZoneType::Resistance)];
        let result = classify_bars(&bars, &zones);

        assert_eq!(result.labels, vec![Resistance, Neutral, Resistance]);
        assert_eq!(result.flip_count, 0);
        assert_eq!(result.zones[0].zone_type, ZoneType::Resistance);
    }

    #[test]
    fn support_bounce_and_breach() {
        let bars = flat_bars(&[95.0, 101.0, 95.0, 89.0]);
        let zones = [zone(90.0, 100.0, 0, ZoneType::Support)];
        let result = classify_bars(&bars, &zones);

        assert_eq!(result.labels, vec![Support, Neutral, Support, Neutral]);
        assert_eq!(result.zones[0].zone_type, ZoneType::Resistance);
    }

    #[test]
    fn first_zone_in_collection_order_wins() {
        let bars = flat_bars(&[105.0]);
        let zones = [
            zone(95.0, 108.0, 0, ZoneType::Support),
            zone(100.0, 110.0, 0, ZoneType::Resistance),
        ];
        assert_eq!(classify_bars(&bars, &zones).labels, vec![Support]);
    }

    #[test]
    fn zone_not_yet_born_is_ignored() {
        let bars = flat_bars(&[105.0, 105.0, 105.0]);
        let zones = [
            zone(100.0, 110.0, 2, ZoneType::Resistance),
            zone(100.0, 110.0, 1, ZoneType::Support),
        ];
        // Bar 1 can only see the support zone; it stays active afterwards
        assert_eq!(
            classify_bars(&bars, &zones).labels,
            vec![Neutral, Support, Support]
        );
    }

    #[test]
    fn transition_is_pure() {
        let bars = flat_bars(&[112.0]);
        let zones = [zone(100.0, 110.0, 0, ZoneType::Resistance)];
        let first = transition(ClassifierState::Active(0), &zones, 0, &bars[0]);
        let second = transition(ClassifierState::Active(0), &zones, 0, &bars[0]);

        assert_eq!(first, second);
        assert_eq!(first.flip, Some(0));
        assert_eq!(first.next, ClassifierState::Inactive);
    }

    #[test]
    fn no_zones_means_all_neutral() {
        let bars = flat_bars(&[1.0, 2.0, 3.0]);
        let result = classify_bars(&bars, &[]);
        assert_eq!(result.labels, vec![Neutral; 3]);
        assert!(classify_bars(&[], &[]).labels.is_empty());
    }

    #[test]
    fn classifier_steps_bar_by_bar() {
        let bars = flat_bars(&[105.0, 112.0]);
        let mut classifier =
            ZoneClassifier::new(vec![zone(100.0, 110.0, 0, ZoneType::Resistance)]);

        assert_eq!(classifier.step(0, &bars[0]), Resistance);
        assert_eq!(classifier.state(), ClassifierState::Active(0));

        assert_eq!(classifier.step(1, &bars[1]), Neutral);
        assert_eq!(classifier.state(), ClassifierState::Inactive);
        assert_eq!(classifier.zones()[0].zone_type, ZoneType::Support);
        assert_eq!(classifier.flip_count(), 1);
    }
}
