use serde::{Deserialize, Serialize};

use crate::domain::Bar;

/// Polarity of a range zone
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::EnumIter,
    strum_macros::Display,
)]
pub enum ZoneType {
    Resistance, // Caps price from above
    Support,    // Floors price from below
}

impl ZoneType {
    /// Strictly more extreme in this polarity's direction (higher for Resistance, lower for Support).
    /// Also serves as the "past the entry boundary" test of the validator.
    #[inline]
    pub fn is_more_extreme(self, x: f64, y: f64) -> bool {
        match self {
            ZoneType::Resistance => x > y,
            ZoneType::Support => x < y,
        }
    }

    /// The intrabar extreme that probes this kind of zone
    #[inline]
    pub fn probing_extreme(self, bar: &Bar) -> f64 {
        match self {
            ZoneType::Resistance => bar.high,
            ZoneType::Support => bar.low,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            ZoneType::Resistance => ZoneType::Support,
            ZoneType::Support => ZoneType::Resistance,
        }
    }
}

/// A local closing-price extreme. Only lives inside a single scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ExtremePoint {
    pub price: f64,
    pub index: usize,
}

/// Unconfirmed zone spanning two pivot bars.
///
/// `entry_price` is the boundary nearer to normal price action, `breach_price` the one a
/// confirming touch must not close through. `starting_index < ending_index` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PotentialZone {
    pub breach_price: f64,
    pub entry_price: f64,
    pub starting_index: usize,
    pub ending_index: usize,
}

impl PotentialZone {
    /// Build from two finalised pivots of the same polarity (in any order)
    pub(crate) fn from_pivots(
        point: ExtremePoint,
        point_prev: ExtremePoint,
        zone_type: ZoneType,
    ) -> Self {
        let point_is_breach = zone_type.is_more_extreme(point.price, point_prev.price);
        let (breach_price, entry_price) = if point_is_breach {
            (point.price, point_prev.price)
        } else {
            (point_prev.price, point.price)
        };

        Self {
            breach_price,
            entry_price,
            starting_index: point.index.min(point_prev.index),
            ending_index: point.index.max(point_prev.index),
        }
    }

    /// Polarity as implied by the prices alone (ties read as Resistance)
    pub fn implied_type(&self) -> ZoneType {
        if self.breach_price >= self.entry_price {
            ZoneType::Resistance
        } else {
            ZoneType::Support
        }
    }

    /// Wick reaches past the entry boundary but the bar closes back on the entry side
    pub fn is_valid_touch(&self, bar: &Bar, zone_type: ZoneType) -> bool {
        zone_type.is_more_extreme(zone_type.probing_extreme(bar), self.entry_price)
            && !zone_type.is_more_extreme(bar.close, self.entry_price)
    }
}

/// A potential zone that has been validated by a rejecting touch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfirmedZone {
    pub price_low: f64,
    pub price_high: f64,
    /// Index of the confirming bar (the zone's "birth" for classification)
    pub starting_index: usize,
    pub zone_type: ZoneType,

    // Formation details, kept for rendering
    pub entry_price: f64,
    pub breach_price: f64,
    /// (first pivot index, second pivot index)
    pub formation: (usize, usize),
}

impl ConfirmedZone {
    pub fn confirm(potential: &PotentialZone, zone_type: ZoneType, validated_index: usize) -> Self {
        let (price_low, price_high) = match zone_type {
            ZoneType::Resistance => (potential.entry_price, potential.breach_price),
            ZoneType::Support => (potential.breach_price, potential.entry_price),
        };

        Self {
            price_low,
            price_high,
            starting_index: validated_index,
            zone_type,
            entry_price: potential.entry_price,
            breach_price: potential.breach_price,
            formation: (potential.starting_index, potential.ending_index),
        }
    }

    /// Strictly inside the zone (boundaries excluded)
    pub fn strictly_contains(&self, price: f64) -> bool {
        self.price_low < price && price < self.price_high
    }
}

/// Per-bar zone membership label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display)]
pub enum BarClassification {
    Resistance,
    Support,
    #[serde(rename = "None")]
    #[strum(serialize = "None")]
    Neutral, // Not inside any active zone
}

impl From<ZoneType> for BarClassification {
    fn from(zone_type: ZoneType) -> Self {
        match zone_type {
            ZoneType::Resistance => BarClassification::Resistance,
            ZoneType::Support => BarClassification::Support,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn bar(high: f64, low: f64, close: f64) -> Bar {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Bar::new(ts, close, high, low, close, 1.0)
    }

    fn point(price: f64, index: usize) -> ExtremePoint {
        ExtremePoint { price, index }
    }

    #[test]
    fn resistance_pivots_put_higher_price_at_breach() {
        let zone =
            PotentialZone::from_pivots(point(100.0, 200), point(110.0, 60), ZoneType::Resistance);
        assert_eq!(zone.breach_price, 110.0);
        assert_eq!(zone.entry_price, 100.0);
        assert_eq!((zone.starting_index, zone.ending_index), (60, 200));
        assert_eq!(zone.implied_type(), ZoneType::Resistance);
    }

    #[test]
    fn support_pivots_put_lower_price_at_breach() {
        let zone =
            PotentialZone::from_pivots(point(90.0, 300), point(100.0, 120), ZoneType::Support);
        assert_eq!(zone.breach_price, 90.0);
        assert_eq!(zone.entry_price, 100.0);
        assert_eq!(zone.implied_type(), ZoneType::Support);
    }

    #[test]
    fn valid_touch_requires_wick_past_entry_and_close_back() {
        let zone = PotentialZone {
            breach_price: 110.0,
            entry_price: 100.0,
            starting_index: 10,
            ending_index: 70,
        };
        // Wick above entry, close below: rejection
        assert!(zone.is_valid_touch(&bar(101.0, 98.0, 99.0), ZoneType::Resistance));
        // Close exactly on entry still counts as closing back
        assert!(zone.is_valid_touch(&bar(101.0, 98.0, 100.0), ZoneType::Resistance));
        // Close through entry: breakout, not a touch
        assert!(!zone.is_valid_touch(&bar(102.0, 99.0, 101.0), ZoneType::Resistance));
        // Wick only reaches entry
        assert!(!zone.is_valid_touch(&bar(100.0, 98.0, 99.0), ZoneType::Resistance));
    }

    #[test]
    fn confirmed_zone_orients_prices_by_polarity() {
        let resistance = PotentialZone {
            breach_price: 110.0,
            entry_price: 100.0,
            starting_index: 10,
            ending_index: 70,
        };
        let zone = ConfirmedZone::confirm(&resistance, ZoneType::Resistance, 150);
        assert_eq!((zone.price_low, zone.price_high), (100.0, 110.0));
        assert_eq!(zone.starting_index, 150);
        assert_eq!(zone.formation, (10, 70));

        let support = PotentialZone {
            breach_price: 90.0,
            entry_price: 100.0,
            starting_index: 10,
            ending_index: 70,
        };
        let zone = ConfirmedZone::confirm(&support, ZoneType::Support, 150);
        assert_eq!((zone.price_low, zone.price_high), (90.0, 100.0));
        assert!(zone.strictly_contains(95.0));
        assert!(!zone.strictly_contains(100.0));
    }

    #[test]
    fn classification_serializes_neutral_as_none() {
        let labels = vec![
            BarClassification::Neutral,
            BarClassification::from(ZoneType::Support),
        ];
        assert_eq!(serde_json::to_string(&labels).unwrap(), r#"["None","Support"]"#);
        assert_eq!(BarClassification::Neutral.to_string(), "None");
        assert_eq!(ZoneType::Resistance.flipped(), ZoneType::Support);
    }

    #[test]
    fn flipping_twice_restores_polarity() {
        use strum::IntoEnumIterator;
        for zone_type in ZoneType::iter() {
            assert_ne!(zone_type.flipped(), zone_type);
            assert_eq!(zone_type.flipped().flipped(), zone_type);
        }
    }
}
