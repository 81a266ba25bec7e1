//! Chart element styling

use serde::{Deserialize, Serialize};

/// Plain RGBA colour, serialised as its CSS `rgba(...)` string
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl std::fmt::Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl Serialize for Rgba {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_rgba(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid rgba colour: {}", text)))
    }
}

fn parse_rgba(text: &str) -> Option<Rgba> {
    let inner = text.trim().strip_prefix("rgba(")?.strip_suffix(')')?;
    let mut parts = inner.split(',').map(str::trim);
    let r = parts.next()?.parse().ok()?;
    let g = parts.next()?.parse().ok()?;
    let b = parts.next()?.parse().ok()?;
    let a = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Rgba { r, g, b, a })
}

pub struct PlotConfig {
    /// Formation phase (between the two pivots)
    pub resistance_potential_color: Rgba,
    pub support_potential_color: Rgba,
    /// Waiting for the first valid touch
    pub resistance_pending_color: Rgba,
    pub support_pending_color: Rgba,
    /// From the validation bar to the end of the series (both polarities)
    pub validated_color: Rgba,
    /// Border width of the zone rectangles (0 = no border)
    pub zone_border_width: f32,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    resistance_potential_color: Rgba::new(0, 255, 0, 0.2), // Green
    support_potential_color: Rgba::new(255, 0, 0, 0.2),    // Red
    resistance_pending_color: Rgba::new(0, 255, 0, 0.3),
    support_pending_color: Rgba::new(255, 0, 0, 0.3),
    validated_color: Rgba::new(0, 48, 143, 0.3), // Navy
    zone_border_width: 0.0,
};
