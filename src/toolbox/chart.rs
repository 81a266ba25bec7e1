//! Backend-agnostic chart primitives produced by tools.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Rgba;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartElement {
    /// Axis-aligned rectangle spanning `[x0, x1]` in time and `[y0, y1]` in price
    Rect {
        name: String,
        x0: DateTime<Utc>,
        x1: DateTime<Utc>,
        y0: f64,
        y1: f64,
        fill: Rgba,
        border_width: f32,
    },
}

impl ChartElement {
    pub fn name(&self) -> &str {
        match self {
            ChartElement::Rect { name, .. } => name,
        }
    }
}
