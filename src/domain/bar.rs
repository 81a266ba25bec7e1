use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV sample for a fixed time interval.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    // A constructor for convenience
    pub fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Bar {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Checks the values a single bar must satisfy on its own (ordering is checked by the series).
    pub fn check(&self) -> Result<()> {
        let prices = [self.open, self.high, self.low, self.close];
        if prices.iter().any(|p| !p.is_finite()) {
            bail!("Bar at {} has a non-finite price", self.timestamp);
        }
        if self.volume.is_nan() || self.volume < 0.0 {
            bail!(
                "Bar at {} has invalid volume {}",
                self.timestamp,
                self.volume
            );
        }
        Ok(())
    }
}
