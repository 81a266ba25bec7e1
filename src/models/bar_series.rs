use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Bar, TickerTimeframe};
use crate::utils::maths_utils::{get_max, get_min};

// ============================================================================
// BarSeries: ordered bars for a single ticker/timeframe
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BarSeries {
    pub ticker_timeframe: TickerTimeframe,
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Build a series, checking every bar and that timestamps strictly increase.
    pub fn new(ticker_timeframe: TickerTimeframe, bars: Vec<Bar>) -> Result<Self> {
        for (idx, bar) in bars.iter().enumerate() {
            bar.check()?;
            if idx > 0 && bar.timestamp <= bars[idx - 1].timestamp {
                bail!(
                    "{}: bar {} at {} does not follow bar {} at {}",
                    ticker_timeframe,
                    idx,
                    bar.timestamp,
                    idx - 1,
                    bars[idx - 1].timestamp
                );
            }
        }
        Ok(Self {
            ticker_timeframe,
            bars,
        })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first_timestamp(&self) -> Option<DateTime<Utc>> {
        self.bars.first().map(|bar| bar.timestamp)
    }

    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.bars.last().map(|bar| bar.timestamp)
    }

    /// (start_idx, end_idx) of the most recent `count` bars, end exclusive
    pub fn get_indices_most_recent(&self, count: usize) -> (usize, usize) {
        let total = self.bars.len();
        (total.saturating_sub(count), total)
    }

    /// Keep only the most recent `count` bars
    pub fn truncate_to_most_recent(&mut self, count: usize) {
        let (start_idx, _) = self.get_indices_most_recent(count);
        if start_idx > 0 {
            self.bars.drain(..start_idx);
        }
    }

    /// Lowest low and highest high across the series
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        let lows: Vec<f64> = self.bars.iter().map(|bar| bar.low).collect();
        let highs: Vec<f64> = self.bars.iter().map(|bar| bar.high).collect();
        Some((get_min(&lows)?, get_max(&highs)?))
    }
}
