use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::utils::TimeUtils;

#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq)]
pub struct TickerTimeframe {
    pub ticker: String,
    /// Timeframe label as used in bar file names ("1D", "4H", ...)
    pub timeframe: String,
    pub interval_ms: i64,
}

impl TickerTimeframe {
    pub fn new(ticker: &str, timeframe: &str) -> Result<Self> {
        let interval_ms = TimeUtils::timeframe_to_interval_ms(timeframe)
            .ok_or_else(|| anyhow!("Unsupported timeframe '{}'", timeframe))?;
        Ok(Self {
            ticker: ticker.to_uppercase(),
            timeframe: timeframe.to_string(),
            interval_ms,
        })
    }

    // Crypto pairs are always quoted in USD
    pub fn symbol(&self) -> String {
        format!("{}/USD", self.ticker)
    }
}

impl std::fmt::Display for TickerTimeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} {} ({})",
            self.symbol(),
            self.timeframe,
            TimeUtils::interval_to_string(self.interval_ms)
        )
    }
}
