use chrono::{DateTime, Utc};

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const MS_IN_15_MIN: i64 = Self::MS_IN_S * 60 * 15;
    pub const MS_IN_30_MIN: i64 = Self::MS_IN_S * 60 * 30;
    pub const MS_IN_H: i64 = Self::MS_IN_MIN * 60;
    pub const MS_IN_4_H: i64 = Self::MS_IN_MIN * 60 * 4;
    pub const MS_IN_D: i64 = Self::MS_IN_H * 24;
    pub const MS_IN_W: i64 = Self::MS_IN_D * 7;
    pub const MS_IN_1_M: i64 = Self::MS_IN_D * 30;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";

    /// Convert interval in milliseconds to a shorthand (e.g. `30m`, `1h`).
    pub fn interval_to_string(interval_ms: i64) -> &'static str {
        match interval_ms {
            Self::MS_IN_MIN => "1m",
            Self::MS_IN_15_MIN => "15m",
            Self::MS_IN_30_MIN => "30m",
            Self::MS_IN_H => "1h",
            Self::MS_IN_4_H => "4h",
            Self::MS_IN_D => "1d",
            Self::MS_IN_W => "1w",
            Self::MS_IN_1_M => "1M",
            _ => "unknown",
        }
    }

    /// Parse the timeframe labels used by the bar files ("1m", "15m", "30m", "1H", "4H", "1D", "1W", "1M").
    /// Monthly bars have no fixed width so they map to the nominal 30 day month.
    pub fn timeframe_to_interval_ms(timeframe: &str) -> Option<i64> {
        match timeframe {
            "1m" => Some(Self::MS_IN_MIN),
            "15m" => Some(Self::MS_IN_15_MIN),
            "30m" => Some(Self::MS_IN_30_MIN),
            "1H" => Some(Self::MS_IN_H),
            "4H" => Some(Self::MS_IN_4_H),
            "1D" => Some(Self::MS_IN_D),
            "1W" => Some(Self::MS_IN_W),
            "1M" => Some(Self::MS_IN_1_M),
            _ => None,
        }
    }
}

pub fn format_utc(dt: &DateTime<Utc>) -> String {
    // Used for display purposes
    dt.format(TimeUtils::STANDARD_TIME_FORMAT).to_string()
}

pub fn how_many_seconds_ago(past_timestamp_ms: i64) -> i64 {
    // How many seconds ago was the event described by `past_timestamp_ms` ?
    let now_timestamp_ms = Utc::now().timestamp_millis();
    (now_timestamp_ms - past_timestamp_ms) / 1000
}
