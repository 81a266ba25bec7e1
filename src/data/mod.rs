// Bar loading and caching
pub mod pre_main_async;
pub mod timeseries;

// Re-export commonly used types
pub use pre_main_async::fetch_bar_data;
pub use timeseries::serde_version::write_bar_cache_async;
pub use timeseries::{CreateBarSeries, get_bar_series_async};
