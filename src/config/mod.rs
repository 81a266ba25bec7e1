//! Configuration module for the range sniper.

pub mod analysis;

mod debug; // Private: forces files to use crate::config::DEBUG_FLAGS not crate::config::debug::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod persistence;
pub mod plot;

// Re-export commonly used items
pub use analysis::{RANGE, RangeConfig};
pub use persistence::{PERSISTENCE, bar_cache_filename, bar_json_filename};
pub use plot::{PLOT_CONFIG, Rgba};
