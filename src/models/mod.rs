// Domain models for range analysis
// These modules contain pure business logic independent of rendering

pub mod bar_series;
pub mod range_zone;

// Re-export key types for convenience
pub use bar_series::BarSeries;
pub use range_zone::{BarClassification, ConfirmedZone, PotentialZone, ZoneType};
