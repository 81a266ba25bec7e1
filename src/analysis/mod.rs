// Range detection and bar classification
pub mod bar_classifier;
pub mod extreme_scan;
pub mod range_detector;
pub mod zone_efficacy;
pub mod zone_validator;

// Re-export commonly used types
pub use bar_classifier::{Classification, ZoneClassifier, classify_bars};
pub use range_detector::{RangeDetection, RangeDetector, detect_range_zones};
pub use zone_efficacy::{ZoneEfficacyStats, compute_zone_efficacy};
