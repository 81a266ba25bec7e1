//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet. Every flag is further gated by `cfg(debug_assertions)`
//! at the call site.

pub struct DebugFlags {
    /// Emit every finalised pivot and the potential range (if any) it produced.
    pub print_pivot_scan: bool,
    /// Emit the bar index and prices each time a potential range is confirmed.
    pub print_zone_validation: bool,
    /// Emit classifier transitions (enter / bounce / breach + flip).
    pub print_classifier_transitions: bool,
    /// Emit a one-line summary per detection run (potential vs confirmed counts).
    pub print_detection_summary: bool,
    /// Emit detailed serialization/deserialization logs.
    pub print_serde: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_pivot_scan: false,
    print_zone_validation: false,
    print_classifier_transitions: false,
    print_detection_summary: false,
    print_serde: false,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_diagnostics_start_disabled() {
        let flags = [
            DEBUG_FLAGS.print_pivot_scan,
            DEBUG_FLAGS.print_zone_validation,
            DEBUG_FLAGS.print_classifier_transitions,
            DEBUG_FLAGS.print_detection_summary,
            DEBUG_FLAGS.print_serde,
        ];
        assert!(flags.iter().all(|&on| !on));
    }
}
