use argminmax::ArgMinMax;

/// Percentage gap between two prices, relative to `reference`.
/// Non-finite when `reference` is zero.
pub fn pct_difference(reference: f64, other: f64) -> f64 {
    ((reference - other) / reference * 100.0).abs()
}

pub fn get_max(vec: &[f64]) -> Option<f64> {
    if vec.is_empty() {
        return None;
    }
    let max_index: usize = vec.argmax();
    Some(vec[max_index])
}

pub fn get_min(vec: &[f64]) -> Option<f64> {
    if vec.is_empty() {
        return None;
    }
    let min_index: usize = vec.argmin();
    Some(vec[min_index])
}

/// Linear-interpolated percentile of an already sorted slice.
pub fn percentile(sorted: &[usize], percentile: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }

    if sorted.len() == 1 {
        return sorted[0] as f64;
    }

    let clamped = percentile.clamp(0.0, 1.0);
    let max_index = (sorted.len() - 1) as f64;
    let position = clamped * max_index;
    let lower_index = position.floor() as usize;
    let upper_index = position.ceil() as usize;

    if lower_index == upper_index {
        sorted[lower_index] as f64
    } else {
        let lower_value = sorted[lower_index] as f64;
        let upper_value = sorted[upper_index] as f64;
        let weight = position - lower_index as f64;
        lower_value + (upper_value - lower_value) * weight
    }
}
