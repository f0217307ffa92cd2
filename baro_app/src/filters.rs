#[derive(Debug, Clone)]
pub struct FilteredReading {
    pub data: f32,
    pub initialized: bool,
}

/// Applies a low-pass filter to a single float value.
/// `current` is the new sample, `previous` is the last filtered value,
/// and `alpha` is the blending factor in the range [0.0, 1.0].
pub fn low_pass_filter_float(current: f32, previous: f32, alpha: f32) -> f32 {
    let alpha = alpha.clamp(0.0, 1.0);
    alpha * current + (1.0 - alpha) * previous
}

/// Applies a low-pass filter to a reading with initialization logic.
pub fn low_pass_filter_reading(current: f32, filtered: &mut FilteredReading, alpha: f32) {
    if !filtered.initialized {
        // First-time setup: directly copy the current value
        filtered.data = current;
        filtered.initialized = true;
    } else {
        filtered.data = low_pass_filter_float(current, filtered.data, alpha);
    }
}
