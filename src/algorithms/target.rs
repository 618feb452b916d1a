/// Maps a raw interaction value to the target value of `Qui` it implies.
///
/// Arguments are `(implicit, value, current_value)`.
pub type TargetValueFn = fn(bool, f64, f64) -> f64;

/// Confidence assumed for an interaction the model knows nothing about.
pub const NEUTRAL_PRIOR_CONFIDENCE: f64 = 0.5;

/// Computes the new target value of `Qui` after observing `value`, given the
/// current estimate `current_value`.
///
/// Explicit models take `value` as the new rating directly. Implicit models move
/// the current value toward 1 (positive value) or 0 (negative value), by a
/// fraction that grows with the strength of the value. Returns `NaN` when the
/// observation implies no change.
pub fn compute_target_value(implicit: bool, value: f64, current_value: f64) -> f64 {
    if !implicit {
        return value;
    }

    if value > 0.0 && current_value < 1.0 {
        let diff = 1.0 - current_value.max(0.0);
        return current_value + (value / (1.0 + value)) * diff;
    }

    if value < 0.0 && current_value > 0.0 {
        let diff = -current_value.min(1.0);
        return current_value + (-value / (1.0 - value)) * diff;
    }

    f64::NAN
}
