//! Numeric conversion helpers.
//!
//! The simulation runs in `f64`; Bevy transforms are `f32`. Conversions go
//! through here so out-of-range values are flagged in debug builds.

/// Convert a finite `f64` into `f32`, asserting that it fits the target type.
#[expect(
    clippy::cast_possible_truncation,
    reason = "Callers assert that the value fits within f32 bounds."
)]
#[must_use]
pub fn expect_f32(value: f64) -> f32 {
    debug_assert!(value.is_finite(), "expected finite f64 for f32 conversion");
    debug_assert!(
        value <= f64::from(f32::MAX),
        "f64 value {value} exceeds f32::MAX"
    );
    debug_assert!(
        value >= f64::from(f32::MIN),
        "f64 value {value} is below f32::MIN"
    );
    value as f32
}

/// Seconds of simulation time for a frame, clamped to `[0, max_step]`.
///
/// Non-finite input and a non-positive `max_step` both collapse to zero so
/// a bad frame never moves anything.
#[must_use]
pub fn clamp_frame_step(delta: f64, max_step: f64) -> f64 {
    if !delta.is_finite() || !max_step.is_finite() || max_step <= 0.0 {
        return 0.0;
    }
    delta.clamp(0.0, max_step)
}
