//! Planar vector helpers used by the motion controller.
//!
//! Planar vectors are `DVec2` values whose `x` is world x and whose `y` is
//! world z.
use glam::DVec2;

/// Forward and right unit vectors for a yaw angle in radians.
///
/// `forward = (sin yaw, cos yaw)` and `right = (cos yaw, -sin yaw)`. A
/// camera with this yaw looks along `-forward`.
///
/// # Examples
/// ```
/// use thicket::vector_math::planar_basis;
/// let (forward, right) = planar_basis(0.0);
/// assert_eq!(forward.to_array(), [0.0, 1.0]);
/// assert_eq!(right.to_array(), [1.0, 0.0]);
/// ```
#[must_use]
pub fn planar_basis(yaw: f64) -> (DVec2, DVec2) {
    let (sin, cos) = yaw.sin_cos();
    (DVec2::new(sin, cos), DVec2::new(cos, -sin))
}

/// Returns the unit vector in the direction of `vector`.
///
/// Zero and non-finite inputs yield `DVec2::ZERO`.
///
/// # Examples
///
/// ```
/// use glam::DVec2;
/// use thicket::vector_math::normalize_or_zero;
/// let unit = normalize_or_zero(DVec2::new(3.0, 4.0));
/// assert!((unit.x - 0.6).abs() < 1e-12);
/// assert!((unit.y - 0.8).abs() < 1e-12);
/// assert_eq!(normalize_or_zero(DVec2::ZERO), DVec2::ZERO);
/// ```
#[must_use]
pub fn normalize_or_zero(vector: DVec2) -> DVec2 {
    if !vector.is_finite() {
        return DVec2::ZERO;
    }
    vector.try_normalize().unwrap_or(DVec2::ZERO)
}

/// Moves `current` a fraction `alpha` of the way toward `target`.
///
/// `alpha` is clamped to `[0, 1]` so long frames never overshoot.
#[must_use]
pub fn blend_toward(current: DVec2, target: DVec2, alpha: f64) -> DVec2 {
    current.lerp(target, alpha.clamp(0.0, 1.0))
}
