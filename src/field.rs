//! Golden-angle phyllotaxis formulas.
//!
//! Point `n` of the spiral sits at radius `a * sqrt(n)` and angle
//! `n * golden_angle()` (mod 360). Indices start at 1.

use thiserror::Error;

/// Default scale factor `a` for [`radius`] and [`position`].
pub const DEFAULT_SCALE: f64 = 3.0;

/// Golden ratio, (1 + sqrt 5) / 2.
pub const PHI: f64 = 1.618_033_988_749_895;

const FULL_TURN_DEG: f64 = 360.0;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("Index n must be positive")]
    InvalidIndex { n: i64 },
}

/// The golden angle in degrees, `180 * (3 - sqrt 5)` (about 137.508).
pub fn golden_angle() -> f64 {
    180.0 * (3.0 - 5.0_f64.sqrt())
}

/// Radius of point `n`: `a * sqrt(n)`.
///
/// `a` is unconstrained, a negative scale gives a negative radius.
pub fn radius(n: i64, a: f64) -> Result<f64, FieldError> {
    if n <= 0 {
        return Err(FieldError::InvalidIndex { n });
    }
    Ok(a * (n as f64).sqrt())
}

/// [`radius`] with [`DEFAULT_SCALE`].
pub fn radius_default(n: i64) -> Result<f64, FieldError> {
    radius(n, DEFAULT_SCALE)
}

/// Angle of point `n` in degrees, reduced into `[0, 360)` with a floored modulo.
pub fn angle(n: i64) -> f64 {
    let theta = (n as f64 * golden_angle()).rem_euclid(FULL_TURN_DEG);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if theta >= FULL_TURN_DEG {
        0.0
    } else {
        theta
    }
}

/// Cartesian position of point `n`.
pub fn position(n: i64, a: f64) -> Result<(f64, f64), FieldError> {
    let r = radius(n, a)?;
    let theta = angle(n).to_radians();
    Ok(polar_to_cartesian(theta, r))
}

/// [`position`] with [`DEFAULT_SCALE`].
pub fn position_default(n: i64) -> Result<(f64, f64), FieldError> {
    position(n, DEFAULT_SCALE)
}

/// `angle` in radians.
#[inline]
fn polar_to_cartesian(angle: f64, radius: f64) -> (f64, f64) {
    (angle.cos() * radius, angle.sin() * radius)
}
