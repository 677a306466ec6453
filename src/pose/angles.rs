//! Joint angle calculation.
//!
//! The angle at vertex `b` between rays b→a and b→c, from the normalized dot
//! product. Coincident points have no defined angle and yield `NaN`; callers
//! skip the dependent state update for that frame.

use glam::Vec2;

/// Angle at `b` in degrees, in `[0, 180]`, or `NaN` when `a == b` or `c == b`.
pub fn angle(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    let ba = a - b;
    let bc = c - b;

    let norms = ba.length() * bc.length();
    if norms == 0.0 || !norms.is_finite() {
        return f32::NAN;
    }

    // Rounding can push the cosine a hair outside [-1, 1]
    let cosine = (ba.dot(bc) / norms).clamp(-1.0, 1.0);
    cosine.acos().to_degrees()
}

/// Whether an angle can drive a state update.
pub fn is_valid(angle: f32) -> bool {
    angle.is_finite()
}
