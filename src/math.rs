//! Small vector helpers shared by the simulation systems.
//!
//! Everything is built on `glam::Vec3` (Y up). The helpers here cover the
//! few operations the systems need beyond what glam provides directly:
//! deriving horizontal movement bases from a look direction, exponential
//! damping for velocity smoothing, and degenerate-vector guards.

use glam::Vec3;

/// Threshold below which a vector is treated as degenerate.
pub const EPSILON: f32 = 1e-4;

/// Project a look direction onto the horizontal plane and re-normalize.
///
/// Returns `None` when the look direction is (near) vertical, i.e. the
/// horizontal component is too small to normalize.
#[inline]
pub fn horizontal_forward(look: Vec3) -> Option<Vec3> {
    let flat = Vec3::new(look.x, 0.0, look.z);
    if flat.length_squared() < EPSILON * EPSILON {
        None
    } else {
        Some(flat.normalize())
    }
}

/// Right-hand basis vector for a horizontal forward direction.
///
/// `forward` is expected to lie in the horizontal plane; the result is
/// `forward x world-up`, which points to the viewer's right.
#[inline]
pub fn right_of(forward: Vec3) -> Vec3 {
    forward.cross(Vec3::Y)
}

/// Frame-rate independent exponential approach of `current` toward `target`.
///
/// With `rate` in 1/seconds, the remaining distance to the target shrinks by
/// a factor of `e` every `1/rate` seconds regardless of tick length.
#[inline]
pub fn damp(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    target + (current - target) * (-rate * dt).exp()
}

/// Vector form of [`damp`], decaying each component toward the target.
#[inline]
pub fn damp_vec3(current: Vec3, target: Vec3, rate: f32, dt: f32) -> Vec3 {
    target + (current - target) * (-rate * dt).exp()
}

/// Unit vector from `from` to `to`, or `None` if the points coincide.
#[inline]
pub fn direction_to(from: Vec3, to: Vec3) -> Option<Vec3> {
    let offset = to - from;
    let len = offset.length();
    if len < EPSILON {
        None
    } else {
        Some(offset / len)
    }
}
