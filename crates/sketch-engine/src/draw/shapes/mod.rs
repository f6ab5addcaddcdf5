//! Shape emitters.
//!
//! Each module adds `DrawQueue` methods for one shape family. Emitters are pure with
//! respect to their inputs: they compute vertices and submit jobs, nothing else.
//!
//! Conventions:
//! - `+Y` is up, `+Z` is forward, `+X` is right
//! - `None` color / rotation / size falls back to the queue's `DrawConfig`
//! - explicit-vertex shapes bake `rotation` around their anchor point; template shapes
//!   (circle, cube) carry it in the job transform
//! - degenerate input (non-finite positions, non-positive sizes) is skipped, never drawn

pub(crate) mod arc;
pub(crate) mod arrow;
pub(crate) mod circle;
pub(crate) mod cube;
pub(crate) mod diamond;
pub(crate) mod line;
pub(crate) mod point;
pub(crate) mod triangle;

use glam::{Quat, Vec3};

pub const UP: Vec3 = Vec3::Y;
pub const FORWARD: Vec3 = Vec3::Z;
pub const RIGHT: Vec3 = Vec3::X;

#[inline]
pub(crate) fn rotation_or_identity(rotation: Option<Quat>) -> Quat {
    match rotation {
        Some(q) if q.is_finite() && q.length_squared() > f32::EPSILON => q.normalize(),
        Some(_) => {
            log::trace!("ignoring degenerate rotation");
            Quat::IDENTITY
        }
        None => Quat::IDENTITY,
    }
}

/// `true` when `v` can size a shape: finite and strictly positive.
#[inline]
pub(crate) fn usable_size(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

/// Rejects non-finite anchors before any geometry is generated.
#[inline]
pub(crate) fn usable_point(shape: &str, p: Vec3) -> bool {
    if p.is_finite() {
        true
    } else {
        log::trace!("skipping {shape}: non-finite position {p}");
        false
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use glam::Vec3;

    pub(crate) const EPS: f32 = 1e-4;

    pub(crate) fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPS
    }
}
