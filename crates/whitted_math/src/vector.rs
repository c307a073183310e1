//! Small vector helpers shared by intersection and shading.
//!
//! `glam` already supplies dot, cross and normalize; the functions here
//! cover the rest of what a Whitted-style tracer needs.

use crate::{Interval, Vec3};

/// Square a scalar.
#[inline]
pub fn square(v: f32) -> f32 {
    v * v
}

/// Clamp a color channel to [0, 1].
#[inline]
pub fn clamp_unit(v: f32) -> f32 {
    Interval::UNIT.clamp(v)
}

/// Mirror `d` about the normal `n`: d - 2(n·d)n.
///
/// `n` must be unit length; `d` may have any length.
#[inline]
pub fn reflect(d: Vec3, n: Vec3) -> Vec3 {
    d - 2.0 * n.dot(d) * n
}

/// Flip `n` so it faces against the incoming direction `d`.
#[inline]
pub fn face_forward(n: Vec3, d: Vec3) -> Vec3 {
    if n.dot(d) > 0.0 {
        -n
    } else {
        n
    }
}

/// Bend a unit direction through a surface using Snell's law.
///
/// Builds a tangent frame from the normal and the incoming direction:
/// `a = n × d`, `b = a × n` is the unit tangent along which `d` travels,
/// so `sin_i = d·b` and the transmitted direction is
/// `-n·cos_t + b·sin_t` with `sin_t = eta_ratio · sin_i`.
///
/// `eta_ratio` is the incoming medium's index over the transmitting
/// medium's index. Returns `None` on total internal reflection. A ray
/// arriving along the normal passes straight through.
pub fn refract(d: Vec3, n: Vec3, eta_ratio: f32) -> Option<Vec3> {
    let n = face_forward(n, d);

    let tangent = n.cross(d);
    if tangent.length_squared() < 1e-12 {
        return Some(d);
    }

    let a = tangent.normalize();
    let b = a.cross(n);

    let sin_i = d.dot(b);
    let sin_t = eta_ratio * sin_i;
    let cos_t_sq = 1.0 - square(sin_t);
    if cos_t_sq < 0.0 {
        return None;
    }

    Some((-n * cos_t_sq.sqrt() + b * sin_t).normalize())
}
