//! Ray-primitive intersection.
//!
//! Each test returns the ray parameter of the nearest hit in front of the
//! ray origin, or `None`. Degenerate cases (a ray grazing parallel to a
//! plane, a ray that misses) are ordinary misses, never errors.

use whitted_core::Surface;
use whitted_math::{Ray, Vec3};

/// Denominators smaller than this count as a ray parallel to a plane.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Distance along `ray` to a sphere, if it is hit.
///
/// Takes the nearer root when it lies in front of the origin, otherwise the
/// farther one, so a ray starting inside the sphere hits its far wall. The
/// direction does not need to be unit length.
pub fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = center - ray.origin();
    let a = ray.direction().length_squared();
    if a == 0.0 {
        return None;
    }
    let h = ray.direction().dot(oc);
    let c = oc.length_squared() - radius * radius;

    let discriminant = h * h - a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();

    let near = (h - sqrtd) / a;
    if near > 0.0 {
        return Some(near);
    }
    let far = (h + sqrtd) / a;
    if far > 0.0 {
        return Some(far);
    }
    None
}

/// Distance along `ray` to the plane through `point` with normal `normal`.
///
/// The normal is normalized on a working copy, so passing an already unit
/// normal gives the same answer.
pub fn ray_plane(ray: &Ray, point: Vec3, normal: Vec3) -> Option<f32> {
    let normal = normal.normalize_or_zero();
    let denominator = normal.dot(ray.direction());
    if denominator.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = (point - ray.origin()).dot(normal) / denominator;
    (t > 0.0).then_some(t)
}

/// Distance along `ray` to any shadable surface.
pub fn intersect(ray: &Ray, surface: Surface<'_>) -> Option<f32> {
    match surface {
        Surface::Sphere(sphere) => ray_sphere(ray, sphere.center, sphere.radius),
        Surface::Plane(plane) => ray_plane(ray, plane.position, plane.normal()),
    }
}
