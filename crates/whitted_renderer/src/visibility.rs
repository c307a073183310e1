//! Nearest-hit queries against the whole scene.
//!
//! One linear scan serves primary visibility, secondary rays and shadow
//! tests; callers differ only in the distance bound and the excluded object.

use whitted_core::Scene;
use whitted_math::{Interval, Ray};

use crate::intersect::intersect;

/// The nearest surface a ray reaches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Ray parameter of the intersection
    pub distance: f32,
    /// Index of the surface in the scene's object list
    pub index: usize,
}

/// Find the nearest surface along `ray`.
///
/// Cameras and lights are skipped, as is the object at `exclude` (the
/// surface a secondary ray leaves from). Hits at or behind the origin are
/// discarded, as are hits farther than `max_distance`; pass
/// `f32::INFINITY` for an unbounded query. Ties go to the earlier object.
pub fn shoot(scene: &Scene, ray: &Ray, max_distance: f32, exclude: Option<usize>) -> Option<Hit> {
    let range = Interval::ahead(max_distance);
    let mut nearest: Option<Hit> = None;

    for (index, surface) in scene.surfaces() {
        if exclude == Some(index) {
            continue;
        }
        let Some(distance) = intersect(ray, surface) else {
            continue;
        };
        if !range.reaches(distance) {
            continue;
        }
        if nearest.map_or(true, |hit| distance < hit.distance) {
            nearest = Some(Hit { distance, index });
        }
    }

    nearest
}
