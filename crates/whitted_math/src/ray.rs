use crate::Vec3;

/// A ray in 3D space with an origin and a direction.
///
/// Primary rays leave the camera through a pixel; secondary rays leave a
/// shading point along the mirror or transmitted direction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Create a ray whose direction is normalized.
    pub fn normalized(origin: Vec3, direction: Vec3) -> Self {
        Self::new(origin, direction.normalize_or_zero())
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Move the origin a small distance along the direction.
    ///
    /// Secondary rays start slightly off the surface they leave so that
    /// floating point error does not report the surface itself as a hit.
    pub fn nudged(&self, bias: f32) -> Self {
        Self::new(self.at(bias), self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_creation() {
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let direction = Vec3::new(0.0, 1.0, 0.0);
        let ray = Ray::new(origin, direction);

        assert_eq!(ray.origin, origin);
        assert_eq!(ray.direction, direction);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_normalized() {
        let ray = Ray::normalized(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(ray.direction(), Vec3::Z);
    }

    #[test]
    fn test_ray_nudged() {
        let ray = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::Y);
        let nudged = ray.nudged(0.01);

        assert!((nudged.origin() - Vec3::new(1.0, 0.01, 0.0)).length() < 1e-6);
        assert_eq!(nudged.direction(), ray.direction());
    }
}
