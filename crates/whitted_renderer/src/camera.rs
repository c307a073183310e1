//! Primary ray generation.

use whitted_core::Camera;
use whitted_math::{Ray, Vec3};

/// A camera view plane resolved against an output resolution.
///
/// The eye is at the origin looking down +Z with +Y up. The view plane sits
/// at z = 1 and spans the camera's width and height; every pixel gets one
/// ray through its center. Row 0 is the top row of the image.
#[derive(Debug, Clone, Copy)]
pub struct ViewPlane {
    pub image_width: u32,
    pub image_height: u32,

    // Cached computed values
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
}

impl ViewPlane {
    /// Lay `camera`'s view plane over an image of the given size.
    pub fn new(camera: &Camera, image_width: u32, image_height: u32) -> Self {
        let pixel_delta_u = Vec3::new(camera.width / image_width.max(1) as f32, 0.0, 0.0);
        let pixel_delta_v = Vec3::new(0.0, -camera.height / image_height.max(1) as f32, 0.0);

        let upper_left = Vec3::new(-camera.width / 2.0, camera.height / 2.0, 1.0);
        let pixel00_loc = upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        Self {
            image_width,
            image_height,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
        }
    }

    /// Point on the view plane at the center of pixel (x, row).
    pub fn pixel_center(&self, x: u32, row: u32) -> Vec3 {
        self.pixel00_loc + x as f32 * self.pixel_delta_u + row as f32 * self.pixel_delta_v
    }

    /// Unit-direction ray from the eye through pixel (x, row).
    pub fn primary_ray(&self, x: u32, row: u32) -> Ray {
        Ray::normalized(Vec3::ZERO, self.pixel_center(x, row))
    }

    /// Ratio of the camera's aspect to the image's aspect (1 when they match).
    pub fn aspect_mismatch(camera: &Camera, image_width: u32, image_height: u32) -> f32 {
        let image_aspect = image_width as f32 / image_height.max(1) as f32;
        (camera.width / camera.height) / image_aspect
    }
}
