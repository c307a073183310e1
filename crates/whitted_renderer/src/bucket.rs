//! Tiles of the image handed out to the rayon pool.

use whitted_core::Scene;

use crate::camera::ViewPlane;
use crate::renderer::{color_to_rgb, render_pixel, RenderConfig};

/// Default bucket edge in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 32;

/// A rectangle of pixels, `(x, y)` being its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Bucket {
    /// Image coordinates of every pixel, row-major within the bucket.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.y..self.y + self.height).flat_map(move |y| (self.x..self.x + self.width).map(move |x| (x, y)))
    }

    fn distance_to(&self, cx: f32, cy: f32) -> f32 {
        let bx = self.x as f32 + self.width as f32 / 2.0;
        let by = self.y as f32 + self.height as f32 / 2.0;
        (bx - cx).powi(2) + (by - cy).powi(2)
    }
}

/// Output bytes of one bucket, in [`Bucket::pixels`] order.
#[derive(Debug, Clone)]
pub struct RenderedBucket {
    pub bucket: Bucket,
    pub rgb: Vec<[u8; 3]>,
}

/// Cut the image into buckets of at most `size`×`size`, nearest to the
/// image centre first.
pub fn generate_buckets(width: u32, height: u32, size: u32) -> Vec<Bucket> {
    let size = size.max(1);
    let mut buckets: Vec<Bucket> = (0..height)
        .step_by(size as usize)
        .flat_map(|y| {
            (0..width).step_by(size as usize).map(move |x| Bucket {
                x,
                y,
                width: size.min(width - x),
                height: size.min(height - y),
            })
        })
        .collect();

    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
    buckets.sort_by(|a, b| a.distance_to(cx, cy).total_cmp(&b.distance_to(cx, cy)));

    log::debug!("{} buckets of {}px", buckets.len(), size);
    buckets
}

/// Trace every pixel of `bucket` and convert it to bytes.
pub fn render_bucket(bucket: Bucket, scene: &Scene, view: &ViewPlane, config: &RenderConfig) -> RenderedBucket {
    let rgb = bucket
        .pixels()
        .map(|(x, y)| color_to_rgb(render_pixel(scene, view, x, y, config)))
        .collect();
    RenderedBucket { bucket, rgb }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use whitted_core::{Camera, SceneObject};

    #[test]
    fn test_buckets_exact_fit() {
        let buckets = generate_buckets(64, 64, 32);
        assert_eq!(buckets.len(), 4);
        assert!(buckets.iter().all(|b| b.width == 32 && b.height == 32));
    }

    #[test]
    fn test_buckets_cover_every_pixel_once() {
        let (width, height) = (70, 45);
        let buckets = generate_buckets(width, height, 32);
        assert_eq!(buckets.len(), 6);

        let mut seen = HashSet::new();
        for pixel in buckets.iter().flat_map(|b| b.pixels()) {
            assert!(seen.insert(pixel), "pixel {:?} covered twice", pixel);
        }
        assert_eq!(seen.len(), (width * height) as usize);
    }

    #[test]
    fn test_centre_bucket_first() {
        let buckets = generate_buckets(96, 96, 32);
        assert_eq!(buckets.len(), 9);
        assert_eq!((buckets[0].x, buckets[0].y), (32, 32));
    }

    #[test]
    fn test_render_bucket_of_empty_scene() {
        let scene = Scene::new("empty", vec![SceneObject::Camera(Camera::new(1.0, 1.0))]);
        let view = ViewPlane::new(&Camera::new(1.0, 1.0), 10, 10);
        let bucket = Bucket { x: 8, y: 6, width: 2, height: 4 };

        let rendered = render_bucket(bucket, &scene, &view, &RenderConfig::default());
        assert_eq!(rendered.rgb.len(), 8);
        assert!(rendered.rgb.iter().all(|rgb| *rgb == [0, 0, 0]));
        assert_eq!(bucket.pixels().next(), Some((8, 6)));
        assert_eq!(bucket.pixels().last(), Some((9, 9)));
    }
}
