//! Whitted ray tracing renderer.
//!
//! Implements the raster driver:
//! - One primary ray per pixel through the camera's view plane
//! - Recursive shading with reflection, refraction and shadows
//! - Clamped 8-bit output without gamma correction

use std::time::Instant;

use rayon::prelude::*;
use thiserror::Error;
use whitted_core::{Color, Scene};
use whitted_math::clamp_unit;

use crate::bucket::{generate_buckets, render_bucket, RenderedBucket, DEFAULT_BUCKET_SIZE};
use crate::camera::ViewPlane;
use crate::shader::shade;
use crate::visibility::shoot;

/// Aspect ratios further apart than this get a warning.
const ASPECT_WARN_RATIO: f32 = 1.5;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Deepest recursion level that is still shaded
    pub max_depth: u32,
    /// Phong specular exponent
    pub shininess: f32,
    /// Distance secondary rays are moved off the surface they leave
    pub bias: f32,
    /// Background color when a primary ray doesn't hit anything
    pub background: Color,
    /// Tile edge in pixels for parallel rendering
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: 7,
            shininess: 20.0,
            bias: 0.01,
            background: Color::ZERO,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

/// Errors that stop a render before it starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Scene has no camera")]
    MissingCamera,

    #[error("Image size must be at least 1x1, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },
}

/// Result type for rendering.
pub type RenderResult<T> = Result<T, RenderError>;

/// Convert a color to 8-bit RGB: clamp to [0, 1], scale by 255, truncate.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let r = (255.0 * clamp_unit(color.x)) as u8;
    let g = (255.0 * clamp_unit(color.y)) as u8;
    let b = (255.0 * clamp_unit(color.z)) as u8;
    [r, g, b]
}

/// Trace the primary ray through pixel (x, row) and return its color.
///
/// The color is not clamped.
pub fn render_pixel(scene: &Scene, view: &ViewPlane, x: u32, row: u32, config: &RenderConfig) -> Color {
    let ray = view.primary_ray(x, row);
    match shoot(scene, &ray, f32::INFINITY, None) {
        Some(hit) => shade(scene, &ray, hit, 0, 1.0, config),
        None => config.background,
    }
}

/// Row-major RGB pixel buffer, row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    /// `width * height * 3` bytes, R, G, B per pixel
    pub data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a new pixel buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 3],
        }
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 3
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        let i = self.offset(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let i = self.offset(x, y);
        self.data[i..i + 3].copy_from_slice(&rgb);
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, rendered: &RenderedBucket) {
        for ((x, y), rgb) in rendered.bucket.pixels().zip(&rendered.rgb) {
            self.set(x, y, *rgb);
        }
    }
}

fn prepare(scene: &Scene, width: u32, height: u32) -> RenderResult<ViewPlane> {
    if width == 0 || height == 0 {
        return Err(RenderError::EmptyImage { width, height });
    }
    let camera = scene.camera().ok_or(RenderError::MissingCamera)?;

    let mismatch = ViewPlane::aspect_mismatch(camera, width, height);
    if !(1.0 / ASPECT_WARN_RATIO..=ASPECT_WARN_RATIO).contains(&mismatch) {
        log::warn!(
            "Camera aspect {:.3} differs from image aspect {:.3}; the image will look stretched",
            camera.width / camera.height,
            width as f32 / height as f32
        );
    }

    Ok(ViewPlane::new(camera, width, height))
}

/// Render the entire scene to a pixel buffer.
///
/// Single-threaded, one row at a time from the top.
pub fn render(scene: &Scene, width: u32, height: u32, config: &RenderConfig) -> RenderResult<PixelBuffer> {
    let view = prepare(scene, width, height)?;
    let mut image = PixelBuffer::new(width, height);

    log::info!("Rendering {}x{} (serial)", width, height);
    let start = Instant::now();

    for row in 0..height {
        for x in 0..width {
            let color = render_pixel(scene, &view, x, row, config);
            image.set(x, row, color_to_rgb(color));
        }
    }

    log::info!("Rendered in {:.2?}", start.elapsed());
    Ok(image)
}

/// Render the scene in buckets spread over the rayon thread pool.
///
/// Pixels are independent, so the result is byte-identical to [`render`].
pub fn render_parallel(
    scene: &Scene,
    width: u32,
    height: u32,
    config: &RenderConfig,
) -> RenderResult<PixelBuffer> {
    let view = prepare(scene, width, height)?;
    let buckets = generate_buckets(width, height, config.bucket_size);

    log::info!(
        "Rendering {}x{} in {} buckets on {} threads",
        width,
        height,
        buckets.len(),
        rayon::current_num_threads()
    );
    let start = Instant::now();

    let rendered: Vec<RenderedBucket> = buckets
        .par_iter()
        .map(|bucket| render_bucket(*bucket, scene, &view, config))
        .collect();

    let mut image = PixelBuffer::new(width, height);
    for bucket in &rendered {
        image.write_bucket(bucket);
    }

    log::info!("Rendered in {:.2?}", start.elapsed());
    Ok(image)
}
