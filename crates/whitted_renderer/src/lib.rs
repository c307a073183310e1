//! Whitted Renderer - Recursive ray tracing on the CPU
//!
//! A Whitted-style ray tracer: one primary ray per pixel, Phong shading
//! with hard shadows, and recursive reflection and refraction up to a
//! fixed depth. Intersection is a linear scan over the scene's surfaces.

mod bucket;
mod camera;
mod illumination;
mod intersect;
mod ppm;
mod renderer;
mod shader;
mod visibility;

pub use bucket::{generate_buckets, render_bucket, Bucket, RenderedBucket, DEFAULT_BUCKET_SIZE};
pub use camera::ViewPlane;
pub use illumination::{diffuse, fang, frad, specular, LightSource};
pub use intersect::{intersect, ray_plane, ray_sphere};
pub use ppm::{save_ppm, write_ppm, EncodeError, EncodeResult};
pub use renderer::{
    color_to_rgb, render, render_parallel, render_pixel, PixelBuffer, RenderConfig, RenderError, RenderResult,
};
pub use shader::{direct_shade, shade};
pub use visibility::{shoot, Hit};

/// Re-export scene and math types used in the public API
pub use whitted_core::{Color, Scene};
pub use whitted_math::{Ray, Vec3};
