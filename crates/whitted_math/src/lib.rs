// Re-export glam for convenience
pub use glam::*;

// Whitted math types
mod interval;
mod ray;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::{clamp_unit, face_forward, reflect, refract, square};
