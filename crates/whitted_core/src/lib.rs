//! Whitted Core - Scene model and scene descriptions for the Whitted ray tracer.
//!
//! This crate provides:
//!
//! - **Scene model**: `Scene`, `SceneObject`, `Camera`, `Sphere`, `Plane`, `Light`
//! - **Scene descriptions**: JSON loading and validation
//!
//! # Example
//!
//! ```ignore
//! use whitted_core::load_scene;
//!
//! let scene = load_scene("scenes/demo.json")?;
//! println!("Loaded {} surfaces, {} lights",
//!     scene.surface_count(),
//!     scene.light_count());
//! ```

pub mod description;
pub mod scene;

// Re-export commonly used types
pub use description::{load_scene, load_scene_from_str, SceneError, SceneResult};
pub use scene::{
    Camera, Color, Light, LightKind, Material, Plane, RadialAttenuation, Scene, SceneObject, Sphere, Surface,
};
