//! Scene description support for Whitted.
//!
//! A scene description is a JSON array of objects, each tagged with a
//! `"type"` of `camera`, `sphere`, `plane` or `light`:
//!
//! ```json
//! [
//!   { "type": "camera", "width": 2.0, "height": 2.0 },
//!   { "type": "sphere", "position": [0, 0, 5], "radius": 1,
//!     "diffuse_color": [1, 0, 0], "specular_color": [1, 1, 1],
//!     "reflectivity": 0.2 },
//!   { "type": "plane", "position": [0, -1, 0], "normal": [0, 1, 0],
//!     "diffuse_color": [0, 0.5, 0], "specular_color": [0, 0, 0] },
//!   { "type": "light", "color": [2, 2, 2], "position": [1, 3, 0],
//!     "radial-a2": 0.125, "radial-a1": 0.125, "radial-a0": 0.125 }
//! ]
//! ```
//!
//! Every object is validated while it is decoded. An object that is rejected
//! is reported with the line and column where it starts; syntax errors carry
//! the position at which the decoder stopped.
//!
//! # Example
//!
//! ```ignore
//! use whitted_core::description::load_scene;
//!
//! let scene = load_scene("scenes/demo.json")?;
//! println!("Loaded {} surfaces, {} lights",
//!     scene.surface_count(),
//!     scene.light_count());
//! ```

mod loader;
mod types;

pub use loader::*;
pub use types::*;
