//! Demo render.
//!
//! Loads `scenes/demo.json` (or the path given as the first argument),
//! renders it in parallel and saves a PPM next to the working directory.

use std::path::PathBuf;

use whitted_core::load_scene;
use whitted_renderer::{render_parallel, save_ppm, RenderConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../scenes/demo.json"));

    let scene = load_scene(&path)?;
    let image = render_parallel(&scene, 640, 360, &RenderConfig::default())?;

    let filename = "demo.ppm";
    save_ppm(filename, &image)?;
    println!("Saved to {}", filename);

    Ok(())
}
