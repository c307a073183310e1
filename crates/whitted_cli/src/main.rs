//! `whitted` - render a scene description to a PPM image.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use whitted_core::load_scene;
use whitted_renderer::{render, render_parallel, save_ppm, RenderConfig};

use crate::cli::Args;

fn init_logging(args: &Args) {
    let mut builder = env_logger::Builder::from_default_env();
    match args.log_level {
        Some(level) => {
            builder.filter_level(level.into());
        }
        None if std::env::var_os("RUST_LOG").is_none() => {
            builder.filter_level(LevelFilter::Info);
        }
        None => {}
    }
    builder.init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);
    args.validate()?;

    log::info!("Starting Whitted");

    let scene = load_scene(&args.input)
        .with_context(|| format!("Failed to load scene {}", args.input.display()))?;

    let config = RenderConfig {
        max_depth: args.max_depth,
        ..Default::default()
    };
    log::debug!("{:?}", config);

    let image = if args.serial {
        render(&scene, args.width, args.height, &config)
    } else {
        render_parallel(&scene, args.width, args.height, &config)
    }
    .context("Failed to render scene")?;

    save_ppm(&args.output, &image)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    Ok(())
}
