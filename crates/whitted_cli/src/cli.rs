use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "whitted")]
#[command(about = "Render a JSON scene description to a PPM image with recursive ray tracing")]
pub struct Args {
    /// Image width in pixels
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Image height in pixels
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Scene description (.json)
    pub input: PathBuf,

    /// Output image (.ppm)
    pub output: PathBuf,

    /// Deepest reflection/refraction bounce that is still shaded
    #[arg(long, default_value_t = 7)]
    pub max_depth: u32,

    /// Render on a single thread instead of in parallel buckets
    #[arg(long)]
    pub serial: bool,

    /// Logging level (overrides RUST_LOG; defaults to info)
    #[arg(long)]
    pub log_level: Option<LogLevel>,
}

impl Args {
    /// Check what clap cannot: the file extensions.
    pub fn validate(&self) -> Result<()> {
        if !has_extension(&self.input, "json") {
            bail!("Input file must be a .json scene description: {}", self.input.display());
        }
        if !has_extension(&self.output, "ppm") {
            bail!("Output file must be a .ppm image: {}", self.output.display());
        }
        Ok(())
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}
