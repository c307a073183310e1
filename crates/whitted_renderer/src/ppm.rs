//! Binary PPM (P6) output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::renderer::PixelBuffer;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}

/// Result type for encoding.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Write `image` as a P6 PPM: text header, then raw RGB bytes.
pub fn write_ppm<W: Write>(writer: &mut W, image: &PixelBuffer) -> EncodeResult<()> {
    let expected = image.width as usize * image.height as usize * 3;
    if image.data.len() != expected {
        return Err(EncodeError::BufferSize {
            expected,
            actual: image.data.len(),
        });
    }

    write!(writer, "P6\n{} {}\n255\n", image.width, image.height)?;
    writer.write_all(&image.data)?;
    writer.flush()?;
    Ok(())
}

/// Save `image` to a PPM file at `path`.
pub fn save_ppm<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> EncodeResult<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_ppm(&mut writer, image)?;

    log::info!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}
