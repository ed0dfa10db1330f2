//! Writing rendered images to disk.
//!
//! ASCII PPM is written directly; PNG goes through the `image` crate.

use crate::renderer::{color_to_rgb8, ImageBuffer};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while saving an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Image is {width}x{height} but holds {pixels} pixels")]
    SizeMismatch { width: u32, height: u32, pixels: usize },
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Largest channel value written in the PPM header.
const PPM_MAX_COLOR: u8 = 255;

fn check_size(image: &ImageBuffer) -> OutputResult<()> {
    let expected = image.width as usize * image.height as usize;
    if image.pixels.len() != expected {
        return Err(OutputError::SizeMismatch {
            width: image.width,
            height: image.height,
            pixels: image.pixels.len(),
        });
    }
    Ok(())
}

/// Write `image` as ASCII PPM (`P3`), one `r g b` triple per line,
/// top row first.
pub fn write_ppm<W: Write>(image: &ImageBuffer, mut out: W) -> OutputResult<()> {
    check_size(image)?;
    writeln!(out, "P3")?;
    writeln!(out, "{} {}", image.width, image.height)?;
    writeln!(out, "{}", PPM_MAX_COLOR)?;

    for color in &image.pixels {
        let [r, g, b] = color_to_rgb8(*color);
        writeln!(out, "{} {} {}", r, g, b)?;
    }

    out.flush()?;
    Ok(())
}

/// Save `image` as an ASCII PPM file.
pub fn save_ppm(image: &ImageBuffer, path: &Path) -> OutputResult<()> {
    let file = File::create(path)?;
    write_ppm(image, BufWriter::new(file))
}

/// Save `image` as an 8-bit PNG.
pub fn save_png(image: &ImageBuffer, path: &Path) -> OutputResult<()> {
    check_size(image)?;
    let rgb = image::RgbImage::from_raw(image.width, image.height, image.to_rgb8()).ok_or(
        OutputError::SizeMismatch {
            width: image.width,
            height: image.height,
            pixels: image.pixels.len(),
        },
    )?;
    rgb.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Save `image`, picking the format from the file extension
/// (`.ppm` or `.png`, case-insensitive).
pub fn save_image(image: &ImageBuffer, path: &Path) -> OutputResult<()> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "ppm" => save_ppm(image, path),
        "png" => save_png(image, path),
        _ => Err(OutputError::UnsupportedFormat(path.display().to_string())),
    }
}
