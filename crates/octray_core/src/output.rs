//! Image encoding for finished renders.
//!
//! Input is a dense, row-major slice of averaged linear colours. Values are
//! gamma corrected (gamma 2), clamped and quantized to 8 bits, then written
//! as plain-text PPM or PNG depending on the file extension.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{ImageFormat, RgbImage};
use octray_math::{Interval, Vec3};
use thiserror::Error;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported output format: {0} (expected .ppm or .png)")]
    UnsupportedFormat(String),

    #[error("Pixel count {actual} does not match {width}x{height}")]
    SizeMismatch {
        width: u32,
        height: u32,
        actual: usize,
    },
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear colour to gamma-corrected 8-bit RGB.
pub fn to_rgb8(color: Vec3) -> [u8; 3] {
    const INTENSITY: Interval = Interval::new(0.0, 0.999);
    let quantize = |c: f32| (256.0 * INTENSITY.clamp(linear_to_gamma(c))) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Write pixels as an ASCII PPM (P3) image.
pub fn write_ppm<W: Write>(
    writer: &mut W,
    width: u32,
    height: u32,
    pixels: &[Vec3],
) -> Result<(), OutputError> {
    check_size(width, height, pixels)?;

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", width, height)?;
    writeln!(writer, "255")?;

    for color in pixels {
        let [r, g, b] = to_rgb8(*color);
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    Ok(())
}

/// Convert pixels to an 8-bit RGB image buffer.
pub fn to_rgb_image(width: u32, height: u32, pixels: &[Vec3]) -> Result<RgbImage, OutputError> {
    check_size(width, height, pixels)?;

    Ok(RgbImage::from_fn(width, height, |x, y| {
        image::Rgb(to_rgb8(pixels[(y * width + x) as usize]))
    }))
}

/// Encode pixels as an 8-bit PNG.
pub fn save_png<P: AsRef<Path>>(
    path: P,
    width: u32,
    height: u32,
    pixels: &[Vec3],
) -> Result<(), OutputError> {
    to_rgb_image(width, height, pixels)?.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save pixels to `path`, choosing the format from the extension.
pub fn save_image<P: AsRef<Path>>(
    path: P,
    width: u32,
    height: u32,
    pixels: &[Vec3],
) -> Result<(), OutputError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "ppm" => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_ppm(&mut writer, width, height, pixels)?;
            writer.flush()?;
        }
        "png" => save_png(path, width, height, pixels)?,
        _ => return Err(OutputError::UnsupportedFormat(path.display().to_string())),
    }

    log::info!("Saved {}x{} image to {}", width, height, path.display());
    Ok(())
}

fn check_size(width: u32, height: u32, pixels: &[Vec3]) -> Result<(), OutputError> {
    if pixels.len() != width as usize * height as usize {
        return Err(OutputError::SizeMismatch {
            width,
            height,
            actual: pixels.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 0.0001);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_to_rgb8_clamps() {
        assert_eq!(to_rgb8(Vec3::ZERO), [0, 0, 0]);
        assert_eq!(to_rgb8(Vec3::splat(4.0)), [255, 255, 255]);
        assert_eq!(to_rgb8(Vec3::new(0.25, 0.0, 1.0)), [128, 0, 255]);
    }

    #[test]
    fn test_write_ppm() {
        let pixels = vec![Vec3::ONE, Vec3::ZERO];
        let mut out = Vec::new();
        write_ppm(&mut out, 2, 1, &pixels).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "P3\n2 1\n255\n255 255 255\n0 0 0\n");
    }

    #[test]
    fn test_size_mismatch() {
        let mut out = Vec::new();
        let err = write_ppm(&mut out, 2, 2, &[Vec3::ZERO]).unwrap_err();
        assert!(matches!(err, OutputError::SizeMismatch { actual: 1, .. }));
    }

    #[test]
    fn test_rgb_image_layout() {
        let pixels = vec![Vec3::X, Vec3::Y, Vec3::Z, Vec3::ONE];
        let image = to_rgb_image(2, 2, &pixels).unwrap();

        assert_eq!(image.get_pixel(1, 0).0, [0, 255, 0]);
        assert_eq!(image.get_pixel(0, 1).0, [0, 0, 255]);
    }

    #[test]
    fn test_unsupported_extension() {
        let path = std::env::temp_dir().join("octray_output_test.bmp");
        let err = save_image(&path, 1, 1, &[Vec3::ZERO]).unwrap_err();
        assert!(matches!(err, OutputError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_save_png_file() {
        let path = std::env::temp_dir().join(format!("octray_output_{}.png", std::process::id()));
        save_image(&path, 2, 1, &[Vec3::ONE, Vec3::ZERO]).unwrap();

        let image = image::open(&path).unwrap().to_rgb8();
        assert_eq!(image.dimensions(), (2, 1));
        assert_eq!(image.get_pixel(0, 0).0, [255, 255, 255]);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_save_ppm_file() {
        let path = std::env::temp_dir().join(format!("octray_output_{}.ppm", std::process::id()));
        save_image(&path, 1, 1, &[Vec3::ONE]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("P3\n1 1\n255\n"));
        std::fs::remove_file(&path).ok();
    }
}
