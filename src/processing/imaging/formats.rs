// src/processing/imaging/formats.rs

//! Encodes decoded images into the supported output formats.
//!
//! The quality value is handed to every format unchanged. PNG ignores it,
//! the same way the codec library silently would. WebP at quality 100 is
//! written lossless.

use std::io::Cursor;
use std::path::Path;

use image::codecs::avif::AvifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::DynamicImage;

use crate::utils::{ConverterError, ImageFormat};

type Result<T> = std::result::Result<T, ConverterError>;

// 1 = slowest/best, 10 = fastest. Batches run on the caller's thread.
const AVIF_SPEED: u8 = 8;

/// Encodes `image` as JPEG at `quality`.
///
/// Images with an alpha channel are rejected by the encoder; that surfaces
/// as an error for this unit only.
pub fn encode_jpeg(image: &DynamicImage, quality: u32) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_with_encoder(JpegEncoder::new_with_quality(&mut buf, clamp_quality(quality)))
        .map_err(|e| ConverterError::encode(format!("JPEG encode failed: {e}")))?;
    Ok(buf.into_inner())
}

/// Encodes `image` as PNG. Quality is ignored.
pub fn encode_png(image: &DynamicImage, _quality: u32) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_with_encoder(PngEncoder::new(&mut buf))
        .map_err(|e| ConverterError::encode(format!("PNG encode failed: {e}")))?;
    Ok(buf.into_inner())
}

/// Encodes `image` as WebP.
///
/// When quality == 100: lossless.
/// Otherwise: lossy through libwebp at `quality`.
pub fn encode_webp(image: &DynamicImage, quality: u32) -> Result<Vec<u8>> {
    if clamp_quality(quality) == 100 {
        let mut buf = Cursor::new(Vec::new());
        image
            .write_with_encoder(WebPEncoder::new_lossless(&mut buf))
            .map_err(|e| ConverterError::encode(format!("WebP encode failed: {e}")))?;
        return Ok(buf.into_inner());
    }

    // libwebp only takes 8-bit RGB or RGBA
    let converted;
    let source = match image {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => image,
        other if other.color().has_alpha() => {
            converted = DynamicImage::ImageRgba8(other.to_rgba8());
            &converted
        }
        other => {
            converted = DynamicImage::ImageRgb8(other.to_rgb8());
            &converted
        }
    };
    let encoder = webp::Encoder::from_image(source)
        .map_err(|e| ConverterError::encode(format!("WebP encode failed: {e}")))?;
    Ok(encoder.encode(clamp_quality(quality) as f32).to_vec())
}

/// Encodes `image` as AVIF at `quality`.
pub fn encode_avif(image: &DynamicImage, quality: u32) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    let encoder = AvifEncoder::new_with_speed_quality(&mut buf, AVIF_SPEED, clamp_quality(quality));
    image
        .write_with_encoder(encoder)
        .map_err(|e| ConverterError::encode(format!("AVIF encode failed: {e}")))?;
    Ok(buf.into_inner())
}

/// Dispatches to the correct encoder based on `format`.
pub fn encode_as(image: &DynamicImage, format: ImageFormat, quality: u32) -> Result<Vec<u8>> {
    match format {
        ImageFormat::PNG => encode_png(image, quality),
        ImageFormat::JPEG => encode_jpeg(image, quality),
        ImageFormat::WEBP => encode_webp(image, quality),
        ImageFormat::AVIF => encode_avif(image, quality),
    }
}

/// Encodes `image` and writes it to `output_path`, replacing any existing
/// file. Returns the number of bytes written.
///
/// Encoding happens in memory first so a failed encode never leaves a
/// truncated file behind.
pub fn save_image_as(
    image: &DynamicImage,
    output_path: &Path,
    format: ImageFormat,
    quality: u32,
) -> Result<u64> {
    let bytes = encode_as(image, format, quality)?;
    std::fs::write(output_path, &bytes).map_err(|e| {
        ConverterError::io(format!("Failed to write {}: {e}", output_path.display()))
    })?;
    Ok(bytes.len() as u64)
}

fn clamp_quality(quality: u32) -> u8 {
    quality.clamp(1, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn sample() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(8, 4, |x, y| Rgb([x as u8 * 30, y as u8 * 60, 128])))
    }

    #[test]
    fn encoded_bytes_carry_the_right_signature() {
        let img = sample();
        for format in ImageFormat::ALL {
            let bytes = encode_as(&img, format, 81).unwrap();
            let expected = match format {
                ImageFormat::PNG => image::ImageFormat::Png,
                ImageFormat::JPEG => image::ImageFormat::Jpeg,
                ImageFormat::WEBP => image::ImageFormat::WebP,
                ImageFormat::AVIF => {
                    // ISO-BMFF: box size, then the `ftyp` box with the `avif` brand.
                    assert_eq!(&bytes[4..12], b"ftypavif");
                    continue;
                }
            };
            assert_eq!(image::guess_format(&bytes).unwrap(), expected, "{format}");
        }
    }

    #[test]
    fn jpeg_quality_changes_output() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_fn(64, 64, |x, y| {
            Rgb([(x * 4) as u8, (y * 4) as u8, ((x ^ y) * 4) as u8])
        }));
        let low = encode_jpeg(&img, 5).unwrap();
        let high = encode_jpeg(&img, 100).unwrap();
        assert!(low.len() < high.len());
    }

    #[test]
    fn webp_quality_changes_output() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_fn(64, 64, |x, y| {
            Rgb([(x * 4) as u8, (y * 4) as u8, ((x ^ y) * 4) as u8])
        }));
        let low = encode_webp(&img, 5).unwrap();
        let high = encode_webp(&img, 100).unwrap();
        assert_ne!(low, high);
        assert!(low.len() < high.len());

        let decoded = image::load_from_memory(&low).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 64));
    }

    #[test]
    fn lossy_webp_accepts_grayscale_and_alpha() {
        let gray = DynamicImage::ImageLuma8(image::GrayImage::new(6, 3));
        let rgba = DynamicImage::ImageRgba8(image::RgbaImage::new(6, 3));
        for img in [gray, rgba] {
            let bytes = encode_webp(&img, 50).unwrap();
            assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::WebP);
        }
    }

    #[test]
    fn png_roundtrips_dimensions() {
        let bytes = encode_png(&sample(), 1).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 4));
    }
}
