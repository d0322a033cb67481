// src/processing/imaging/executor.rs

//! Runs single conversion units against an already decoded image.

use std::path::Path;
use image::error::{ImageError, ImageFormatHint};
use image::{DynamicImage, ImageReader};
use tracing::{debug, warn};

use crate::core::{ConversionTask, CropVariant, UnitResult};
use crate::utils::{ensure_parent_dir, ConverterError, ConverterResult};

use super::crop::crop_to_aspect;
use super::formats::save_image_as;

/// Decodes the image at `path`, sniffing the format from its content.
pub fn decode_input(path: &Path) -> ConverterResult<DynamicImage> {
    let image = ImageReader::open(path)
        .map_err(|e| ConverterError::decode(format!("Cannot open '{}': {e}", path.display())))?
        .with_guessed_format()
        .map_err(|e| ConverterError::decode(format!("Cannot read '{}': {e}", path.display())))?
        .decode()
        .map_err(|e| {
            ConverterError::decode(format!(
                "Failed to decode '{}': {e}{}",
                path.display(),
                unsupported_hint(&e)
            ))
        })?;

    debug!("Loaded '{}': {}×{}", path.display(), image.width(), image.height());
    Ok(image)
}

// AVIF decoding is opt-in, point at the feature instead of a bare "unsupported"
fn unsupported_hint(err: &ImageError) -> &'static str {
    match err {
        ImageError::Unsupported(u)
            if !cfg!(feature = "avif-input")
                && u.format_hint() == ImageFormatHint::Exact(image::ImageFormat::Avif) =>
        {
            " (build with the `avif-input` feature to read AVIF)"
        }
        _ => "",
    }
}

/// Writes one task's output from the pristine `original`.
///
/// Ratio variants crop a fresh copy; `original` is never modified. Any
/// failure is logged and folded into the returned result.
pub fn execute_task(original: &DynamicImage, task: &ConversionTask, quality: u32) -> UnitResult {
    match write_task(original, task, quality) {
        Ok((width, height, output_size)) => {
            debug!("Saved {} ({width}×{height}, {output_size} bytes)", task.output_path.display());
            UnitResult {
                input_path: task.input_path.clone(),
                output_path: task.output_path.clone(),
                format: task.format,
                variant: task.variant.clone(),
                success: true,
                error: None,
                width,
                height,
                output_size,
            }
        }
        Err(e) => {
            warn!("Failed to save {}: {}", task.output_path.display(), e);
            failed_result(task, &e)
        }
    }
}

/// Result recorded for a task that produced no file.
pub fn failed_result(task: &ConversionTask, error: &ConverterError) -> UnitResult {
    UnitResult {
        input_path: task.input_path.clone(),
        output_path: task.output_path.clone(),
        format: task.format,
        variant: task.variant.clone(),
        success: false,
        error: Some(error.to_string()),
        width: 0,
        height: 0,
        output_size: 0,
    }
}

fn write_task(original: &DynamicImage, task: &ConversionTask, quality: u32) -> ConverterResult<(u32, u32, u64)> {
    ensure_parent_dir(&task.output_path)?;

    let size = match &task.variant {
        CropVariant::Ratio(ratio) => {
            let cropped = crop_to_aspect(original, ratio);
            let written = save_image_as(&cropped, &task.output_path, task.format, quality)?;
            (cropped.width(), cropped.height(), written)
        }
        CropVariant::Original | CropVariant::Base => {
            let written = save_image_as(original, &task.output_path, task.format, quality)?;
            (original.width(), original.height(), written)
        }
    };
    Ok(size)
}
