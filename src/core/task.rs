//! Conversion task definition and batch planning.

use std::path::{Path, PathBuf};
use serde::Serialize;
use crate::core::{ConversionSettings, CropVariant};
use crate::utils::{input_stem, output_path, ImageFormat};

/// One unit of work: a single output file for one input image.
///
/// Tasks have no identity beyond their output path.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionTask {
    /// Path to the source image
    pub input_path: PathBuf,
    /// Target encoding
    pub format: ImageFormat,
    /// Which copy of the input this task writes
    pub variant: CropVariant,
    /// Where the encoded image is written
    pub output_path: PathBuf,
}

impl ConversionTask {
    /// Creates a task, deriving the output path from the input's stem.
    pub fn new(
        input_path: &Path,
        format: ImageFormat,
        variant: CropVariant,
        output_root: &Path,
    ) -> Self {
        let stem = input_stem(input_path);
        let output_path = output_path(output_root, format, variant.subdir(), &stem);
        Self {
            input_path: input_path.to_path_buf(),
            format,
            variant,
            output_path,
        }
    }
}

/// Number of units a batch over `image_count` inputs will produce.
pub fn total_units(image_count: usize, settings: &ConversionSettings) -> usize {
    let per_format = if settings.ratios().is_empty() {
        1
    } else {
        settings.ratios().len() + 1
    };
    image_count * settings.formats().len() * per_format
}

/// All tasks for one input, grouped by format, ratios first and `base` last.
pub fn plan_image(input: &Path, settings: &ConversionSettings) -> Vec<ConversionTask> {
    let variants = settings.variants();
    let mut tasks = Vec::with_capacity(settings.formats().len() * variants.len());
    for &format in settings.formats() {
        for variant in &variants {
            tasks.push(ConversionTask::new(input, format, variant.clone(), settings.output_root()));
        }
    }
    tasks
}

/// Expands inputs × formats × variants into the ordered batch plan.
pub fn plan_tasks<P: AsRef<Path>>(
    inputs: &[P],
    settings: &ConversionSettings,
) -> Vec<ConversionTask> {
    let mut tasks = Vec::with_capacity(total_units(inputs.len(), settings));
    for input in inputs {
        tasks.extend(plan_image(input.as_ref(), settings));
    }
    tasks
}
