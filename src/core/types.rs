//! Core types for conversion settings and results.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::utils::{
    validate_quality, ConverterError, ConverterResult, ImageFormat, ValidationError,
    DEFAULT_OUTPUT_ROOT, DEFAULT_QUALITY,
};

/// Directory holding the uncropped copy when ratios are selected
pub const BASE_VARIANT_DIR: &str = "base";

/// A named width:height ratio such as `16-9`.
///
/// Kept rational so crop math stays exact in integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AspectRatio {
    /// Directory name for this ratio's outputs
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl AspectRatio {
    /// Creates a ratio named `W-H`. Both components must be positive.
    pub fn new(width: u32, height: u32) -> Result<Self, ValidationError> {
        if width == 0 || height == 0 {
            return Err(ValidationError::ratio(format!("{width}-{height}")));
        }
        Ok(Self {
            name: format!("{width}-{height}"),
            width,
            height,
        })
    }

    /// The built-in ratios, in the order they are offered.
    pub fn presets() -> Vec<AspectRatio> {
        [(16, 9), (4, 3), (9, 16), (3, 4)]
            .into_iter()
            .map(|(w, h)| Self {
                name: format!("{w}-{h}"),
                width: w,
                height: h,
            })
            .collect()
    }

    /// Width divided by height
    pub fn value(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl FromStr for AspectRatio {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s.trim().split_once('-').ok_or_else(|| ValidationError::ratio(s))?;
        let width = w.parse::<u32>().map_err(|_| ValidationError::ratio(s))?;
        let height = h.parse::<u32>().map_err(|_| ValidationError::ratio(s))?;
        Self::new(width, height).map_err(|_| ValidationError::ratio(s))
    }
}

/// Which copy of an input a task produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CropVariant {
    /// No ratios selected: saved directly under the format directory
    Original,
    /// Center-cropped to a ratio, saved under `<FORMAT>/<ratio-name>/`
    Ratio(AspectRatio),
    /// Uncropped companion of ratio outputs, saved under `<FORMAT>/base/`
    Base,
}

impl CropVariant {
    /// Subdirectory under the format directory, if any
    pub fn subdir(&self) -> Option<&str> {
        match self {
            Self::Original => None,
            Self::Ratio(ratio) => Some(&ratio.name),
            Self::Base => Some(BASE_VARIANT_DIR),
        }
    }
}

impl fmt::Display for CropVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original => f.write_str("original"),
            Self::Ratio(ratio) => write!(f, "{ratio}"),
            Self::Base => f.write_str(BASE_VARIANT_DIR),
        }
    }
}

/// Everything a batch needs, fixed once before it starts.
///
/// Built through [`ConversionSettings::new`], which resolves an empty format
/// selection to every format and normalizes order and duplicates.
/// Deserialization goes through the same constructor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawConversionSettings")]
pub struct ConversionSettings {
    /// Formats to write, deduplicated, in [`ImageFormat::ALL`] order
    formats: Vec<ImageFormat>,
    /// Ratios to crop to, deduplicated by name, in caller order
    ratios: Vec<AspectRatio>,
    /// Quality (1-100) handed to every encoder
    quality: u32,
    /// Root of the output tree
    output_root: PathBuf,
}

impl ConversionSettings {
    pub fn new(
        formats: impl IntoIterator<Item = ImageFormat>,
        ratios: impl IntoIterator<Item = AspectRatio>,
        quality: u32,
    ) -> ConverterResult<Self> {
        let quality = validate_quality(quality)?;

        let mut formats: Vec<ImageFormat> = formats.into_iter().collect();
        formats.sort();
        formats.dedup();
        if formats.is_empty() {
            formats = ImageFormat::ALL.to_vec();
        }

        let mut unique: Vec<AspectRatio> = Vec::new();
        for ratio in ratios {
            if !unique.iter().any(|r| r.name == ratio.name) {
                unique.push(ratio);
            }
        }

        Ok(Self {
            formats,
            ratios: unique,
            quality,
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
        })
    }

    /// Redirects the output tree away from `converted/`.
    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = root.into();
        self
    }

    pub fn formats(&self) -> &[ImageFormat] {
        &self.formats
    }

    pub fn ratios(&self) -> &[AspectRatio] {
        &self.ratios
    }

    pub fn quality(&self) -> u32 {
        self.quality
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Variants every (input, format) pair expands into, in save order.
    pub fn variants(&self) -> Vec<CropVariant> {
        if self.ratios.is_empty() {
            return vec![CropVariant::Original];
        }
        self.ratios
            .iter()
            .cloned()
            .map(CropVariant::Ratio)
            .chain(std::iter::once(CropVariant::Base))
            .collect()
    }
}

/// Unvalidated wire form of [`ConversionSettings`]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConversionSettings {
    #[serde(default)]
    formats: Vec<ImageFormat>,
    #[serde(default)]
    ratios: Vec<AspectRatio>,
    #[serde(default = "default_quality")]
    quality: u32,
    #[serde(default = "default_output_root")]
    output_root: PathBuf,
}

fn default_quality() -> u32 {
    DEFAULT_QUALITY
}

fn default_output_root() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_ROOT)
}

impl TryFrom<RawConversionSettings> for ConversionSettings {
    type Error = ConverterError;

    fn try_from(raw: RawConversionSettings) -> ConverterResult<Self> {
        let ratios = raw
            .ratios
            .into_iter()
            .map(|r| AspectRatio::new(r.width, r.height))
            .collect::<Result<Vec<_>, _>>()?;
        let settings = Self::new(raw.formats, ratios, raw.quality)?;
        Ok(settings.with_output_root(raw.output_root))
    }
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            formats: ImageFormat::ALL.to_vec(),
            ratios: Vec::new(),
            quality: DEFAULT_QUALITY,
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
        }
    }
}

/// Outcome of a single conversion unit.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitResult {
    /// Path of the source image
    pub input_path: PathBuf,
    /// Path the unit writes (or tried to write)
    pub output_path: PathBuf,
    pub format: ImageFormat,
    pub variant: CropVariant,
    /// Whether the file was written
    pub success: bool,
    /// Error message if the unit failed
    pub error: Option<String>,
    /// Output dimensions, zero on failure
    pub width: u32,
    pub height: u32,
    /// Bytes written, zero on failure
    pub output_size: u64,
}

/// Every unit's outcome for one batch, in processing order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub results: Vec<UnitResult>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = &UnitResult> {
        self.results.iter().filter(|r| !r.success)
    }

    /// True when at least one file made it to disk
    pub fn any_written(&self) -> bool {
        self.results.iter().any(|r| r.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ratio_notation() {
        let ratio: AspectRatio = "16-9".parse().unwrap();
        assert_eq!(ratio.name, "16-9");
        assert_eq!((ratio.width, ratio.height), (16, 9));
        assert!((ratio.value() - 16.0 / 9.0).abs() < f64::EPSILON);

        assert!("16:9".parse::<AspectRatio>().is_err());
        assert!("0-9".parse::<AspectRatio>().is_err());
        assert!("16-".parse::<AspectRatio>().is_err());
        assert!("wide".parse::<AspectRatio>().is_err());
    }

    #[test]
    fn presets_keep_their_order() {
        let names: Vec<_> = AspectRatio::presets().into_iter().map(|r| r.name).collect();
        assert_eq!(names, ["16-9", "4-3", "9-16", "3-4"]);
    }

    #[test]
    fn empty_format_selection_means_all() {
        let settings = ConversionSettings::new([], [], 81).unwrap();
        assert_eq!(settings.formats(), ImageFormat::ALL);
    }

    #[test]
    fn formats_are_sorted_and_deduplicated() {
        let settings = ConversionSettings::new(
            [ImageFormat::AVIF, ImageFormat::PNG, ImageFormat::AVIF],
            [],
            50,
        )
        .unwrap();
        assert_eq!(settings.formats(), [ImageFormat::PNG, ImageFormat::AVIF]);
    }

    #[test]
    fn ratios_keep_caller_order_without_duplicates() {
        let ratios = ["3-4", "16-9", "3-4"].map(|s| s.parse::<AspectRatio>().unwrap());
        let settings = ConversionSettings::new([ImageFormat::PNG], ratios, 50).unwrap();
        let names: Vec<_> = settings.ratios().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["3-4", "16-9"]);
    }

    #[test]
    fn rejects_out_of_range_quality() {
        assert!(ConversionSettings::new([], [], 0).is_err());
        assert!(ConversionSettings::new([], [], 101).is_err());
    }

    #[test]
    fn deserializing_validates_like_new() {
        let err = serde_json::from_str::<ConversionSettings>(r#"{"quality": 0}"#).unwrap_err();
        assert!(err.to_string().contains("Invalid quality value: 0"), "{err}");

        let settings: ConversionSettings = serde_json::from_str(
            r#"{"formats": ["AVIF", "PNG", "AVIF"], "quality": 60, "outputRoot": "out"}"#,
        )
        .unwrap();
        assert_eq!(settings.formats(), [ImageFormat::PNG, ImageFormat::AVIF]);
        assert_eq!(settings.quality(), 60);
        assert_eq!(settings.output_root(), Path::new("out"));

        let zero_ratio = r#"{"ratios": [{"name": "16-0", "width": 16, "height": 0}]}"#;
        assert!(serde_json::from_str::<ConversionSettings>(zero_ratio).is_err());

        let defaults: ConversionSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(defaults.formats(), ImageFormat::ALL);
        assert_eq!(defaults.quality(), DEFAULT_QUALITY);
    }

    #[test]
    fn variants_end_with_base() {
        let settings = ConversionSettings::new([], AspectRatio::presets(), 81).unwrap();
        let variants = settings.variants();
        assert_eq!(variants.len(), 5);
        assert_eq!(variants.last(), Some(&CropVariant::Base));

        let plain = ConversionSettings::default();
        assert_eq!(plain.variants(), [CropVariant::Original]);
    }

    #[test]
    fn variant_subdirs() {
        let ratio: AspectRatio = "4-3".parse().unwrap();
        assert_eq!(CropVariant::Original.subdir(), None);
        assert_eq!(CropVariant::Ratio(ratio).subdir(), Some("4-3"));
        assert_eq!(CropVariant::Base.subdir(), Some("base"));
    }
}
