// Module declarations in dependency order
pub mod commands;
pub mod core;
pub mod processing;
pub mod utils;

// Public exports for external consumers
pub use crate::core::{AppState, AspectRatio, BatchReport, ConversionSettings, ConversionTask, CropVariant, Progress, ProgressType, UnitResult};
pub use crate::processing::BatchProcessor;
pub use crate::processing::imaging::{center_crop_region, crop_to_aspect, CropRegion};
pub use crate::utils::{ConverterError, ConverterResult, ImageFormat};
pub use crate::commands::*;

// This library file is the public API for consuming this crate as a library.
// The command-line entry point is in main.rs.
