//! Core application types and state management.
//!
//! This module contains the fundamental types used throughout the converter:
//! - [`AppState`]: Output root and open-output availability
//! - [`ConversionSettings`]: Formats, ratios and quality fixed for one batch
//! - [`ConversionTask`]: One (input, format, variant) output file
//! - [`BatchReport`]: Per-unit outcomes of a batch
//! - [`Progress`]: Progress events emitted while a batch runs

mod state;
mod types;
mod task;
mod progress;

pub use state::AppState;
pub use types::{AspectRatio, BatchReport, ConversionSettings, CropVariant, UnitResult, BASE_VARIANT_DIR};
pub use task::{plan_image, plan_tasks, total_units, ConversionTask};
pub use progress::{Progress, ProgressType};
