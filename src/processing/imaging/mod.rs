// src/processing/imaging/mod.rs

//! Image processing via the `image` crate.
//!
//! # Architecture
//!
//! - [`executor`]: Decodes inputs and runs single conversion units.
//! - [`crop`]: Center crop to a rational aspect ratio.
//! - [`formats`]: Maps output formats and quality to `image` encoders.

pub mod crop;
pub mod executor;
pub mod formats;

pub use crop::{center_crop_region, crop_to_aspect, CropRegion};
pub use executor::{decode_input, execute_task, failed_result};
pub use formats::{encode_as, save_image_as};
