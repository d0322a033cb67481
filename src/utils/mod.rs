pub mod error;
pub mod validation;
pub mod formats;
pub mod fs;

pub use error::{ConverterError, ConverterResult, ValidationError};
pub use validation::{accept_inputs, validate_quality, DEFAULT_QUALITY};
pub use formats::{ImageFormat, has_accepted_extension, ACCEPTED_EXTENSIONS};
pub use fs::{
    clear_output_dir,
    contains_files,
    dir_exists,
    ensure_parent_dir,
    input_stem,
    output_path,
    DEFAULT_OUTPUT_ROOT,
};
