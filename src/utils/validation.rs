use std::path::{Path, PathBuf};
use tracing::debug;
use crate::utils::{ValidationError, has_accepted_extension};

/// Lowest accepted quality value
pub const MIN_QUALITY: u32 = 1;
/// Highest accepted quality value
pub const MAX_QUALITY: u32 = 100;
/// Quality used when the caller doesn't pick one
pub const DEFAULT_QUALITY: u32 = 81;

/// Filters dropped paths down to the ones with an accepted image extension.
///
/// Anything else is skipped silently; the input order is preserved.
pub fn accept_inputs<I, P>(paths: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    paths
        .into_iter()
        .filter_map(|p| {
            let path = p.as_ref();
            if has_accepted_extension(path) {
                Some(path.to_path_buf())
            } else {
                debug!("Ignoring unsupported input: {}", path.display());
                None
            }
        })
        .collect()
}

/// Validates a quality value against 1..=100
pub fn validate_quality(quality: u32) -> Result<u32, ValidationError> {
    if (MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
        Ok(quality)
    } else {
        Err(ValidationError::Quality(quality))
    }
}
