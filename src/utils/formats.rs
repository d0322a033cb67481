use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::utils::ValidationError;

/// Output formats, declared in the order batches iterate them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ImageFormat {
    PNG,
    JPEG,
    WEBP,
    AVIF,
}

/// Input extensions accepted for conversion (compared lowercase).
pub const ACCEPTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "avif"];

impl ImageFormat {
    /// Every supported format, in processing order.
    pub const ALL: [ImageFormat; 4] = [Self::PNG, Self::JPEG, Self::WEBP, Self::AVIF];

    /// Name used for the per-format output directory
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::PNG => "PNG",
            Self::JPEG => "JPEG",
            Self::WEBP => "WEBP",
            Self::AVIF => "AVIF",
        }
    }

    /// Extension written on output files: the lowercased format name
    pub fn extension(&self) -> &'static str {
        match self {
            Self::PNG => "png",
            Self::JPEG => "jpeg",
            Self::WEBP => "webp",
            Self::AVIF => "avif",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for ImageFormat {
    type Err = ValidationError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_lowercase().as_str() {
            "png" => Ok(Self::PNG),
            "jpg" | "jpeg" => Ok(Self::JPEG),
            "webp" => Ok(Self::WEBP),
            "avif" => Ok(Self::AVIF),
            _ => Err(ValidationError::format(name)),
        }
    }
}

/// Returns `true` when `path` carries one of the accepted input extensions.
pub fn has_accepted_extension(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| ACCEPTED_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("png".parse::<ImageFormat>().unwrap(), ImageFormat::PNG);
        assert_eq!("JPG".parse::<ImageFormat>().unwrap(), ImageFormat::JPEG);
        assert_eq!("WebP".parse::<ImageFormat>().unwrap(), ImageFormat::WEBP);
        assert!("tiff".parse::<ImageFormat>().is_err());
    }

    #[test]
    fn extension_is_lowercased_name() {
        for format in ImageFormat::ALL {
            assert_eq!(format.extension(), format.dir_name().to_lowercase());
        }
    }

    #[test]
    fn all_is_sorted_in_processing_order() {
        let mut sorted = ImageFormat::ALL;
        sorted.sort();
        assert_eq!(sorted, ImageFormat::ALL);
    }

    #[test]
    fn accepted_extensions_ignore_case() {
        assert!(has_accepted_extension(Path::new("a/photo.JPEG")));
        assert!(has_accepted_extension(Path::new("photo.avif")));
        assert!(!has_accepted_extension(Path::new("notes.txt")));
        assert!(!has_accepted_extension(Path::new("README")));
    }
}
